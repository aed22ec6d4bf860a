//! Recursive-descent, precedence-climbing parser producing Ringneck's AST.
//!
//! Grammar (tightest last):
//!
//! ```text
//! program     := statement (EOL+ statement)* EOF
//! statement   := if_stmt | repeat_stmt | expr_stmt
//! expr_stmt   := assignment (EOL | EOF)
//! assignment  := expression_list ( ('=' | '?=') assignment )?
//! expr_list   := equality ( ',' equality )*
//! equality    := logical ( ('==' | '!=') logical )*
//!              | logical 'if' equality ('else' expression)?
//! logical     := comparison ( ('and' | 'or') comparison )*
//! comparison  := term ( ('<' | '<=' | '>' | '>=') term )*
//! term        := factor ( ('+' | '-') factor )*
//! factor      := unary ( ('*' | '/') unary )*
//! unary       := ('-' unary) | ('*' unary) | call
//! call        := primary ( '(' args? ')' )*
//! primary     := TRUE | FALSE | NOT | NUMBER | STRING
//!              | IDENTIFIER ( '[' list ']' )?
//!              | '(' expr_list ')'
//!              | '[' list_body ']'
//!              | '{' dict_body '}'
//!              | '%'
//! ```

use diagnostic::{
  diagnostic::{Diagnostic, Label, Span},
  diagnostic_code::DiagnosticCode,
  DiagnosticEngine,
};
use scanner::token::{types::Literal as ScanLiteral, types::TokenType, Token};

pub mod ast;
pub mod printer;

pub use ast::{Expr, KeyDatum, ListBody, LiteralValue, Stmt};

const AUGMENTED_OPS: &[TokenType] = &[
  TokenType::Plus,
  TokenType::Minus,
  TokenType::Star,
  TokenType::Slash,
  TokenType::Percent,
];

pub struct Parser {
  tokens: Vec<Token>,
  current: usize,
}

impl Parser {
  pub fn new(tokens: Vec<Token>) -> Self {
    Self { tokens, current: 0 }
  }

  pub fn parse(&mut self, engine: &mut DiagnosticEngine) -> Vec<Stmt> {
    let mut statements = Vec::new();
    while !self.is_at_end() {
      statements.push(self.statement(engine));
      self.skip_eols();
    }
    statements
  }

  // --- statement grammar ---

  fn statement(&mut self, engine: &mut DiagnosticEngine) -> Stmt {
    if self.check(TokenType::If) {
      return self.if_statement(engine);
    }
    if self.check_keyword("repeat") {
      return self.repeat_statement(engine);
    }
    self.expression_statement(engine)
  }

  /// `if` is not a reserved structural keyword beyond the `IF` token itself;
  /// `endif` is recognized by lexeme on an ordinary `IDENTIFIER`, the same
  /// way `repeat`/`times` are, so the closed token-kind set is untouched.
  fn if_statement(&mut self, engine: &mut DiagnosticEngine) -> Stmt {
    self.consume(TokenType::If, "Expected 'if'", engine);
    let condition = self.equality(engine);
    self.consume(TokenType::Colon, "Expected ':' after if condition", engine);
    self.skip_eols();

    let mut body = Vec::new();
    while !self.check_keyword("endif") && !self.is_at_end() {
      body.push(self.statement(engine));
      self.skip_eols();
    }
    self.consume_keyword("endif", "Expected 'endif' to close if block", engine);

    Stmt::If(condition, body)
  }

  fn repeat_statement(&mut self, engine: &mut DiagnosticEngine) -> Stmt {
    self.advance(); // 'repeat'
    let inner = self.assignment(engine);
    self.consume_keyword("times", "Expected 'times' after repeat body", engine);
    let count = self.equality(engine);
    Stmt::Repeat(count, Box::new(Stmt::Expression(inner)))
  }

  fn expression_statement(&mut self, engine: &mut DiagnosticEngine) -> Stmt {
    let expr = self.parse_expression(engine);
    if !self.is_at_end() {
      self.consume(TokenType::Eol, "Expect newline after expression", engine);
    }
    Stmt::Expression(expr)
  }

  // --- expression grammar ---

  fn expression_list(&mut self, engine: &mut DiagnosticEngine) -> Expr {
    let expr = self.equality(engine);
    if self.check(TokenType::Comma) {
      let mut items = vec![expr];
      while self.match_kinds(&[TokenType::Comma]) {
        items.push(self.equality(engine));
      }
      if !self.check(TokenType::RightParen) {
        return Expr::Tuple(items);
      }
      return Expr::ExpressionList(items);
    }
    expr
  }

  fn parse_expression(&mut self, engine: &mut DiagnosticEngine) -> Expr {
    self.assignment(engine)
  }

  /// Augmented assignment (`a += 1`) has no dedicated token in the closed
  /// kind set, so it is recognized by 3-token lookahead before descending
  /// into the ordinary precedence chain, where a trailing bare `=` would
  /// otherwise be a parse error.
  fn assignment(&mut self, engine: &mut DiagnosticEngine) -> Expr {
    if self.augmented_assign_ahead() {
      let name = self.advance().clone();
      let op = self.advance().clone();
      self.advance(); // '='
      let right = self.assignment(engine);
      return Expr::AugmentedAssign(Box::new(Expr::Variable(name)), op, Box::new(right));
    }

    let expr = self.expression_list(engine);

    if self.match_kinds(&[TokenType::Equal, TokenType::MaybeEqual]) {
      let equals = self.previous().clone();
      let value = self.assignment(engine);

      return match expr {
        Expr::Tuple(_) | Expr::List(_) => Expr::MultiAssign(Box::new(expr), equals, Box::new(value)),
        Expr::Variable(name) => Expr::Assign(name, equals, Box::new(value)),
        Expr::VariableIterator(..) => Expr::AssignIterator(Box::new(expr), equals, Box::new(value)),
        other => {
          self.error(
            &equals,
            "Invalid assignment target.",
            engine,
            DiagnosticCode::InvalidAssignmentTarget,
          );
          other
        },
      };
    }

    expr
  }

  fn augmented_assign_ahead(&self) -> bool {
    matches!(self.peek_at(0), Some(t) if t.kind == TokenType::Identifier)
      && matches!(self.peek_at(1), Some(t) if AUGMENTED_OPS.contains(&t.kind))
      && matches!(self.peek_at(2), Some(t) if t.kind == TokenType::Equal)
  }

  fn equality(&mut self, engine: &mut DiagnosticEngine) -> Expr {
    let expr = self.logical(engine);

    if self.check(TokenType::If) {
      self.advance();
      let condition = self.equality(engine);
      let mut other = None;
      if self.match_kinds(&[TokenType::Else]) {
        other = Some(Box::new(self.parse_expression(engine)));
      }
      return Expr::Conditional(Box::new(expr), Box::new(condition), other);
    }

    let mut expr = expr;
    while self.match_kinds(&[TokenType::BangEqual, TokenType::EqualEqual]) {
      let op = self.previous().clone();
      let right = self.logical(engine);
      expr = Expr::Binary(Box::new(expr), op, Box::new(right));
    }
    expr
  }

  fn logical(&mut self, engine: &mut DiagnosticEngine) -> Expr {
    let mut expr = self.comparison(engine);
    while self.match_kinds(&[TokenType::And, TokenType::Or]) {
      let op = self.previous().clone();
      let right = self.comparison(engine);
      expr = Expr::Binary(Box::new(expr), op, Box::new(right));
    }
    expr
  }

  fn comparison(&mut self, engine: &mut DiagnosticEngine) -> Expr {
    let mut expr = self.term(engine);
    while self.match_kinds(&[
      TokenType::Greater,
      TokenType::GreaterEqual,
      TokenType::Less,
      TokenType::LessEqual,
    ]) {
      let op = self.previous().clone();
      let right = self.term(engine);
      expr = Expr::Binary(Box::new(expr), op, Box::new(right));
    }
    expr
  }

  fn term(&mut self, engine: &mut DiagnosticEngine) -> Expr {
    let mut expr = self.factor(engine);
    while self.match_kinds(&[TokenType::Plus, TokenType::Minus]) {
      let op = self.previous().clone();
      let right = self.factor(engine);
      expr = Expr::Binary(Box::new(expr), op, Box::new(right));
    }
    expr
  }

  fn factor(&mut self, engine: &mut DiagnosticEngine) -> Expr {
    let mut expr = self.unary(engine);
    while self.match_kinds(&[TokenType::Star, TokenType::Slash]) {
      let op = self.previous().clone();
      let right = self.unary(engine);
      expr = Expr::Binary(Box::new(expr), op, Box::new(right));
    }
    expr
  }

  fn unary(&mut self, engine: &mut DiagnosticEngine) -> Expr {
    if self.match_kinds(&[TokenType::Minus]) {
      let op = self.previous().clone();
      let right = self.unary(engine);
      return Expr::Unary(op, Box::new(right));
    }
    if self.match_kinds(&[TokenType::Star]) {
      let op = self.previous().clone();
      let right = self.unary(engine);
      return Expr::Starred(op, Box::new(right));
    }
    self.call(engine)
  }

  fn call(&mut self, engine: &mut DiagnosticEngine) -> Expr {
    let mut expr = self.primary(engine);
    while self.match_kinds(&[TokenType::LeftParen]) {
      expr = self.finish_call(expr, engine);
    }
    expr
  }

  fn finish_call(&mut self, callee: Expr, engine: &mut DiagnosticEngine) -> Expr {
    let mut arguments = Vec::new();
    if !self.check(TokenType::RightParen) {
      arguments.push(self.equality(engine));
      while self.match_kinds(&[TokenType::Comma]) {
        arguments.push(self.equality(engine));
      }
    }
    let paren = self.consume(TokenType::RightParen, "Expected ')' after arguments", engine);
    Expr::Call(Box::new(callee), paren, arguments)
  }

  fn primary(&mut self, engine: &mut DiagnosticEngine) -> Expr {
    if self.match_kinds(&[TokenType::False]) {
      return Expr::Literal(LiteralValue::Bool(false));
    }
    if self.match_kinds(&[TokenType::True]) {
      return Expr::Literal(LiteralValue::Bool(true));
    }
    if self.match_kinds(&[TokenType::Not]) {
      return Expr::Literal(LiteralValue::Str("not".to_string()));
    }

    if self.match_kinds(&[TokenType::Identifier]) {
      let prefix = self.previous().clone();
      if self.check(TokenType::LeftBracket) {
        let iterator = self.primary(engine);
        return Expr::VariableIterator(prefix, Box::new(iterator));
      }
      return Expr::Variable(prefix);
    }

    if self.match_kinds(&[TokenType::Number, TokenType::String]) {
      let token = self.previous().clone();
      return Expr::Literal(literal_from_token(&token));
    }

    if self.match_kinds(&[TokenType::LeftParen]) {
      let expr = self.expression_list(engine);
      self.consume(TokenType::RightParen, "Expect ')' after expression", engine);
      return match expr {
        Expr::ExpressionList(items) => Expr::Tuple(items),
        other => Expr::Grouping(Box::new(other)),
      };
    }

    if self.match_kinds(&[TokenType::LeftBracket]) {
      return self.list_expr(engine);
    }

    if self.match_kinds(&[TokenType::LeftBrace]) {
      return self.dictionary(engine);
    }

    if self.match_kinds(&[TokenType::Percent]) {
      return Expr::IteratorValue(self.previous().clone());
    }

    let token = self.peek().clone();
    self.error(&token, "Expect expression", engine, DiagnosticCode::ExpectedExpression);
    if !self.is_at_end() {
      self.advance();
    }
    Expr::Literal(LiteralValue::Bool(false))
  }

  /// Dict keys go through `parse_expression` (so a bare identifier key still
  /// works as a `Variable`), values through `equality` — mirroring the
  /// asymmetry in the grammar's own `expr_list`/`dict_body` split.
  fn dictionary(&mut self, engine: &mut DiagnosticEngine) -> Expr {
    let mut pairs = Vec::new();
    while !self.check(TokenType::RightBrace) && !self.is_at_end() {
      self.skip_eols();
      if self.check(TokenType::RightBrace) {
        break;
      }
      let key = self.parse_expression(engine);
      self.consume(TokenType::Colon, "Expect colon", engine);
      let datum = self.equality(engine);
      pairs.push(KeyDatum { key, datum });
      if self.check(TokenType::Comma) {
        self.advance();
      }
      self.skip_eols();
    }
    self.consume(TokenType::RightBrace, "Expect '}' to close dict", engine);
    Expr::Dict(pairs)
  }

  fn list_expr(&mut self, engine: &mut DiagnosticEngine) -> Expr {
    if self.check(TokenType::RightBracket) {
      self.consume(TokenType::RightBracket, "Expected ']' to close an empty list.", engine);
      return Expr::List(ListBody::Items(Vec::new()));
    }
    let expr = self.expression_list(engine);
    self.consume(TokenType::RightBracket, "Expect ']' to close list", engine);
    match expr {
      starred @ Expr::Starred(..) => Expr::List(ListBody::Spread(Box::new(starred))),
      Expr::Tuple(items) => Expr::List(ListBody::Items(items)),
      Expr::ExpressionList(items) => Expr::List(ListBody::Items(items)),
      other => Expr::List(ListBody::Items(vec![other])),
    }
  }

  // --- token stream helpers ---

  fn match_kinds(&mut self, kinds: &[TokenType]) -> bool {
    for kind in kinds {
      if self.check(*kind) {
        self.advance();
        return true;
      }
    }
    false
  }

  fn check(&self, kind: TokenType) -> bool {
    if self.is_at_end() {
      return false;
    }
    self.peek().kind == kind
  }

  fn check_keyword(&self, word: &str) -> bool {
    matches!(self.peek_at(0), Some(t) if t.kind == TokenType::Identifier && t.lexeme == word)
  }

  fn consume_keyword(&mut self, word: &str, message: &str, engine: &mut DiagnosticEngine) {
    if self.check_keyword(word) {
      self.advance();
      return;
    }
    let token = self.peek().clone();
    self.error(&token, message, engine, DiagnosticCode::ExpectedToken);
  }

  fn advance(&mut self) -> &Token {
    if !self.is_at_end() {
      self.current += 1;
    }
    self.previous()
  }

  fn is_at_end(&self) -> bool {
    self.peek().kind == TokenType::Eof
  }

  fn peek(&self) -> &Token {
    &self.tokens[self.current]
  }

  fn peek_at(&self, offset: usize) -> Option<&Token> {
    self.tokens.get(self.current + offset)
  }

  fn previous(&self) -> &Token {
    &self.tokens[self.current - 1]
  }

  fn skip_eols(&mut self) {
    while self.match_kinds(&[TokenType::Eol]) {}
  }

  fn consume(&mut self, kind: TokenType, message: &str, engine: &mut DiagnosticEngine) -> Token {
    if self.check(kind) {
      return self.advance().clone();
    }
    let token = self.peek().clone();
    self.error(&token, message, engine, DiagnosticCode::UnexpectedToken);
    if !self.is_at_end() {
      self.advance();
    }
    token
  }

  fn error(&self, token: &Token, message: &str, engine: &mut DiagnosticEngine, code: DiagnosticCode) {
    engine.emit(
      Diagnostic::new(code, message.to_string()).with_label(Label::primary(
        Span {
          file: "<script>".to_string(),
          line: token.line,
          column: token.column,
          length: token.lexeme.len().max(1),
        },
        None,
      )),
    );
  }
}

fn literal_from_token(token: &Token) -> LiteralValue {
  match &token.literal {
    Some(ScanLiteral::Int(n)) => LiteralValue::Int(*n),
    Some(ScanLiteral::Number(n)) => LiteralValue::Float(*n),
    Some(ScanLiteral::String(s)) => LiteralValue::Str(s.clone()),
    Some(ScanLiteral::Boolean(b)) => LiteralValue::Bool(*b),
    _ => LiteralValue::Str(token.lexeme.clone()),
  }
}
