use diagnostic::{
  diagnostic::{Diagnostic, Label, Span},
  diagnostic_code::DiagnosticCode,
  DiagnosticEngine,
};

use crate::{
  token::{
    types::{Literal, TokenType},
    Token,
  },
  Scanner,
};

const KEYWORDS: &[(&str, TokenType)] = &[
  ("if", TokenType::If),
  ("else", TokenType::Else),
  ("and", TokenType::And),
  ("or", TokenType::Or),
  ("not", TokenType::Not),
  ("True", TokenType::True),
  ("False", TokenType::False),
];

impl Scanner {
  /// Scans the whole source into `self.tokens`, one token at a time.
  pub fn get_tokens(&mut self, engine: &mut DiagnosticEngine) {
    while !self.is_at_end() {
      self.start = self.current;
      self.scan_token(engine);
    }

    self.tokens.push(Token::new(
      TokenType::Eof,
      "\0".to_string(),
      None,
      self.line,
      self.current,
    ));
  }

  fn scan_token(&mut self, engine: &mut DiagnosticEngine) {
    let c = self.advance();

    match c {
      '+' => self.add_token(TokenType::Plus, None),
      '-' => self.add_token(TokenType::Minus, None),
      '*' => self.add_token(TokenType::Star, None),
      '/' => self.add_token(TokenType::Slash, None),
      '%' => self.add_token(TokenType::Percent, None),

      '<' => {
        if self.peek() == Some('=') {
          self.advance();
          self.add_token(TokenType::LessEqual, None);
        } else {
          self.add_token(TokenType::Less, None);
        }
      },
      '>' => {
        if self.peek() == Some('=') {
          self.advance();
          self.add_token(TokenType::GreaterEqual, None);
        } else {
          self.add_token(TokenType::Greater, None);
        }
      },

      '(' => self.add_token(TokenType::LeftParen, None),
      ')' => self.add_token(TokenType::RightParen, None),
      '{' => self.add_token(TokenType::LeftBrace, None),
      '}' => self.add_token(TokenType::RightBrace, None),
      '[' => self.add_token(TokenType::LeftBracket, None),
      ']' => self.add_token(TokenType::RightBracket, None),

      '=' => {
        if self.peek() == Some('=') {
          self.advance();
          self.add_token(TokenType::EqualEqual, None);
        } else {
          self.add_token(TokenType::Equal, None);
        }
      },

      '!' => {
        if self.peek() == Some('=') {
          self.advance();
          self.add_token(TokenType::BangEqual, None);
        } else {
          self.report_unexpected(engine, c);
        }
      },

      '?' => {
        if self.peek() == Some('=') {
          self.advance();
          self.add_token(TokenType::MaybeEqual, None);
        } else {
          self.report_unexpected(engine, c);
        }
      },

      '.' => self.add_token(TokenType::Dot, None),
      ':' => self.add_token(TokenType::Colon, None),
      ',' => self.add_token(TokenType::Comma, None),

      '#' => self.comment(),

      '"' | '\'' => self.string(c),

      ' ' | '\t' | '\r' => {},

      '\n' => {
        if self.column > 1 {
          self.add_token(TokenType::Eol, None);
        }
        while self.peek() == Some('\n') {
          self.advance();
          self.advance_line();
        }
        self.advance_line();
      },

      other if other.is_ascii_digit() => self.number(),
      other if other.is_alphabetic() || other == '$' => self.identifier(),

      other => self.report_unexpected(engine, other),
    }
  }

  fn report_unexpected(&mut self, engine: &mut DiagnosticEngine, c: char) {
    engine.emit(
      Diagnostic::new(
        DiagnosticCode::InvalidCharacter,
        format!("unexpected character: {}", c),
      )
      .with_label(Label::primary(
        Span {
          file: "<script>".to_string(),
          line: self.line,
          column: self.column,
          length: 1,
        },
        None,
      )),
    );
  }

  fn comment(&mut self) {
    while self.peek() != Some('\n') && !self.is_at_end() {
      self.advance();
    }
  }

  fn advance_line(&mut self) {
    self.line += 1;
    self.column = 0;
  }

  fn string(&mut self, quote: char) {
    while self.peek() != Some(quote) && !self.is_at_end() {
      if self.peek() == Some('\n') {
        self.advance_line();
      }
      self.advance();
    }

    let inner_end = self.current;
    // Closing quote, if present; an unterminated string just runs to EOF.
    if !self.is_at_end() {
      self.advance();
    }

    let inner_start = self.start + 1;
    let value = self.slice(inner_start, inner_end.max(inner_start));
    self.add_token(TokenType::String, Some(Literal::String(value)));
  }

  fn number(&mut self) {
    let mut is_float = false;

    while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
      self.advance();
    }

    if self.peek() == Some('.') && matches!(self.peek_next(), Some(c) if c.is_ascii_digit()) {
      self.advance();
      is_float = true;
      while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
        self.advance();
      }
    }

    let text = self.slice(self.start, self.current);
    if is_float {
      let value: f64 = text.parse().unwrap_or(0.0);
      self.add_token(TokenType::Number, Some(Literal::Number(value)));
    } else {
      let value: i64 = text.parse().unwrap_or(0);
      self.add_token(TokenType::Number, Some(Literal::Int(value)));
    }
  }

  fn identifier(&mut self) {
    while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_' || c == '.') {
      self.advance();
    }

    let text = self.slice(self.start, self.current);
    let kind = KEYWORDS
      .iter()
      .find(|(kw, _)| *kw == text)
      .map(|(_, kind)| *kind)
      .unwrap_or(TokenType::Identifier);

    self.add_token(kind, Some(Literal::String(text)));
  }

  fn add_token(&mut self, kind: TokenType, literal: Option<Literal>) {
    let lexeme = self.slice(self.start, self.current);
    self
      .tokens
      .push(Token::new(kind, lexeme, literal, self.line, self.column));
  }

  fn is_at_end(&self) -> bool {
    self.current >= self.source.len()
  }

  fn advance(&mut self) -> char {
    let c = self.peek().unwrap_or('\0');
    self.current += 1;
    self.column += 1;
    c
  }

  fn peek(&self) -> Option<char> {
    self.source.get(self.current).copied()
  }

  fn peek_next(&self) -> Option<char> {
    self.source.get(self.current + 1).copied()
  }

  fn slice(&self, start: usize, end: usize) -> String {
    self.source[start..end].iter().collect()
  }
}
