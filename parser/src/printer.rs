//! Canonical S-expression printer used as a parse-tree fixture in tests.

use crate::ast::{Expr, KeyDatum, ListBody, Stmt};

pub struct Printer;

impl Printer {
  pub fn new() -> Self {
    Self
  }

  pub fn print_program(&self, statements: &[Stmt]) -> Vec<String> {
    statements.iter().map(|s| self.print_stmt(s)).collect()
  }

  pub fn print_stmt(&self, stmt: &Stmt) -> String {
    match stmt {
      Stmt::Expression(expr) => self.print_expr(expr),
      Stmt::If(cond, body) => {
        let mut parts = vec![self.print_expr(cond)];
        parts.extend(body.iter().map(|s| self.print_stmt(s)));
        parenthesize("if", &parts)
      },
      Stmt::Repeat(count, body) => {
        parenthesize("repeat", &[self.print_expr(count), self.print_stmt(body)])
      },
    }
  }

  pub fn print_expr(&self, expr: &Expr) -> String {
    match expr {
      Expr::Literal(value) => value.to_string(),
      Expr::Variable(name) => name.lexeme.clone(),
      Expr::Grouping(inner) => parenthesize("grouping", &[self.print_expr(inner)]),
      Expr::Unary(op, right) => parenthesize(&op.lexeme, &[self.print_expr(right)]),
      Expr::Binary(left, op, right) => {
        parenthesize(&op.lexeme, &[self.print_expr(left), self.print_expr(right)])
      },
      Expr::Starred(_op, inner) => parenthesize("starred", &[self.print_expr(inner)]),
      Expr::List(ListBody::Items(items)) => self.print_joined("list", items),
      Expr::List(ListBody::Spread(starred)) => self.print_expr(starred),
      Expr::Tuple(items) => self.print_joined("tuple", items),
      Expr::Dict(pairs) => {
        let joined = pairs
          .iter()
          .map(|kv| self.print_key_datum(kv))
          .collect::<Vec<_>>()
          .join(", ");
        parenthesize("dict", &[joined])
      },
      Expr::ExpressionList(items) => {
        let joined = items.iter().map(|e| self.print_expr(e)).collect::<Vec<_>>().join(" ");
        joined
      },
      Expr::Call(callee, _paren, args) => {
        let mut parts = vec![self.print_expr(callee)];
        parts.extend(args.iter().map(|a| self.print_expr(a)));
        parenthesize("call", &parts)
      },
      Expr::Conditional(then, cond, other) => {
        let mut parts = vec![self.print_expr(then), self.print_expr(cond)];
        if let Some(other) = other {
          parts.push(self.print_expr(other));
        }
        parenthesize("if", &parts)
      },
      Expr::Assign(name, _op, value) => {
        parenthesize("assign", &[name.lexeme.clone(), self.print_expr(value)])
      },
      Expr::MultiAssign(targets, _op, value) => {
        parenthesize("assign", &[self.print_expr(targets), self.print_expr(value)])
      },
      Expr::VariableIterator(prefix, iterator) => {
        format!("{}{}", prefix.lexeme, self.print_expr(iterator))
      },
      Expr::AssignIterator(iterator, _op, value) => {
        parenthesize("assign", &[self.print_expr(iterator), self.print_expr(value)])
      },
      Expr::AugmentedAssign(target, op, right) => {
        let name = format!("{}=", op.lexeme);
        parenthesize(&name, &[self.print_expr(target), self.print_expr(right)])
      },
      Expr::IteratorValue(token) => token.lexeme.clone(),
    }
  }

  fn print_joined(&self, name: &str, items: &[Expr]) -> String {
    let joined = items.iter().map(|e| self.print_expr(e)).collect::<Vec<_>>().join(", ");
    parenthesize(name, &[joined])
  }

  fn print_key_datum(&self, kv: &KeyDatum) -> String {
    format!("{}: {}", self.print_expr(&kv.key), self.print_expr(&kv.datum))
  }
}

impl Default for Printer {
  fn default() -> Self {
    Self::new()
  }
}

fn parenthesize(name: &str, parts: &[String]) -> String {
  let mut out = format!("({}", name);
  for part in parts {
    out.push(' ');
    out.push_str(part);
  }
  out.push(')');
  out
}
