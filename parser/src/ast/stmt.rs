use crate::ast::expr::Expr;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
  Expression(Expr),
  /// No else branch — see the grammar in the parser module.
  If(Expr, Vec<Stmt>),
  Repeat(Expr, Box<Stmt>),
}
