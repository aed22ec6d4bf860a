pub mod expr;
pub mod stmt;

pub use expr::{Expr, KeyDatum, ListBody, LiteralValue};
pub use stmt::Stmt;
