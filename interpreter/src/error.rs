use thiserror::Error;

/// A single runtime failure, carrying the offending token's source position.
///
/// Unlike `DiagnosticEngine` (which accumulates static scanner/parser
/// diagnostics), a `RuntimeError` terminates the current `run` the moment it
/// is produced — there is exactly one per faulted run.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message} (line {line}, column {column})")]
pub struct RuntimeError {
  pub message: String,
  pub line: usize,
  pub column: usize,
}

impl RuntimeError {
  pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
    Self {
      message: message.into(),
      line,
      column,
    }
  }

  pub fn at(token: &scanner::token::Token, message: impl Into<String>) -> Self {
    Self::new(message, token.line, token.column)
  }

  /// A value was used as a map key but can't be hashed (list/tuple/map).
  /// Carries no token — raised deep inside value conversion, far from any
  /// particular source position.
  pub fn unhashable(type_name: &str) -> Self {
    Self::new(format!("unhashable type used as map key: {}", type_name), 0, 0)
  }
}
