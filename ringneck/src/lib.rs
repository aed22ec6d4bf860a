//! The embedding façade: scan, parse and interpret a Ringneck program
//! against a caller-supplied subject in one call.

use diagnostic::diagnostic::Diagnostic;
use diagnostic::DiagnosticEngine;
use interpreter::{Builtins, Interpreter, RuntimeError, Subject, Value};
use logger::{LogType, Logger};
use parser::Parser;
use scanner::Scanner;

/// Ambient knobs for a single `run`; never language semantics, only how
/// much the run logs about its own phase transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
  pub verbose: bool,
}

impl RunOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn verbose(mut self, verbose: bool) -> Self {
    self.verbose = verbose;
    self
  }
}

/// Why a `run` produced no values: either the program never made it past
/// static checking, or it faulted partway through interpretation.
#[derive(Debug, Clone)]
pub enum RunError {
  ParseFailed(Vec<Diagnostic>),
  Runtime(RuntimeError),
}

impl std::fmt::Display for RunError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      RunError::ParseFailed(diagnostics) => write!(f, "{} diagnostic(s) reported", diagnostics.len()),
      RunError::Runtime(err) => write!(f, "{}", err),
    }
  }
}

impl std::error::Error for RunError {}

/// Runs `program` to completion against `subject`, returning one `Value`
/// per top-level statement. Scanning and parsing share a single
/// `DiagnosticEngine` local to this call, so concurrent embedders never
/// contend on a shared sink.
pub fn run(
  program: &str,
  subject: &mut dyn Subject,
  builtins: &Builtins,
  options: &RunOptions,
) -> Result<Vec<Value>, RunError> {
  let mut engine = DiagnosticEngine::new();

  if options.verbose {
    Logger::log(LogType::Info("scanning"), 0);
  }
  let mut scanner = Scanner::new(program);
  let tokens = scanner.scan(&mut engine);

  if options.verbose {
    Logger::log(LogType::Info("parsing"), 0);
  }
  let mut parser = Parser::new(tokens);
  let statements = parser.parse(&mut engine);

  if engine.has_errors() {
    return Err(RunError::ParseFailed(engine.get_diagnostics().to_vec()));
  }

  if options.verbose {
    Logger::log(LogType::Info("interpreting"), 0);
  }
  let mut interpreter = Interpreter::new();
  interpreter
    .run(&statements, subject, builtins)
    .map_err(RunError::Runtime)
}
