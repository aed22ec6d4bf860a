pub mod builtins;
pub mod env;
pub mod error;
pub mod interpreter;
pub mod subject;
pub mod value;

pub use builtins::{Builtin, Builtins, CallContext};
pub use env::State;
pub use error::RuntimeError;
pub use interpreter::Interpreter;
pub use subject::{HostObject, HostSubject, MapSubject, Subject};
pub use value::{Value, ValueKey};
