use indexmap::IndexMap;
use std::rc::Rc;

use crate::env::State;
use crate::error::RuntimeError;
use crate::subject::Subject;
use crate::value::Value;

/// Interpreter state made available to a builtin that opts in to reading
/// it, per spec.md §9's "builtin scope injection" note: every call gets an
/// explicit context instead of having `state`/`globals` spliced into a
/// dynamic-language closure.
pub struct CallContext<'a> {
  pub state: &'a mut State,
  pub subject: &'a mut dyn Subject,
}

/// A host-supplied callable. Builtins are injected by the embedder and are
/// read-only from scripts — they live in the bottom layer of `state`.
pub trait Builtin {
  fn call(&self, args: Vec<Value>, ctx: &mut CallContext) -> Result<Value, RuntimeError>;
}

impl<F> Builtin for F
where
  F: Fn(Vec<Value>, &mut CallContext) -> Result<Value, RuntimeError>,
{
  fn call(&self, args: Vec<Value>, ctx: &mut CallContext) -> Result<Value, RuntimeError> {
    self(args, ctx)
  }
}

/// The named table of host-injected callables passed into `run`.
/// `indexmap` keeps one ordered-map implementation in the crate rather than
/// a second `HashMap` alongside `Value::Map`'s own insertion-ordered store.
#[derive(Default, Clone)]
pub struct Builtins {
  entries: IndexMap<String, Rc<dyn Builtin>>,
}

impl Builtins {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&mut self, name: impl Into<String>, builtin: impl Builtin + 'static) -> &mut Self {
    self.entries.insert(name.into(), Rc::new(builtin));
    self
  }

  pub fn get(&self, name: &str) -> Option<&Rc<dyn Builtin>> {
    self.entries.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.entries.contains_key(name)
  }
}
