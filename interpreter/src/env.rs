use std::collections::HashMap;

use crate::builtins::Builtins;
use crate::value::Value;

/// The layered, builtins-backed mapping spec.md calls `state`:
/// `[builtins] -> [scope]`. `scope` is the single mutable layer scripts
/// write into; `builtins` sits underneath as a read-only fallback, looked
/// up by bare identifier when a name isn't (yet) bound in `scope`.
///
/// Ringneck has no user-defined functions or nested lexical scopes, so
/// unlike the teacher's `Env::enclosing` chain this is exactly two layers,
/// not an arbitrary-depth chain.
#[derive(Debug, Clone, Default)]
pub struct State {
  scope: HashMap<String, Value>,
}

impl State {
  pub fn new() -> Self {
    Self {
      scope: HashMap::new(),
    }
  }

  pub fn get(&self, name: &str, builtins: &Builtins) -> Option<Value> {
    if let Some(value) = self.scope.get(name) {
      return Some(value.clone());
    }
    builtins.get(name).map(|b| Value::Builtin(b.clone()))
  }

  pub fn define(&mut self, name: impl Into<String>, value: Value) {
    self.scope.insert(name.into(), value);
  }

  pub fn remove(&mut self, name: &str) {
    self.scope.remove(name);
  }

  pub fn contains(&self, name: &str) -> bool {
    self.scope.contains_key(name)
  }
}
