use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::RuntimeError;
use crate::value::{Value, ValueKey};

/// The capability interface spec.md §9 asks for: `{get(path), set(path,
/// value)}`, reachable either as a dynamic mapping or as a host-defined
/// structured record. Segments are addressed left-to-right; the interpreter
/// never creates missing intermediate segments on a write.
pub trait Subject {
  fn get(&self, path: &[&str]) -> Value;
  fn set(&mut self, path: &[&str], value: Value) -> Result<(), RuntimeError>;
}

/// A plain insertion-ordered mapping subject — keys become addressable
/// segments directly.
#[derive(Debug, Clone, Default)]
pub struct MapSubject {
  root: Value,
}

impl MapSubject {
  pub fn new() -> Self {
    Self {
      root: Value::map(IndexMap::new()),
    }
  }

  pub fn from_map(map: IndexMap<ValueKey, Value>) -> Self {
    Self { root: Value::map(map) }
  }

  pub fn into_value(self) -> Value {
    self.root
  }
}

impl Subject for MapSubject {
  fn get(&self, path: &[&str]) -> Value {
    value_get_path(&self.root, path)
  }

  fn set(&mut self, path: &[&str], value: Value) -> Result<(), RuntimeError> {
    if path.is_empty() {
      return Err(RuntimeError::new("cannot assign to an empty address", 0, 0));
    }
    value_set_path(&self.root, path, value)
  }
}

/// Named-attribute access on a host-defined structured record, for
/// embedders who pass a Rust struct instead of a bare mapping.
pub trait HostObject {
  fn attr(&self, name: &str) -> Option<Value>;
  fn set_attr(&mut self, name: &str, value: Value) -> Result<(), RuntimeError>;
}

pub struct HostSubject {
  inner: Box<dyn HostObject>,
}

impl HostSubject {
  pub fn new(inner: Box<dyn HostObject>) -> Self {
    Self { inner }
  }
}

impl Subject for HostSubject {
  fn get(&self, path: &[&str]) -> Value {
    match path.split_first() {
      None => Value::Nil,
      Some((first, rest)) => match self.inner.attr(first) {
        Some(value) => value_get_path(&value, rest),
        None => Value::Nil,
      },
    }
  }

  fn set(&mut self, path: &[&str], value: Value) -> Result<(), RuntimeError> {
    match path.split_first() {
      None => Err(RuntimeError::new("cannot assign to an empty address", 0, 0)),
      Some((first, [])) => self.inner.set_attr(first, value),
      Some((first, rest)) => match self.inner.attr(first) {
        Some(nested) => value_set_path(&nested, rest, value),
        None => Err(RuntimeError::new(
          format!("address segment '{}' does not exist", first),
          0,
          0,
        )),
      },
    }
  }
}

/// Walks a nested `Value::Map` chain for a read; returns `Nil` the moment a
/// segment is missing or the node isn't a mapping, per spec.md §4.5 point 3.
pub(crate) fn value_get_path(value: &Value, path: &[&str]) -> Value {
  match path.split_first() {
    None => value.clone(),
    Some((first, rest)) => match value {
      Value::Map(map) => match map.borrow().get(&string_key(first)) {
        Some(next) => value_get_path(next, rest),
        None => Value::Nil,
      },
      _ => Value::Nil,
    },
  }
}

/// Walks to the penultimate node and sets the final segment. The target
/// path must already exist — this never creates intermediate mappings.
pub(crate) fn value_set_path(value: &Value, path: &[&str], new_value: Value) -> Result<(), RuntimeError> {
  match path.split_first() {
    None => Err(RuntimeError::new("cannot assign to an empty address", 0, 0)),
    Some((last, [])) => match value {
      Value::Map(map) => {
        map.borrow_mut().insert(string_key(last), new_value);
        Ok(())
      },
      other => Err(RuntimeError::new(
        format!("cannot assign '{}' on a {} node", last, other.type_name()),
        0,
        0,
      )),
    },
    Some((first, rest)) => match value {
      Value::Map(map) => {
        let next = map.borrow().get(&string_key(first)).cloned();
        match next {
          Some(next_value) => value_set_path(&next_value, rest, new_value),
          None => Err(RuntimeError::new(
            format!("address segment '{}' does not exist", first),
            0,
            0,
          )),
        }
      },
      other => Err(RuntimeError::new(
        format!("address segment '{}' does not exist on a {} node", first, other.type_name()),
        0,
        0,
      )),
    },
  }
}

fn string_key(segment: &str) -> ValueKey {
  ValueKey::Str(Rc::from(segment))
}
