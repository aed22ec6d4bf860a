use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::builtins::Builtin;
use crate::error::RuntimeError;

/// The dynamic value domain Ringneck programs operate on.
///
/// Lists and maps are `Rc<RefCell<_>>` so a broadcast assignment and a plain
/// nested write share the same underlying storage a dynamically typed host
/// object would give for free.
#[derive(Clone)]
pub enum Value {
  Nil,
  Bool(bool),
  Int(i64),
  Float(f64),
  String(Rc<str>),
  List(Rc<RefCell<Vec<Value>>>),
  Tuple(Rc<[Value]>),
  Map(Rc<RefCell<IndexMap<ValueKey, Value>>>),
  Builtin(Rc<dyn Builtin>),
}

impl Value {
  pub fn string(s: impl Into<Rc<str>>) -> Self {
    Value::String(s.into())
  }

  pub fn list(items: Vec<Value>) -> Self {
    Value::List(Rc::new(RefCell::new(items)))
  }

  pub fn map(pairs: IndexMap<ValueKey, Value>) -> Self {
    Value::Map(Rc::new(RefCell::new(pairs)))
  }

  /// Ringneck truthiness: `Nil`, `false`, zero numbers and empty containers
  /// are falsy; everything else is truthy.
  pub fn is_truthy(&self) -> bool {
    match self {
      Value::Nil => false,
      Value::Bool(b) => *b,
      Value::Int(n) => *n != 0,
      Value::Float(n) => *n != 0.0,
      Value::String(s) => !s.is_empty(),
      Value::List(items) => !items.borrow().is_empty(),
      Value::Tuple(items) => !items.is_empty(),
      Value::Map(map) => !map.borrow().is_empty(),
      Value::Builtin(_) => true,
    }
  }

  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Nil => "nil",
      Value::Bool(_) => "bool",
      Value::Int(_) => "int",
      Value::Float(_) => "float",
      Value::String(_) => "string",
      Value::List(_) => "list",
      Value::Tuple(_) => "tuple",
      Value::Map(_) => "map",
      Value::Builtin(_) => "builtin",
    }
  }

  pub fn is_equal(&self, other: &Value) -> bool {
    match (self, other) {
      (Value::Nil, Value::Nil) => true,
      (Value::Bool(a), Value::Bool(b)) => a == b,
      (Value::Int(a), Value::Int(b)) => a == b,
      (Value::Float(a), Value::Float(b)) => a == b,
      (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
      (Value::String(a), Value::String(b)) => a == b,
      (Value::List(a), Value::List(b)) => {
        let a = a.borrow();
        let b = b.borrow();
        a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.is_equal(y))
      },
      (Value::Tuple(a), Value::Tuple(b)) => {
        a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.is_equal(y))
      },
      (Value::Map(a), Value::Map(b)) => {
        let a = a.borrow();
        let b = b.borrow();
        a.len() == b.len()
          && a
            .iter()
            .all(|(k, v)| b.get(k).map(|other| other.is_equal(v)).unwrap_or(false))
      },
      (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(a, b),
      _ => false,
    }
  }

  /// Materializes an iterable value into its element sequence. Used by
  /// starred-list spreads and broadcast-assignment iterators.
  pub fn into_iterable(self) -> Result<Vec<Value>, &'static str> {
    match self {
      Value::List(items) => Ok(items.borrow().clone()),
      Value::Tuple(items) => Ok(items.to_vec()),
      Value::Map(map) => Ok(map.borrow().keys().map(ValueKey::to_value).collect()),
      Value::String(s) => Ok(s.chars().map(|c| Value::string(c.to_string())).collect()),
      _ => Err("value is not iterable"),
    }
  }

  pub fn as_key(&self) -> Result<ValueKey, RuntimeError> {
    ValueKey::try_from(self)
  }
}

impl PartialEq for Value {
  fn eq(&self, other: &Self) -> bool {
    self.is_equal(other)
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self)
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Nil => write!(f, "nil"),
      Value::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
      Value::Int(n) => write!(f, "{}", n),
      Value::Float(n) => write!(f, "{}", n),
      Value::String(s) => write!(f, "{}", s),
      Value::List(items) => {
        let items = items.borrow();
        write!(f, "[{}]", join(items.iter()))
      },
      Value::Tuple(items) => write!(f, "({})", join(items.iter())),
      Value::Map(map) => {
        let map = map.borrow();
        let body = map
          .iter()
          .map(|(k, v)| format!("{}: {}", k.to_value(), v))
          .collect::<Vec<_>>()
          .join(", ");
        write!(f, "{{{}}}", body)
      },
      Value::Builtin(_) => write!(f, "<builtin>"),
    }
  }
}

fn join<'a>(values: impl Iterator<Item = &'a Value>) -> String {
  values.map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

/// The hashable subset of `Value` usable as a map key. Lists, tuples and
/// maps are unhashable containers, mirrored from the same restriction on
/// Python dict keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
  Bool(bool),
  Int(i64),
  /// Stored as bits so the key type can derive `Eq`/`Hash`.
  FloatBits(u64),
  Str(Rc<str>),
}

impl ValueKey {
  pub fn to_value(&self) -> Value {
    match self {
      ValueKey::Bool(b) => Value::Bool(*b),
      ValueKey::Int(n) => Value::Int(*n),
      ValueKey::FloatBits(bits) => Value::Float(f64::from_bits(*bits)),
      ValueKey::Str(s) => Value::String(s.clone()),
    }
  }
}

impl fmt::Display for ValueKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.to_value())
  }
}

impl TryFrom<&Value> for ValueKey {
  type Error = RuntimeError;

  fn try_from(value: &Value) -> Result<Self, Self::Error> {
    match value {
      Value::Bool(b) => Ok(ValueKey::Bool(*b)),
      Value::Int(n) => Ok(ValueKey::Int(*n)),
      Value::Float(n) => Ok(ValueKey::FloatBits(n.to_bits())),
      Value::String(s) => Ok(ValueKey::Str(s.clone())),
      other => Err(RuntimeError::unhashable(other.type_name())),
    }
  }
}
