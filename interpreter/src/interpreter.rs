use indexmap::IndexMap;
use scanner::token::{types::TokenType, Token};

use parser::ast::{Expr, KeyDatum, ListBody, LiteralValue, Stmt};

use crate::builtins::{Builtins, CallContext};
use crate::env::State;
use crate::error::RuntimeError;
use crate::subject::{value_get_path, value_set_path, Subject};
use crate::value::Value;

/// A tree-walking evaluator over `state` (a layered, builtins-backed
/// mapping) and a host-supplied `Subject`, per spec.md §4.4.
pub struct Interpreter {
  pub state: State,
}

impl Interpreter {
  pub fn new() -> Self {
    Self { state: State::new() }
  }

  /// Runs a parsed program to completion, returning one value per
  /// top-level statement. Most statements evaluate to `Nil`; pure
  /// expression statements return their value.
  pub fn run(
    &mut self,
    statements: &[Stmt],
    subject: &mut dyn Subject,
    builtins: &Builtins,
  ) -> Result<Vec<Value>, RuntimeError> {
    let mut results = Vec::with_capacity(statements.len());
    for stmt in statements {
      results.push(self.eval_stmt(stmt, subject, builtins)?);
    }
    Ok(results)
  }

  fn eval_stmt(
    &mut self,
    stmt: &Stmt,
    subject: &mut dyn Subject,
    builtins: &Builtins,
  ) -> Result<Value, RuntimeError> {
    match stmt {
      Stmt::Expression(expr) => self.eval_expr(expr, subject, builtins),
      Stmt::If(condition, body) => {
        if self.eval_expr(condition, subject, builtins)?.is_truthy() {
          for inner in body {
            self.eval_stmt(inner, subject, builtins)?;
          }
        }
        Ok(Value::Nil)
      },
      Stmt::Repeat(count, body) => {
        let count = self.eval_expr(count, subject, builtins)?;
        let count = match count {
          Value::Int(n) if n >= 0 => n as usize,
          Value::Float(n) if n >= 0.0 => n as usize,
          other => {
            return Err(RuntimeError::new(
              format!("repeat count must be a non-negative integer, found {}", other.type_name()),
              0,
              0,
            ))
          },
        };
        for _ in 0..count {
          self.eval_stmt(body, subject, builtins)?;
        }
        Ok(Value::Nil)
      },
    }
  }

  fn eval_expr(
    &mut self,
    expr: &Expr,
    subject: &mut dyn Subject,
    builtins: &Builtins,
  ) -> Result<Value, RuntimeError> {
    match expr {
      Expr::Literal(lit) => Ok(Self::eval_literal(lit)),
      Expr::Variable(token) => Ok(self.read_address(&token.lexeme, subject, builtins)),
      Expr::Grouping(inner) => self.eval_expr(inner, subject, builtins),
      Expr::Unary(_op, rhs) => self.eval_unary(rhs, subject, builtins),
      Expr::Binary(lhs, op, rhs) => self.eval_binary(lhs, op, rhs, subject, builtins),
      // A bare starred expression (outside a list/call spread position)
      // just yields the inner value; spreading is the enclosing form's job.
      Expr::Starred(_op, inner) => self.eval_expr(inner, subject, builtins),
      Expr::List(body) => self.eval_list(body, subject, builtins),
      Expr::Tuple(items) => {
        let values = items
          .iter()
          .map(|item| self.eval_expr(item, subject, builtins))
          .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Tuple(values.into()))
      },
      Expr::Dict(pairs) => self.eval_dict(pairs, subject, builtins),
      Expr::ExpressionList(items) => {
        let mut last = Value::Nil;
        for item in items {
          last = self.eval_expr(item, subject, builtins)?;
        }
        Ok(last)
      },
      Expr::Call(callee, paren, args) => self.eval_call(callee, paren, args, subject, builtins),
      Expr::Conditional(then_branch, condition, other) => {
        if self.eval_expr(condition, subject, builtins)?.is_truthy() {
          self.eval_expr(then_branch, subject, builtins)
        } else if let Some(other) = other {
          self.eval_expr(other, subject, builtins)
        } else {
          Ok(Value::Nil)
        }
      },
      Expr::Assign(name, op, value) => self.eval_assign(name, op, value, subject, builtins),
      Expr::MultiAssign(targets, op, value) => self.eval_multi_assign(targets, op, value, subject, builtins),
      Expr::VariableIterator(prefix, iterator) => {
        self.eval_variable_iterator_read(prefix, iterator, subject, builtins)
      },
      Expr::AssignIterator(iterator, op, value) => self.eval_assign_iterator(iterator, op, value, subject, builtins),
      Expr::AugmentedAssign(target, op, right) => self.eval_augmented_assign(target, op, right, subject, builtins),
      Expr::IteratorValue(_token) => Ok(self.state.get("%", builtins).unwrap_or(Value::Nil)),
    }
  }

  fn eval_literal(lit: &LiteralValue) -> Value {
    match lit {
      LiteralValue::Int(n) => Value::Int(*n),
      LiteralValue::Float(n) => Value::Float(*n),
      LiteralValue::Str(s) => Value::string(s.clone()),
      LiteralValue::Bool(b) => Value::Bool(*b),
    }
  }

  fn eval_unary(&mut self, rhs: &Expr, subject: &mut dyn Subject, builtins: &Builtins) -> Result<Value, RuntimeError> {
    let value = self.eval_expr(rhs, subject, builtins)?;
    match value {
      Value::Int(n) => Ok(Value::Int(-n)),
      Value::Float(n) => Ok(Value::Float(-n)),
      other => Err(RuntimeError::new(
        format!("unary '-' requires a number, found {}", other.type_name()),
        0,
        0,
      )),
    }
  }

  fn eval_binary(
    &mut self,
    lhs: &Expr,
    op: &Token,
    rhs: &Expr,
    subject: &mut dyn Subject,
    builtins: &Builtins,
  ) -> Result<Value, RuntimeError> {
    match op.kind {
      // `and`/`or` return one of the operand values, not a coerced bool,
      // and only evaluate the right side when it's actually needed.
      TokenType::And => {
        let left = self.eval_expr(lhs, subject, builtins)?;
        if !left.is_truthy() {
          Ok(left)
        } else {
          self.eval_expr(rhs, subject, builtins)
        }
      },
      TokenType::Or => {
        let left = self.eval_expr(lhs, subject, builtins)?;
        if left.is_truthy() {
          Ok(left)
        } else {
          self.eval_expr(rhs, subject, builtins)
        }
      },
      _ => {
        let left = self.eval_expr(lhs, subject, builtins)?;
        let right = self.eval_expr(rhs, subject, builtins)?;
        Self::apply_binary_op(op, left, right)
      },
    }
  }

  fn apply_binary_op(op: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match op.kind {
      TokenType::Plus => Self::eval_add(op, left, right),
      TokenType::Minus | TokenType::Star | TokenType::Slash | TokenType::Percent => {
        Self::eval_arith(op, left, right)
      },
      TokenType::EqualEqual => Ok(Value::Bool(left.is_equal(&right))),
      TokenType::BangEqual => Ok(Value::Bool(!left.is_equal(&right))),
      TokenType::Greater | TokenType::GreaterEqual | TokenType::Less | TokenType::LessEqual => {
        Self::eval_compare(op, left, right)
      },
      _ => Err(RuntimeError::at(op, format!("unknown binary operator '{}'", op.lexeme))),
    }
  }

  /// `Int op Int` stays `Int` for `+ - *`; `/` always produces a `Float`
  /// (true division); any operand pair containing a `Float` promotes the
  /// whole operation to `Float`.
  fn eval_arith(op: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (&left, &right) {
      (Value::Int(a), Value::Int(b)) => match op.kind {
        TokenType::Plus => Ok(Value::Int(a + b)),
        TokenType::Minus => Ok(Value::Int(a - b)),
        TokenType::Star => Ok(Value::Int(a * b)),
        TokenType::Slash => {
          if *b == 0 {
            return Err(RuntimeError::at(op, "division by zero"));
          }
          Ok(Value::Float(*a as f64 / *b as f64))
        },
        TokenType::Percent => {
          if *b == 0 {
            return Err(RuntimeError::at(op, "modulo by zero"));
          }
          Ok(Value::Int(a % b))
        },
        _ => unreachable!(),
      },
      (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
        let a = Self::as_f64(&left);
        let b = Self::as_f64(&right);
        match op.kind {
          TokenType::Plus => Ok(Value::Float(a + b)),
          TokenType::Minus => Ok(Value::Float(a - b)),
          TokenType::Star => Ok(Value::Float(a * b)),
          TokenType::Slash => {
            if b == 0.0 {
              return Err(RuntimeError::at(op, "division by zero"));
            }
            Ok(Value::Float(a / b))
          },
          TokenType::Percent => {
            if b == 0.0 {
              return Err(RuntimeError::at(op, "modulo by zero"));
            }
            Ok(Value::Float(a % b))
          },
          _ => unreachable!(),
        }
      },
      _ => Err(RuntimeError::at(
        op,
        format!(
          "arithmetic requires numbers, found {} and {}",
          left.type_name(),
          right.type_name()
        ),
      )),
    }
  }

  fn eval_add(op: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (left, right) {
      (Value::String(a), Value::String(b)) => Ok(Value::string(format!("{}{}", a, b))),
      (Value::String(a), Value::Int(n)) => Ok(Value::string(format!("{}{}", a, n))),
      (Value::String(a), Value::Float(n)) => Ok(Value::string(format!("{}{}", a, n))),
      (Value::Int(n), Value::String(b)) => Ok(Value::string(format!("{}{}", n, b))),
      (Value::Float(n), Value::String(b)) => Ok(Value::string(format!("{}{}", n, b))),
      (left, right) => Self::eval_arith(op, left, right),
    }
  }

  fn eval_compare(op: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    let ordering = match (&left, &right) {
      (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
        Self::as_f64(&left).partial_cmp(&Self::as_f64(&right))
      },
      (Value::String(a), Value::String(b)) => Some(a.as_ref().cmp(b.as_ref())),
      _ => {
        return Err(RuntimeError::at(
          op,
          format!(
            "comparison requires matching numeric or string operands, found {} and {}",
            left.type_name(),
            right.type_name()
          ),
        ))
      },
    };
    let ordering = ordering.ok_or_else(|| RuntimeError::at(op, "comparison produced no ordering"))?;
    let result = match op.kind {
      TokenType::Greater => ordering.is_gt(),
      TokenType::GreaterEqual => !ordering.is_lt(),
      TokenType::Less => ordering.is_lt(),
      TokenType::LessEqual => !ordering.is_gt(),
      _ => unreachable!(),
    };
    Ok(Value::Bool(result))
  }

  fn as_f64(value: &Value) -> f64 {
    match value {
      Value::Int(n) => *n as f64,
      Value::Float(n) => *n,
      _ => 0.0,
    }
  }

  fn eval_list(
    &mut self,
    body: &ListBody,
    subject: &mut dyn Subject,
    builtins: &Builtins,
  ) -> Result<Value, RuntimeError> {
    match body {
      ListBody::Items(items) => {
        let values = items
          .iter()
          .map(|item| self.eval_expr(item, subject, builtins))
          .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::list(values))
      },
      ListBody::Spread(starred) => {
        let (op, inner) = match starred.as_ref() {
          Expr::Starred(op, inner) => (op, inner.as_ref()),
          _ => unreachable!("ListBody::Spread always wraps a Starred expression"),
        };
        let iterable = self.eval_expr(inner, subject, builtins)?;
        let items = iterable.into_iterable().map_err(|msg| RuntimeError::at(op, msg))?;
        Ok(Value::list(items))
      },
    }
  }

  fn eval_dict(
    &mut self,
    pairs: &[KeyDatum],
    subject: &mut dyn Subject,
    builtins: &Builtins,
  ) -> Result<Value, RuntimeError> {
    let mut map = IndexMap::new();
    for pair in pairs {
      let key = self.eval_expr(&pair.key, subject, builtins)?;
      let datum = self.eval_expr(&pair.datum, subject, builtins)?;
      map.insert(key.as_key()?, datum);
    }
    Ok(Value::map(map))
  }

  fn eval_call(
    &mut self,
    callee: &Expr,
    paren: &Token,
    args: &[Expr],
    subject: &mut dyn Subject,
    builtins: &Builtins,
  ) -> Result<Value, RuntimeError> {
    let callee_value = self.eval_expr(callee, subject, builtins)?;
    let builtin = match callee_value {
      Value::Builtin(builtin) => builtin,
      other => return Err(RuntimeError::at(paren, format!("'{}' is not callable", other.type_name()))),
    };

    let arguments = match args {
      [Expr::Starred(op, inner)] => {
        let iterable = self.eval_expr(inner, subject, builtins)?;
        iterable.into_iterable().map_err(|msg| RuntimeError::at(op, msg))?
      },
      _ => args
        .iter()
        .map(|arg| self.eval_expr(arg, subject, builtins))
        .collect::<Result<Vec<_>, _>>()?,
    };

    let mut ctx = CallContext {
      state: &mut self.state,
      subject,
    };
    builtin.call(arguments, &mut ctx)
  }

  fn eval_assign(
    &mut self,
    name: &Token,
    op: &Token,
    value: &Expr,
    subject: &mut dyn Subject,
    builtins: &Builtins,
  ) -> Result<Value, RuntimeError> {
    let value = self.eval_expr(value, subject, builtins)?;
    if op.kind == TokenType::MaybeEqual {
      let current = self.read_address(&name.lexeme, subject, builtins);
      if !matches!(current, Value::Nil) {
        return Ok(Value::Nil);
      }
    }
    self.write_address(&name.lexeme, value, subject, builtins)?;
    Ok(Value::Nil)
  }

  fn eval_multi_assign(
    &mut self,
    targets: &Expr,
    op: &Token,
    value: &Expr,
    subject: &mut dyn Subject,
    builtins: &Builtins,
  ) -> Result<Value, RuntimeError> {
    let value = self.eval_expr(value, subject, builtins)?;
    let elements = match &value {
      Value::Tuple(items) => items.to_vec(),
      Value::List(items) => items.borrow().clone(),
      other => {
        return Err(RuntimeError::at(
          op,
          format!("multi-assignment value must be an ordered sequence, found {}", other.type_name()),
        ))
      },
    };

    let target_items: &[Expr] = match targets {
      Expr::Tuple(items) => items,
      Expr::List(ListBody::Items(items)) => items,
      _ => return Err(RuntimeError::at(op, "invalid multi-assignment target")),
    };

    if target_items.len() != elements.len() {
      return Err(RuntimeError::at(
        op,
        format!(
          "multi-assignment arity mismatch: {} targets, {} values",
          target_items.len(),
          elements.len()
        ),
      ));
    }

    for (target, element) in target_items.iter().zip(elements.into_iter()) {
      match target {
        Expr::Variable(token) => self.write_address(&token.lexeme, element, subject, builtins)?,
        _ => return Err(RuntimeError::at(op, "multi-assignment target must be a variable")),
      }
    }
    Ok(Value::Nil)
  }

  fn eval_variable_iterator_read(
    &mut self,
    prefix: &Token,
    iterator: &Expr,
    subject: &mut dyn Subject,
    builtins: &Builtins,
  ) -> Result<Value, RuntimeError> {
    let iterator_value = self.eval_expr(iterator, subject, builtins)?;
    let keys = iterator_value.into_iterable().map_err(|msg| RuntimeError::at(prefix, msg))?;
    let mut gathered = Vec::with_capacity(keys.len());
    for key in &keys {
      let address = format!("{}{}", prefix.lexeme, key);
      gathered.push(self.read_address(&address, subject, builtins));
    }
    Ok(Value::list(gathered))
  }

  /// Broadcasts `value` across `{prefix}{k}` for every `k` in the
  /// iterator, exposing the current key through `%` for the duration of
  /// the broadcast. `%` is removed once every key has been written.
  fn eval_assign_iterator(
    &mut self,
    iterator: &Expr,
    op: &Token,
    value: &Expr,
    subject: &mut dyn Subject,
    builtins: &Builtins,
  ) -> Result<Value, RuntimeError> {
    let (prefix, keys_expr) = match iterator {
      Expr::VariableIterator(prefix, keys) => (prefix, keys.as_ref()),
      _ => return Err(RuntimeError::at(op, "invalid broadcast assignment target")),
    };

    let iterator_value = self.eval_expr(keys_expr, subject, builtins)?;
    let keys = iterator_value.into_iterable().map_err(|msg| RuntimeError::at(prefix, msg))?;

    for key in keys {
      self.state.define("%", key.clone());
      let broadcast_value = self.eval_expr(value, subject, builtins)?;
      let address = format!("{}{}", prefix.lexeme, key);
      self.write_address(&address, broadcast_value, subject, builtins)?;
    }
    self.state.remove("%");
    Ok(Value::Nil)
  }

  fn eval_augmented_assign(
    &mut self,
    target: &Expr,
    op: &Token,
    right: &Expr,
    subject: &mut dyn Subject,
    builtins: &Builtins,
  ) -> Result<Value, RuntimeError> {
    let name = match target {
      Expr::Variable(token) => token,
      _ => return Err(RuntimeError::at(op, "invalid augmented-assignment target")),
    };
    let current = self.read_address(&name.lexeme, subject, builtins);
    let right = self.eval_expr(right, subject, builtins)?;
    let result = Self::apply_binary_op(op, current, right)?;
    self.write_address(&name.lexeme, result, subject, builtins)?;
    Ok(Value::Nil)
  }

  // --- variable binding and addressing (spec.md §4.5) ---

  fn read_address(&self, lexeme: &str, subject: &mut dyn Subject, builtins: &Builtins) -> Value {
    let (is_subject, segments) = split_address(lexeme);
    if is_subject {
      subject.get(&segments)
    } else {
      match segments.split_first() {
        None => Value::Nil,
        Some((name, rest)) => {
          let root = self.state.get(name, builtins).unwrap_or(Value::Nil);
          if rest.is_empty() {
            root
          } else {
            value_get_path(&root, rest)
          }
        },
      }
    }
  }

  fn write_address(
    &mut self,
    lexeme: &str,
    value: Value,
    subject: &mut dyn Subject,
    builtins: &Builtins,
  ) -> Result<(), RuntimeError> {
    let (is_subject, segments) = split_address(lexeme);
    if is_subject {
      subject.set(&segments, value)
    } else {
      match segments.split_first() {
        None => Err(RuntimeError::new("cannot assign to an empty address", 0, 0)),
        Some((name, [])) => {
          self.state.define(name.to_string(), value);
          Ok(())
        },
        Some((name, rest)) => {
          let root = self
            .state
            .get(name, builtins)
            .ok_or_else(|| RuntimeError::new(format!("undefined variable '{}'", name), 0, 0))?;
          value_set_path(&root, rest, value)
        },
      }
    }
  }
}

impl Default for Interpreter {
  fn default() -> Self {
    Self::new()
  }
}

/// Splits a dotted variable address into its target layer (`$`-prefixed =
/// subject, else `state`) and its path segments. `$.` alone (no further
/// segments) addresses the subject root.
fn split_address(lexeme: &str) -> (bool, Vec<&str>) {
  let is_subject = lexeme.starts_with('$');
  let mut segments: Vec<&str> = lexeme.split('.').filter(|s| !s.is_empty()).collect();
  if is_subject && segments.first() == Some(&"$") {
    segments.remove(0);
  }
  (is_subject, segments)
}
