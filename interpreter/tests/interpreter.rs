use diagnostic::DiagnosticEngine;
use indexmap::IndexMap;
use interpreter::{Builtins, Interpreter, MapSubject, RuntimeError, Subject, Value, ValueKey};
use parser::Parser;
use scanner::Scanner;

/// Scans, parses and interprets `source` against a fresh interpreter and the
/// given subject, panicking if scanning or parsing reports any diagnostic.
fn run(source: &str, subject: &mut dyn Subject) -> Result<Vec<Value>, RuntimeError> {
  let mut engine = DiagnosticEngine::new();

  let mut scanner = Scanner::new(source);
  let tokens = scanner.scan(&mut engine);
  assert!(!engine.has_errors(), "unexpected scan errors for {:?}", source);

  let mut parser = Parser::new(tokens);
  let statements = parser.parse(&mut engine);
  assert!(!engine.has_errors(), "unexpected parse errors for {:?}", source);

  let mut interpreter = Interpreter::new();
  let builtins = Builtins::new();
  interpreter.run(&statements, subject, &builtins)
}

fn run_with_state(source: &str) -> (Result<Vec<Value>, RuntimeError>, Interpreter) {
  let mut engine = DiagnosticEngine::new();
  let mut scanner = Scanner::new(source);
  let tokens = scanner.scan(&mut engine);
  assert!(!engine.has_errors(), "unexpected scan errors for {:?}", source);

  let mut parser = Parser::new(tokens);
  let statements = parser.parse(&mut engine);
  assert!(!engine.has_errors(), "unexpected parse errors for {:?}", source);

  let mut interpreter = Interpreter::new();
  let builtins = Builtins::new();
  let mut subject = MapSubject::new();
  let result = interpreter.run(&statements, &mut subject, &builtins);
  (result, interpreter)
}

fn state_of(interpreter: &Interpreter, name: &str) -> Value {
  interpreter.state.get(name, &Builtins::new()).unwrap_or(Value::Nil)
}

#[test]
fn integer_literal() {
  let mut subject = MapSubject::new();
  let results = run("6", &mut subject).unwrap();
  assert_eq!(results, vec![Value::Int(6)]);
}

#[test]
fn addition() {
  let mut subject = MapSubject::new();
  let results = run("1 + 2", &mut subject).unwrap();
  assert_eq!(results, vec![Value::Int(3)]);
}

#[test]
fn subtraction() {
  let mut subject = MapSubject::new();
  let results = run("1 - 2", &mut subject).unwrap();
  assert_eq!(results, vec![Value::Int(-1)]);
}

#[test]
fn division_always_promotes_to_float() {
  let mut subject = MapSubject::new();
  let results = run("6 / 3", &mut subject).unwrap();
  assert_eq!(results, vec![Value::Float(2.0)]);
}

#[test]
fn multiplication() {
  let mut subject = MapSubject::new();
  let results = run("3 * 2", &mut subject).unwrap();
  assert_eq!(results, vec![Value::Int(6)]);
}

#[test]
fn equality() {
  let mut subject = MapSubject::new();
  let results = run("1 == 1", &mut subject).unwrap();
  assert_eq!(results, vec![Value::Bool(true)]);
}

#[test]
fn comparisons() {
  let (result, interpreter) = run_with_state("a = 5 < 4\nb = 5 < 5\nc = 5 < 6");
  result.unwrap();
  assert_eq!(state_of(&interpreter, "a"), Value::Bool(false));
  assert_eq!(state_of(&interpreter, "b"), Value::Bool(false));
  assert_eq!(state_of(&interpreter, "c"), Value::Bool(true));
}

#[test]
fn simple_assignment() {
  let (result, interpreter) = run_with_state("a = 1");
  result.unwrap();
  assert_eq!(state_of(&interpreter, "a"), Value::Int(1));
}

#[test]
fn empty_list_assignment() {
  let (result, interpreter) = run_with_state("a = []");
  result.unwrap();
  assert_eq!(state_of(&interpreter, "a"), Value::list(vec![]));
}

#[test]
fn tuple_literal_assignment() {
  let (result, interpreter) = run_with_state("a = (1, 2, 3)");
  result.unwrap();
  assert_eq!(
    state_of(&interpreter, "a"),
    Value::Tuple(vec![Value::Int(1), Value::Int(2), Value::Int(3)].into())
  );
}

#[test]
fn bare_comma_list_builds_a_tuple() {
  let (result, interpreter) = run_with_state("a = 1, 2, 3");
  result.unwrap();
  assert_eq!(
    state_of(&interpreter, "a"),
    Value::Tuple(vec![Value::Int(1), Value::Int(2), Value::Int(3)].into())
  );
}

#[test]
fn dictionary_literal_assignment() {
  let (result, interpreter) = run_with_state(r#"a = {"foo": "bar"}"#);
  result.unwrap();
  let mut expected = IndexMap::new();
  expected.insert(ValueKey::Str("foo".into()), Value::string("bar"));
  assert_eq!(state_of(&interpreter, "a"), Value::map(expected));
}

#[test]
fn conditional_expression() {
  let (result, interpreter) = run_with_state("a = 7 if 1 < 2 else 9");
  result.unwrap();
  assert_eq!(state_of(&interpreter, "a"), Value::Int(7));
}

#[test]
fn and_returns_the_right_operand_when_left_is_truthy() {
  let mut subject = MapSubject::new();
  let results = run("1 and 2", &mut subject).unwrap();
  assert_eq!(results, vec![Value::Int(2)]);
}

#[test]
fn and_short_circuits_on_a_falsy_left_operand() {
  let mut subject = MapSubject::new();
  let results = run("0 and 2", &mut subject).unwrap();
  assert_eq!(results, vec![Value::Int(0)]);
}

#[test]
fn maybe_assign_only_fills_in_unset_variables() {
  let (result, interpreter) = run_with_state("a = 1\nb ?= 2\na ?= 3");
  result.unwrap();
  assert_eq!(state_of(&interpreter, "a"), Value::Int(1));
  assert_eq!(state_of(&interpreter, "b"), Value::Int(2));
}

#[test]
fn multi_assign_destructures_a_tuple_literal() {
  let (result, interpreter) = run_with_state("a, b = 1, 2");
  result.unwrap();
  assert_eq!(state_of(&interpreter, "a"), Value::Int(1));
  assert_eq!(state_of(&interpreter, "b"), Value::Int(2));
}

#[test]
fn multi_assign_destructures_a_variable_holding_a_tuple() {
  let (result, interpreter) = run_with_state("a=(1, 2)\nb, c = a");
  result.unwrap();
  assert_eq!(state_of(&interpreter, "b"), Value::Int(1));
  assert_eq!(state_of(&interpreter, "c"), Value::Int(2));
}

#[test]
fn multi_assign_rejects_an_arity_mismatch() {
  let (result, _interpreter) = run_with_state("a, b = 1, 2, 3");
  assert!(result.is_err());
}

#[test]
fn starred_spread_inside_a_list_literal() {
  let (result, interpreter) = run_with_state("a=[*(1, 2, 3)]");
  result.unwrap();
  assert_eq!(
    state_of(&interpreter, "a"),
    Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
  );
}

#[test]
fn augmented_assign_reuses_the_bare_operator() {
  let (result, interpreter) = run_with_state("a=1\na-=1");
  result.unwrap();
  assert_eq!(state_of(&interpreter, "a"), Value::Int(0));
}

#[test]
fn repeat_runs_its_body_a_fixed_number_of_times() {
  let (result, interpreter) = run_with_state("a=0\nrepeat a += 1 times 5");
  result.unwrap();
  assert_eq!(state_of(&interpreter, "a"), Value::Int(5));
}

#[test]
fn if_statement_only_runs_its_body_when_truthy() {
  let (result, interpreter) = run_with_state("a = 1\nif a == 1:\n  a = 2\nendif");
  result.unwrap();
  assert_eq!(state_of(&interpreter, "a"), Value::Int(2));
}

#[test]
fn subject_write_at_the_root() {
  let mut subject = MapSubject::new();
  run("$.foo = 3", &mut subject).unwrap();
  assert_eq!(subject.get(&["foo"]), Value::Int(3));
}

#[test]
fn broadcast_assignment_writes_every_key_on_a_state_variable() {
  let (result, interpreter) =
    run_with_state(r#"a={"x": 1, "y": 2, "z": 3}
a.["x", "y"] = 3"#);
  result.unwrap();
  let mut expected = IndexMap::new();
  expected.insert(ValueKey::Str("x".into()), Value::Int(3));
  expected.insert(ValueKey::Str("y".into()), Value::Int(3));
  expected.insert(ValueKey::Str("z".into()), Value::Int(3));
  assert_eq!(state_of(&interpreter, "a"), Value::map(expected));
}

#[test]
fn broadcast_assignment_on_the_subject_exposes_the_current_key_as_percent() {
  let mut subject = MapSubject::new();
  run(r#"$.["a", "b", "c"] = %"#, &mut subject).unwrap();
  assert_eq!(subject.get(&["a"]), Value::string("a"));
  assert_eq!(subject.get(&["b"]), Value::string("b"));
  assert_eq!(subject.get(&["c"]), Value::string("c"));
}

#[test]
fn percent_is_not_bound_outside_a_broadcast_assignment() {
  let (result, interpreter) = run_with_state("a = %");
  result.unwrap();
  assert_eq!(state_of(&interpreter, "a"), Value::Nil);
}

#[test]
fn division_by_zero_is_a_runtime_error() {
  let mut subject = MapSubject::new();
  let err = run("1 / 0", &mut subject).unwrap_err();
  assert!(err.message.contains("division by zero"));
}

#[test]
fn arithmetic_on_an_undefined_variable_is_a_runtime_error() {
  let mut subject = MapSubject::new();
  let err = run("1 + undefined_name", &mut subject).unwrap_err();
  assert!(err.message.contains("arithmetic requires numbers"));
}

#[test]
fn a_list_cannot_be_used_as_a_map_key() {
  let mut subject = MapSubject::new();
  let err = run("a = {[1]: 2}", &mut subject).unwrap_err();
  assert!(err.message.contains("unhashable"));
}

#[test]
fn calling_a_non_builtin_value_is_a_runtime_error() {
  let mut subject = MapSubject::new();
  let err = run("a = 1\na()", &mut subject).unwrap_err();
  assert!(err.message.contains("not callable"));
}
