use interpreter::{Builtins, MapSubject, Subject, Value};
use ringneck::{run, RunError, RunOptions};

#[test]
fn runs_a_program_and_returns_one_value_per_statement() {
  let mut subject = MapSubject::new();
  let builtins = Builtins::new();
  let values = run("1 + 2\n3 * 4", &mut subject, &builtins, &RunOptions::new()).unwrap();
  assert_eq!(values, vec![Value::Int(3), Value::Int(12)]);
}

#[test]
fn writes_flow_through_to_the_subject() {
  let mut subject = MapSubject::new();
  let builtins = Builtins::new();
  run("$.foo = 3", &mut subject, &builtins, &RunOptions::new()).unwrap();
  assert_eq!(subject.get(&["foo"]), Value::Int(3));
}

#[test]
fn a_scan_or_parse_error_short_circuits_before_interpretation() {
  let mut subject = MapSubject::new();
  let builtins = Builtins::new();
  let err = run("a = @", &mut subject, &builtins, &RunOptions::new()).unwrap_err();
  assert!(matches!(err, RunError::ParseFailed(_)));
}

#[test]
fn a_runtime_fault_surfaces_as_a_distinct_error_variant() {
  let mut subject = MapSubject::new();
  let builtins = Builtins::new();
  let err = run("1 / 0", &mut subject, &builtins, &RunOptions::new()).unwrap_err();
  assert!(matches!(err, RunError::Runtime(_)));
}
