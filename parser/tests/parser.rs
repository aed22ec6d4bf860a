use diagnostic::DiagnosticEngine;
use parser::printer::Printer;
use parser::Parser;
use scanner::Scanner;

/// Scans, parses and prints `source`'s statements as S-expressions,
/// matching the `parse_result` fixtures in the upstream test corpus.
fn print_program(source: &str) -> Vec<String> {
  let mut engine = DiagnosticEngine::new();
  let mut scanner = Scanner::new(source);
  let tokens = scanner.scan(&mut engine);
  assert!(!engine.has_errors(), "unexpected scan errors for {:?}", source);

  let mut parser = Parser::new(tokens);
  let statements = parser.parse(&mut engine);
  assert!(!engine.has_errors(), "unexpected parse errors for {:?}", source);

  let printer = Printer::new();
  printer.print_program(&statements)
}

#[test]
fn empty_source_parses_to_no_statements() {
  assert!(print_program("").is_empty());
}

#[test]
fn integer_literal() {
  assert_eq!(print_program("6"), vec!["6"]);
}

#[test]
fn addition() {
  assert_eq!(print_program("1 + 2"), vec!["(+ 1 2)"]);
}

#[test]
fn grouping() {
  assert_eq!(print_program("1 + (2 + 3)"), vec!["(+ 1 (grouping (+ 2 3)))"]);
}

#[test]
fn equality() {
  assert_eq!(print_program("1 == 1"), vec!["(== 1 1)"]);
}

#[test]
fn simple_assignment() {
  assert_eq!(print_program("a = 1"), vec!["(assign a 1)"]);
}

#[test]
fn empty_list_literal() {
  assert_eq!(print_program("a = []"), vec!["(assign a (list ))"]);
}

#[test]
fn tuple_literal() {
  assert_eq!(print_program("a = (1, 2, 3)"), vec!["(assign a (tuple 1, 2, 3))"]);
}

#[test]
fn bare_comma_list_is_a_tuple() {
  assert_eq!(print_program("a = 1, 2, 3"), vec!["(assign a (tuple 1, 2, 3))"]);
}

#[test]
fn list_literal() {
  assert_eq!(print_program("a = [1, 2, 3]"), vec!["(assign a (list 1, 2, 3))"]);
}

#[test]
fn dict_literal() {
  assert_eq!(print_program(r#"a = {"foo": "bar"}"#), vec![r#"(assign a (dict foo: bar))"#]);
}

#[test]
fn subject_assignment() {
  assert_eq!(print_program("$.foo = 3"), vec!["(assign $.foo 3)"]);
}

#[test]
fn broadcast_assignment_on_a_state_variable() {
  assert_eq!(
    print_program("a={\"x\": 1, \"y\": 2, \"z\": 3}\na.[\"x\", \"y\"] = 3"),
    vec!["(assign a (dict x: 1, y: 2, z: 3))", "(assign a.(list x, y) 3)"]
  );
}

#[test]
fn conditional_expression() {
  assert_eq!(print_program("a = 7 if 1 < 2 else 9"), vec!["(assign a (if 7 (< 1 2) 9))"]);
}

#[test]
fn and_expression() {
  assert_eq!(print_program("1 and 2"), vec!["(and 1 2)"]);
}

#[test]
fn calls_with_multiple_arguments() {
  assert_eq!(
    print_program("a = foo(bar, b) + baz(zoo, c)"),
    vec!["(assign a (+ (call foo bar b) (call baz zoo c)))"]
  );
}

#[test]
fn calls_mixing_subject_and_state_arguments() {
  assert_eq!(
    print_program("$.a = foo_ooo(ba_ar, $.c) + some_function(a_name, $.d)"),
    vec!["(assign $.a (+ (call foo_ooo ba_ar $.c) (call some_function a_name $.d)))"]
  );
}

#[test]
fn a_line_comment_is_skipped_between_statements() {
  assert_eq!(
    print_program(
      "a = 1
# comment
b = 2
"
    ),
    vec!["(assign a 1)", "(assign b 2)"]
  );
}

#[test]
fn multi_assign_target() {
  assert_eq!(print_program("a, b = 1, 2"), vec!["(assign (tuple a, b) (tuple 1, 2))"]);
}

#[test]
fn starred_spread() {
  assert_eq!(print_program("a=[*(1, 2, 3)]"), vec!["(assign a (starred (tuple 1, 2, 3)))"]);
}

#[test]
fn tuple_destructure_from_a_variable() {
  assert_eq!(
    print_program("a=(1, 2)\nb, c = a"),
    vec!["(assign a (tuple 1, 2))", "(assign (tuple b, c) a)"]
  );
}

#[test]
fn augmented_assign() {
  assert_eq!(print_program("a=1\na-=1"), vec!["(assign a 1)", "(-= a 1)"]);
}

#[test]
fn nested_if_statements_with_a_trailing_else() {
  assert_eq!(
    print_program(
      "a=1
if a > 0:
b = 2
endif
if a > 4:
a=6
endif
if b < 3 and a < 5:
a=0
c=3
endif"
    ),
    vec![
      "(assign a 1)",
      "(if (> a 0) (assign b 2))",
      "(if (> a 4) (assign a 6))",
      "(if (and (< b 3) (< a 5)) (assign a 0) (assign c 3))"
    ]
  );
}

#[test]
fn repeat_statement() {
  assert_eq!(
    print_program("a=0\nrepeat a += 1 times 5"),
    vec!["(assign a 0)", "(repeat 5 (+= a 1))"]
  );
}

#[test]
fn call_with_a_starred_spread_argument() {
  assert_eq!(print_program("a=foo(*bar.baz)"), vec!["(assign a (call foo (starred bar.baz)))"]);
}
