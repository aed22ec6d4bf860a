use diagnostic::DiagnosticEngine;
use scanner::Scanner;

/// Scans `source` and returns the token count excluding the trailing EOF,
/// matching the `token_count` fixtures in the upstream test corpus.
fn token_count(source: &str) -> usize {
  let mut engine = DiagnosticEngine::new();
  let mut scanner = Scanner::new(source);
  let tokens = scanner.scan(&mut engine);
  assert!(!engine.has_errors(), "unexpected scan errors for {:?}", source);
  tokens.len() - 1
}

#[test]
fn empty_source_has_no_tokens() {
  assert_eq!(token_count(""), 0);
}

#[test]
fn a_lone_newline_has_no_tokens() {
  assert_eq!(token_count("\n"), 0);
}

#[test]
fn a_bare_integer_is_one_token() {
  assert_eq!(token_count("6"), 1);
}

#[test]
fn a_bare_float_is_one_token() {
  assert_eq!(token_count("5.25"), 1);
}

#[test]
fn a_binary_expression_is_three_tokens() {
  assert_eq!(token_count("1 + 2"), 3);
}

#[test]
fn a_grouped_expression_counts_its_parens() {
  assert_eq!(token_count("1 + (2 + 3)"), 7);
}

#[test]
fn a_dotted_identifier_scans_as_one_token() {
  assert_eq!(token_count("$.foo = 3"), 3);
}

#[test]
fn an_empty_list_literal_has_two_bracket_tokens_plus_the_target() {
  assert_eq!(token_count("a = []"), 4);
}

#[test]
fn a_line_comment_does_not_produce_tokens_of_its_own() {
  assert_eq!(
    token_count(
      "a = 1
# comment
b = 2
"
    ),
    8
  );
}

#[test]
fn a_dotted_iterator_prefix_scans_separately_from_its_bracket() {
  // "a." and "[" are two tokens, not one "a" + "." + "[".
  assert_eq!(
    token_count(
      "a={\"x\": 1, \"y\": 2, \"z\": 3}
a.[\"x\", \"y\"] = 3"
    ),
    24
  );
}

#[test]
fn starred_spread_inside_a_call_scans_the_starred_and_dotted_variable() {
  assert_eq!(token_count("a=foo(*bar.baz)"), 7);
}

#[test]
fn an_unrecognized_character_is_reported_and_scanning_continues() {
  let mut engine = DiagnosticEngine::new();
  let mut scanner = Scanner::new("a = @\nb = 1");
  let tokens = scanner.scan(&mut engine);
  assert!(engine.has_errors());
  // The EOF at the end is still produced despite the earlier bad character.
  assert_eq!(tokens.last().unwrap().lexeme, "\0");
}
