use minphp_interpreter::ast::Environment;
use minphp_interpreter::{run_source, ErrorKind, InterpreterError};
use pretty_assertions::assert_eq;

fn run_capturing(source: &str) -> (String, Result<Environment, InterpreterError>) {
    let mut output = Vec::new();
    let result = run_source(source, &mut output);
    (String::from_utf8(output).unwrap(), result)
}

#[test]
fn test_undefined_variable_aborts_without_output() {
    let (output, result) = run_capturing("<?php echo $undefined;");
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnboundVariable);
    assert!(err.to_string().contains("undefined"));
    assert_eq!(err.position(), Some(2));
    assert_eq!(output, "");
}

#[test]
fn test_output_before_an_error_is_kept() {
    let (output, result) = run_capturing(r#"<?php echo "a"; echo $missing; echo "b";"#);
    assert!(result.is_err());
    assert_eq!(output, "a");
}

#[test]
fn test_lex_errors_surface_as_lex_kind() {
    let (output, result) = run_capturing("<?php echo 1; while");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Lex);
    // Tokenizing happens before anything runs.
    assert_eq!(output, "");
}

#[test]
fn test_truncated_program_fails_before_running() {
    let (output, result) = run_capturing("<?php echo 1; $x+");
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lex);
    assert_eq!(err.to_string(), "input ends inside `++` starting at byte 16");
    assert_eq!(output, "");

    let (_, result) = run_capturing("<?p");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Lex);
}

#[test]
fn test_unterminated_string() {
    let (_, result) = run_capturing("<?php echo \"abc;");
    let err = result.unwrap_err();
    assert!(matches!(err, InterpreterError::Lex(_)));
    assert_eq!(err.to_string(), "unterminated string literal starting at byte 11");
}

#[test]
fn test_missing_open_tag() {
    let (_, result) = run_capturing("echo 1;");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Syntax);
}

#[test]
fn test_missing_semicolon() {
    let (_, result) = run_capturing("<?php echo 1");
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.to_string(), "expected `;` at token 3, found end of input");
}

#[test]
fn test_unbalanced_braces() {
    let (_, result) = run_capturing("<?php if (1 === 1) { echo 1;");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Syntax);

    let (output, result) = run_capturing("<?php echo 1; }");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Syntax);
    assert_eq!(output, "1");
}

#[test]
fn test_assigning_to_a_literal() {
    let (_, result) = run_capturing("<?php 3 = 4;");
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert_eq!(
        err.to_string(),
        "`=` needs a variable on its left, found int at token 2"
    );
}

#[test]
fn test_incrementing_a_string() {
    let (_, result) = run_capturing("<?php $s = \"a\"; $s++;");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Type);
}

#[test]
fn test_else_without_if_is_rejected() {
    let (_, result) = run_capturing("<?php else { echo 1; }");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Syntax);
}
