use minphp_interpreter::{run_source, ErrorKind, InterpreterError};
use pretty_assertions::assert_eq;

fn output_of(source: &str) -> Result<String, InterpreterError> {
    let mut output = Vec::new();
    run_source(source, &mut output)?;
    Ok(String::from_utf8(output).unwrap())
}

// --- if / elseif / else ---

#[test]
fn test_if_else_true_branch() {
    let source = r#"<?php if (1 === 1) { echo "yes"; } else { echo "no"; }"#;
    assert_eq!(output_of(source).unwrap(), "yes");
}

#[test]
fn test_if_else_false_branch() {
    let source = r#"<?php if (1 === 2) { echo "yes"; } else { echo "no"; }"#;
    assert_eq!(output_of(source).unwrap(), "no");
}

#[test]
fn test_if_without_else() {
    assert_eq!(output_of(r#"<?php if (2 <= 1) { echo "x"; } echo "y";"#).unwrap(), "y");
}

#[test]
fn test_elseif_branch() {
    let source = r#"<?php $a = "x"; if (0 === 1) { echo "a"; } elseif (1 === 1) { echo "b"; } else { echo "c"; }"#;
    assert_eq!(output_of(source).unwrap(), "b");
}

#[test]
fn test_only_first_true_branch_runs() {
    let source = r#"<?php
        if (1 === 1) { echo "a"; }
        elseif (1 === 1) { echo "b"; }
        elseif (2 === 2) { echo "c"; }
        else { echo "d"; }"#;
    assert_eq!(output_of(source).unwrap(), "a");
}

#[test]
fn test_else_after_all_false() {
    let source = r#"<?php
        if (0 === 1) { echo "a"; }
        elseif (0 === 2) { echo "b"; }
        else { echo "c"; }"#;
    assert_eq!(output_of(source).unwrap(), "c");
}

#[test]
fn test_nested_if_in_skipped_branch() {
    let source = r#"<?php
        if (0 === 1) {
            if (1 === 1) { echo "inner"; } else { echo "other"; }
        } else {
            echo "outer";
        }"#;
    assert_eq!(output_of(source).unwrap(), "outer");
}

#[test]
fn test_skipped_bodies_are_parsed_not_evaluated() {
    // The else body refers to a variable that never exists and divides by zero.
    let source = r#"<?php if (1 === 1) { echo "ok"; } else { echo $nope; echo 1 % 0; } echo "!";"#;
    assert_eq!(output_of(source).unwrap(), "ok!");
}

#[test]
fn test_skipped_bodies_are_still_checked_for_syntax() {
    let err = output_of(r#"<?php if (0 === 1) { echo "x" } echo "y";"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn test_integer_conditions_use_truthiness() {
    let source = r#"<?php $i = 3; if ($i % 2) { echo "odd"; } else { echo "even"; }"#;
    assert_eq!(output_of(source).unwrap(), "odd");
    let source = r#"<?php $i = 4; if ($i % 2) { echo "odd"; } else { echo "even"; }"#;
    assert_eq!(output_of(source).unwrap(), "even");
}

#[test]
fn test_string_conditions_use_truthiness() {
    let source = r#"<?php
        if ("") { echo 1; }
        elseif ("0") { echo 2; }
        elseif ("no") { echo 3; }"#;
    assert_eq!(output_of(source).unwrap(), "3");
}

#[test]
fn test_for_loop_stops_on_a_falsy_condition() {
    let source = "<?php $n = 3; for ($i = 0; $n % 4; $n++) { echo $n; }";
    assert_eq!(output_of(source).unwrap(), "3");
}

// --- for ---

#[test]
fn test_for_counts() {
    let source = "<?php for ($i = 0; $i <= 2; $i++) { echo $i; } echo $i;";
    assert_eq!(output_of(source).unwrap(), "0123");
}

#[test]
fn test_for_with_false_initial_condition() {
    let source = r#"<?php for ($i = 5; $i <= 2; $i++) { echo "never"; } echo $i;"#;
    assert_eq!(output_of(source).unwrap(), "5");
}

#[test]
fn test_for_init_runs_once_and_update_once_per_iteration() {
    // $n counts init evaluations through the init expression itself.
    let source = r#"<?php
        $n = 0;
        $u = 0;
        for ($n++; $u <= 2; $u++) { echo $n; }
        echo $u;"#;
    assert_eq!(output_of(source).unwrap(), "1113");
}

#[test]
fn test_nested_for_loops() {
    let source = r#"<?php
        for ($i = 1; $i <= 2; $i++) {
            for ($j = 1; $j <= 2; $j++) {
                echo $i; echo $j; echo " ";
            }
        }"#;
    assert_eq!(output_of(source).unwrap(), "11 12 21 22 ");
}

#[test]
fn test_for_with_if_in_body() {
    let source = r#"<?php
        for ($i = 1; $i <= 6; $i++) {
            if ($i % 2 === 0) { echo $i; } else { echo "."; }
        }"#;
    assert_eq!(output_of(source).unwrap(), ".2.4.6");
}

#[test]
fn test_skipped_for_loop_does_not_iterate() {
    let source = r#"<?php
        if (0 === 1) {
            for ($k = 0; $k <= 1; $k++) { echo $k; }
        }
        echo "done";"#;
    assert_eq!(output_of(source).unwrap(), "done");
}

#[test]
fn test_fizzbuzz_style_chain() {
    let source = r#"<?php
        for ($i = 1; $i <= 15; $i++) {
            if ($i % 15 === 0) { echo "FizzBuzz"; }
            elseif ($i % 3 === 0) { echo "Fizz"; }
            elseif ($i % 5 === 0) { echo "Buzz"; }
            else { echo $i; }
            echo "\n";
        }"#;
    let expected = "1\n2\nFizz\n4\nBuzz\nFizz\n7\n8\nFizz\nBuzz\n11\nFizz\n13\n14\nFizzBuzz\n";
    assert_eq!(output_of(source).unwrap(), expected);
}
