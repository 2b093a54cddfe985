// Parameterized end-to-end script tests using test-case.

use minth::runtime::built_ins::register_builtin_words;
use minth::runtime::data_structures::value::Value;
use minth::runtime::error::Result;
use minth::runtime::interpreter::minth_interpreter::MinthInterpreter;
use minth::runtime::interpreter::{CodeManagement, InterpreterStack};
use test_case::test_case;

/// Run a script supplied as one source line per slice entry against an initial stack, returning
/// the final stack from bottom to top.
fn eval_and_stack(lines: &[&str], init_stack: &[i64]) -> Result<Vec<Value>> {
    let mut interpreter = MinthInterpreter::new();

    register_builtin_words(&mut interpreter);

    for &value in init_stack {
        interpreter.push(Value::from(value));
    }

    interpreter.process_source("<test>", &lines.join("\n"))?;

    Ok(interpreter.stack().clone())
}

#[test_case(&["0"], &[], &[0]; "zero")]
#[test_case(&["42"], &[], &[42]; "number")]
#[test_case(&["5", "3", "SUBTRACT"], &[], &[2]; "subtract")]
#[test_case(&["SUBTRACT"], &[3, 5], &[-2]; "subtract from stack")]
#[test_case(&["7", "2", "MOD"], &[], &[1]; "simple mod")]
#[test_case(&["13", "5", "MOD"], &[], &[3]; "mod with larger operands")]
#[test_case(&["DUP"], &[2], &[2, 2]; "dup")]
#[test_case(&["SWAP"], &[1, 2], &[2, 1]; "swap")]
#[test_case(&["ROT"], &[1, 2, 3], &[2, 3, 1]; "rot")]
#[test_case(&["ROT", "ROT", "ROT"], &[1, 2, 3], &[1, 2, 3]; "triple rot restores the stack")]
#[test_case(&["3", "TIMES", "DUP", "/TIMES"], &[2], &[2, 2, 2, 2]; "times duplicates")]
#[test_case(&["0", "TIMES", "DUP", "/TIMES"], &[7], &[7]; "times zero")]
#[test_case(&["2", "TIMES", "1", "SUBTRACT", "/TIMES"], &[9], &[7]; "times subtracts")]
#[test_case(&["2", "2", "=", "IF", "10", "THEN"], &[], &[10]; "if true")]
#[test_case(&["2", "3", "=", "IF", "10", "THEN"], &[], &[]; "if false without else")]
#[test_case(&["2", "3", "=", "IF", "10", "ELSE", "20", "THEN"], &[], &[20]; "if false with else")]
#[test_case(&["2", "2", "=", "IF", "10", "ELSE", "20", "THEN"], &[], &[10]; "if true with else")]
#[test_case(&["PROCEDURE COPY", "DUP", "/PROCEDURE", "4", "COPY"], &[], &[4, 4]; "procedure call")]
#[test_case(&["PROCEDURE NINE", "9", "/PROCEDURE", "NINE", "NINE"], &[], &[9, 9]; "procedure called twice")]
fn script_leaves_expected_stack(lines: &[&str], init_stack: &[i64], expected: &[i64]) {
    let result = eval_and_stack(lines, init_stack).unwrap();
    let expected: Vec<Value> = expected.iter().map(|&value| Value::from(value)).collect();

    assert_eq!(result, expected);
}

#[test_case(&["3", "3", "="], &[], true; "equal numbers")]
#[test_case(&["3", "4", "="], &[], false; "unequal numbers")]
#[test_case(&["HELLO", "HELLO", "="], &[], true; "equal literals")]
#[test_case(&["HELLO", "WORLD", "="], &[], false; "unequal literals")]
fn script_leaves_expected_flag(lines: &[&str], init_stack: &[i64], expected: bool) {
    let result = eval_and_stack(lines, init_stack).unwrap();

    assert_eq!(result, vec![Value::Bool(expected)]);
}

#[test_case(&["DUP"], &[]; "dup underflow")]
#[test_case(&["SWAP"], &[1]; "swap underflow")]
#[test_case(&["ROT"], &[1, 2]; "rot underflow")]
#[test_case(&["SUBTRACT"], &[1]; "subtract underflow")]
#[test_case(&["MOD"], &[1]; "mod underflow")]
#[test_case(&["="], &[1]; "equal underflow")]
fn starved_words_underflow(lines: &[&str], init_stack: &[i64]) {
    let error = eval_and_stack(lines, init_stack).unwrap_err();

    assert!(error.error().contains("underflow"));
}
