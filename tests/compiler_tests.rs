use minth::lang::code::{Block, Op};
use minth::lang::compilation::compile_tokens;
use minth::lang::tokenizing::tokenize_from_source;
use minth::runtime::built_ins::register_builtin_words;
use minth::runtime::error::Result;
use minth::runtime::interpreter::ProcedureManagement;
use minth::runtime::interpreter::minth_interpreter::MinthInterpreter;

/// Compile a script supplied as one source line per slice entry, returning the session used for
/// the compile alongside the compiled block.
fn compile_lines(lines: &[&str]) -> Result<(MinthInterpreter, Block)> {
    let mut interpreter = MinthInterpreter::new();

    register_builtin_words(&mut interpreter);

    let tokens = tokenize_from_source("<test>", &lines.join("\n"));
    let code = compile_tokens(&mut interpreter, &tokens)?;

    Ok((interpreter, code))
}

#[test]
fn number_literals_compile_to_integer_pushes() {
    let (_, code) = compile_lines(&["5", "42"]).unwrap();

    assert_eq!(code.len(), 2);
    assert_eq!(code[0].op, Op::PushInt(5));
    assert_eq!(code[1].op, Op::PushInt(42));
}

#[test]
fn out_of_range_number_literal_is_an_error() {
    let result = compile_lines(&["99999999999999999999"]);

    assert!(result.is_err());
    assert!(result.unwrap_err().error().contains("out of range"));
}

#[test]
fn unknown_tokens_compile_to_opaque_literals() {
    let (_, code) = compile_lines(&["HELLO"]).unwrap();

    assert_eq!(code.len(), 1);
    assert_eq!(code[0].op, Op::PushLiteral("HELLO".to_string()));
}

#[test]
fn stray_block_keywords_compile_to_opaque_literals() {
    let (_, code) = compile_lines(&["THEN"]).unwrap();

    assert_eq!(code.len(), 1);
    assert_eq!(code[0].op, Op::PushLiteral("THEN".to_string()));
}

#[test]
fn blank_lines_are_skipped() {
    let (_, code) = compile_lines(&["", "5", "   ", ""]).unwrap();

    assert_eq!(code.len(), 1);
    assert_eq!(code[0].op, Op::PushInt(5));
}

#[test]
fn token_text_is_trimmed_before_classification() {
    let (_, code) = compile_lines(&["  5  ", " DUP "]).unwrap();

    assert_eq!(code.len(), 2);
    assert_eq!(code[0].op, Op::PushInt(5));
    assert_eq!(code[1].op, Op::Execute("DUP".to_string()));
}

#[test]
fn tokens_record_their_source_lines() {
    let tokens = tokenize_from_source("<test>", "  5  \nDUP\n\n7");

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].text(), "5");
    assert_eq!(tokens[0].location().line(), 1);
    assert_eq!(tokens[1].text(), "DUP");
    assert_eq!(tokens[1].location().line(), 2);
    assert!(tokens[2].is_empty());
    assert_eq!(tokens[3].location().line(), 4);
}

#[test]
fn builtin_names_take_priority_over_procedure_names() {
    let (_, code) = compile_lines(&["PROCEDURE DUP", "5", "/PROCEDURE", "DUP"]).unwrap();

    assert_eq!(code.len(), 2);
    assert!(matches!(code[0].op, Op::DefineProcedure(_, _)));
    assert_eq!(code[1].op, Op::Execute("DUP".to_string()));
}

#[test]
fn conditional_without_else_has_no_false_branch() {
    let (_, code) = compile_lines(&["IF", "1", "THEN"]).unwrap();

    assert_eq!(code.len(), 1);

    let Op::Conditional(true_block, false_block) = &code[0].op else {
        panic!("Expected a conditional, found {:?}.", code[0].op);
    };

    assert_eq!(true_block.len(), 1);
    assert_eq!(true_block[0].op, Op::PushInt(1));
    assert!(false_block.is_none());
}

#[test]
fn conditional_with_else_splits_the_branches() {
    let (_, code) = compile_lines(&["IF", "1", "ELSE", "2", "THEN"]).unwrap();

    let Op::Conditional(true_block, false_block) = &code[0].op else {
        panic!("Expected a conditional, found {:?}.", code[0].op);
    };

    assert_eq!(true_block.len(), 1);
    assert_eq!(true_block[0].op, Op::PushInt(1));

    let false_block = false_block.as_ref().unwrap();

    assert_eq!(false_block.len(), 1);
    assert_eq!(false_block[0].op, Op::PushInt(2));
}

#[test]
fn nested_conditionals_bind_to_their_own_then() {
    let (_, code) = compile_lines(&["IF", "IF", "1", "THEN", "ELSE", "2", "THEN"]).unwrap();

    assert_eq!(code.len(), 1);

    let Op::Conditional(true_block, false_block) = &code[0].op else {
        panic!("Expected a conditional, found {:?}.", code[0].op);
    };

    // The outer true branch holds the whole inner conditional, and the ELSE belongs to the outer
    // conditional even though the inner one comes first.
    assert_eq!(true_block.len(), 1);
    assert!(matches!(true_block[0].op, Op::Conditional(_, None)));

    let false_block = false_block.as_ref().unwrap();

    assert_eq!(false_block[0].op, Op::PushInt(2));
}

#[test]
fn second_top_level_else_is_an_ordinary_token_of_the_else_branch() {
    let (_, code) = compile_lines(&["IF", "1", "ELSE", "2", "ELSE", "THEN"]).unwrap();

    let Op::Conditional(_, false_block) = &code[0].op else {
        panic!("Expected a conditional, found {:?}.", code[0].op);
    };

    let false_block = false_block.as_ref().unwrap();

    assert_eq!(false_block.len(), 2);
    assert_eq!(false_block[0].op, Op::PushInt(2));
    assert_eq!(false_block[1].op, Op::PushLiteral("ELSE".to_string()));
}

#[test]
fn missing_then_is_a_syntax_error() {
    let result = compile_lines(&["IF", "5"]);

    assert!(result.is_err());
    assert!(result.unwrap_err().error().contains("THEN"));
}

#[test]
fn times_blocks_compile_to_repeats() {
    let (_, code) = compile_lines(&["3", "TIMES", "DUP", "/TIMES"]).unwrap();

    assert_eq!(code.len(), 2);
    assert_eq!(code[0].op, Op::PushInt(3));

    let Op::Repeat(body) = &code[1].op else {
        panic!("Expected a repeat, found {:?}.", code[1].op);
    };

    assert_eq!(body.len(), 1);
    assert_eq!(body[0].op, Op::Execute("DUP".to_string()));
}

#[test]
fn missing_times_terminator_is_a_syntax_error() {
    let result = compile_lines(&["3", "TIMES", "DUP"]);

    assert!(result.is_err());
    assert!(result.unwrap_err().error().contains("/TIMES"));
}

#[test]
fn directly_nested_times_blocks_mis_parse() {
    // The terminator scan for TIMES does not track nesting.  The first /TIMES closes the outer
    // loop, leaving the inner one unterminated.
    let result = compile_lines(&["2", "TIMES", "2", "TIMES", "DUP", "/TIMES", "/TIMES"]);

    assert!(result.is_err());
    assert!(result.unwrap_err().error().contains("/TIMES"));
}

#[test]
fn missing_procedure_terminator_is_a_syntax_error() {
    let result = compile_lines(&["PROCEDURE COPY", "DUP"]);

    assert!(result.is_err());
    assert!(result.unwrap_err().error().contains("/PROCEDURE"));
}

#[test]
fn procedure_bodies_can_reference_their_own_name() {
    let (interpreter, code) = compile_lines(&["PROCEDURE LOOP", "LOOP", "/PROCEDURE"]).unwrap();

    // The name was registered before the body compiled, so the body's reference resolved to a
    // procedure call instead of falling through to an opaque literal.
    assert_eq!(code.len(), 1);

    let info = interpreter.find_procedure("LOOP").unwrap();

    assert_eq!(info.name(), "LOOP");
    assert_eq!(info.location().line(), 1);

    let body = info.body().unwrap();

    assert_eq!(body.len(), 1);
    assert_eq!(body[0].op, Op::CallProcedure("LOOP".to_string()));
}

#[test]
fn procedure_names_allow_digits_underscores_and_dashes() {
    let (interpreter, _) = compile_lines(&["PROCEDURE my-proc_2", "5", "/PROCEDURE"]).unwrap();

    assert!(interpreter.find_procedure("my-proc_2").is_some());
}

#[test]
fn bare_procedure_keyword_is_not_a_definition() {
    let (_, code) = compile_lines(&["PROCEDURE"]).unwrap();

    assert_eq!(code.len(), 1);
    assert_eq!(code[0].op, Op::PushLiteral("PROCEDURE".to_string()));
}

#[test]
fn syntax_errors_carry_the_opening_keyword_location() {
    let error = compile_lines(&["5", "IF", "5"]).unwrap_err();

    let location = error.location().as_ref().unwrap();

    assert_eq!(location.line(), 2);
}
