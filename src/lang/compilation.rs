use crate::{
    lang::{
        code::{Block, Instruction, Op},
        tokenizing::Token,
    },
    runtime::{
        error::{self, ScriptError},
        interpreter::Interpreter,
    },
};
use std::rc::Rc;

/// Maximum nesting depth of compiled blocks.  Compilation of nested blocks is recursive, so
/// without a limit a pathologically nested script would overflow the native stack instead of
/// reporting a proper error.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Compile a list of source tokens into a block of instructions ready for execution.
///
/// Tokens are classified in priority order: the control keywords IF, TIMES, and PROCEDURE open
/// nested blocks which are compiled by recursive calls over sub-slices of the token list.  Then
/// names are resolved against the interpreter's word dictionary and procedure registry.  All-digit
/// tokens become integer literals.  Anything else non-empty passes through as an opaque literal,
/// and blank lines are skipped.
///
/// Procedure definitions mutate the interpreter's procedure registry as they are compiled.  The
/// name is registered before the body is compiled, which is what allows a procedure's body to call
/// the procedure itself.
pub fn compile_tokens(
    interpreter: &mut dyn Interpreter,
    tokens: &[Token],
) -> error::Result<Block> {
    compile_block(interpreter, tokens, 0)
}

/// Compile one block of the token list.  The depth parameter tracks how deeply the blocks being
/// compiled are nested.
fn compile_block(
    interpreter: &mut dyn Interpreter,
    tokens: &[Token],
    depth: usize,
) -> error::Result<Block> {
    if depth > MAX_NESTING_DEPTH {
        let location = tokens.first().map(|token| token.location().clone());

        return ScriptError::new_as_result(
            location,
            "Maximum block nesting depth exceeded.".to_string(),
            None,
        );
    }

    let mut code = Block::new();
    let mut index = 0;

    while index < tokens.len() {
        let token = &tokens[index];
        let text = token.text();
        let location = token.location().clone();

        if text == "IF" {
            // Find the THEN that closes this conditional and the ELSE that splits it's branches,
            // if there is one.
            let Some((end_index, else_index)) = find_conditional_end(tokens, index + 1) else {
                return ScriptError::new_as_result(
                    Some(location),
                    "Syntax error: IF without a matching THEN.".to_string(),
                    None,
                );
            };

            let (true_tokens, false_tokens) = match else_index {
                Some(else_index) => (
                    &tokens[index + 1..else_index],
                    Some(&tokens[else_index + 1..end_index]),
                ),
                None => (&tokens[index + 1..end_index], None),
            };

            let true_block = compile_block(interpreter, true_tokens, depth + 1)?;
            let false_block = match false_tokens {
                Some(false_tokens) => Some(compile_block(interpreter, false_tokens, depth + 1)?),
                None => None,
            };

            code.push(Instruction::new(
                Some(location),
                Op::Conditional(true_block, false_block),
            ));

            index = end_index + 1;
        } else if text == "TIMES" {
            let Some(end_index) = find_terminator(tokens, index + 1, "/TIMES") else {
                return ScriptError::new_as_result(
                    Some(location),
                    "Syntax error: TIMES without a matching /TIMES.".to_string(),
                    None,
                );
            };

            let body = compile_block(interpreter, &tokens[index + 1..end_index], depth + 1)?;

            code.push(Instruction::new(Some(location), Op::Repeat(body)));

            index = end_index + 1;
        } else if let Some(name) = procedure_name(text) {
            // Register the name first so that the procedure's own body can call it.
            interpreter.declare_procedure(location.clone(), name.to_string());

            let Some(end_index) = find_terminator(tokens, index + 1, "/PROCEDURE") else {
                return ScriptError::new_as_result(
                    Some(location),
                    "Syntax error: PROCEDURE without a matching /PROCEDURE.".to_string(),
                    None,
                );
            };

            let body = Rc::new(compile_block(
                interpreter,
                &tokens[index + 1..end_index],
                depth + 1,
            )?);

            interpreter.complete_procedure(&location, name, body.clone())?;

            code.push(Instruction::new(
                Some(location),
                Op::DefineProcedure(name.to_string(), body),
            ));

            index = end_index + 1;
        } else if interpreter.find_word(text).is_some() {
            code.push(Instruction::new(Some(location), Op::Execute(text.to_string())));

            index += 1;
        } else if interpreter.find_procedure(text).is_some() {
            code.push(Instruction::new(
                Some(location),
                Op::CallProcedure(text.to_string()),
            ));

            index += 1;
        } else if is_number(text) {
            match text.parse::<i64>() {
                Ok(number) => {
                    code.push(Instruction::new(Some(location), Op::PushInt(number)));
                }

                Err(_) => {
                    return ScriptError::new_as_result(
                        Some(location),
                        format!("Number literal {} is out of range.", text),
                        None,
                    );
                }
            }

            index += 1;
        } else if !text.is_empty() {
            code.push(Instruction::new(
                Some(location),
                Op::PushLiteral(text.to_string()),
            ));

            index += 1;
        } else {
            // A blank line, nothing to emit.
            index += 1;
        }
    }

    Ok(code)
}

/// Scan for the THEN that terminates a conditional block, starting just past it's IF.
///
/// Conditionals commonly nest directly within each other, so this scan tracks a nesting depth.
/// Every nested IF increments the depth and every THEN at a non-zero depth decrements it.  The
/// first THEN found at depth zero terminates the block and it's index is returned.  The first
/// ELSE found at depth zero before that THEN marks the split between the two branches; an ELSE
/// belonging to a nested conditional is invisible to this scan level.
///
/// Returns None when the token list runs out before a terminating THEN is found.
fn find_conditional_end(tokens: &[Token], start: usize) -> Option<(usize, Option<usize>)> {
    let mut depth = 0;
    let mut else_index = None;

    for (index, token) in tokens.iter().enumerate().skip(start) {
        match token.text() {
            "IF" => depth += 1,
            "THEN" if depth == 0 => return Some((index, else_index)),
            "THEN" => depth -= 1,
            "ELSE" if depth == 0 && else_index.is_none() => else_index = Some(index),
            _ => {}
        }
    }

    None
}

/// Scan for the first occurrence of a block terminator, starting just past the keyword that opened
/// the block.
///
/// Unlike the conditional scan this one does not track nesting.  Opening a TIMES loop directly
/// inside another TIMES loop, or a PROCEDURE inside a PROCEDURE, therefore mis-parses: the first
/// closing keyword ends the outer block and the inner block is left unterminated.
fn find_terminator(tokens: &[Token], start: usize, terminator: &str) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, token)| token.text() == terminator)
        .map(|(index, _)| index)
}

/// Match a `PROCEDURE <name>` token.  The first whitespace separated word must be PROCEDURE, and
/// the word directly after it is the procedure's name.  Names consist of ASCII letters, digits,
/// underscores, and dashes.  Any further text on the line is ignored.
///
/// A bare PROCEDURE with no name does not open a definition and falls through to literal
/// classification.
fn procedure_name(text: &str) -> Option<&str> {
    let mut words = text.split_whitespace();

    if words.next()? != "PROCEDURE" {
        return None;
    }

    let name = words.next()?;

    if name
        .chars()
        .all(|next| next.is_ascii_alphanumeric() || next == '_' || next == '-')
    {
        Some(name)
    } else {
        None
    }
}

/// Check if a token's text is an integer literal.  Only unsigned base 10 digit strings qualify.
fn is_number(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|next| next.is_ascii_digit())
}
