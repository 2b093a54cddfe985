use crate::{
    add_native_word,
    runtime::{error, interpreter::Interpreter},
};

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
fn word_dup(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.push(value.clone());
    interpreter.push(value);

    Ok(())
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
fn word_swap(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let a = interpreter.pop()?;
    let b = interpreter.pop()?;

    interpreter.push(a);
    interpreter.push(b);

    Ok(())
}

/// Rotate the third from the top value on the stack up to the top.
///
/// Signature: `a b c -- b c a`
fn word_rot(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let c = interpreter.pop()?;
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(b);
    interpreter.push(c);
    interpreter.push(a);

    Ok(())
}

/// Register the stack manipulation words.
pub fn register_stack_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "DUP",
        word_dup,
        "Duplicate the top value on the data stack.",
        "value -- value value"
    );

    add_native_word!(
        interpreter,
        "SWAP",
        word_swap,
        "Swap the top 2 values on the data stack.",
        "a b -- b a"
    );

    add_native_word!(
        interpreter,
        "ROT",
        word_rot,
        "Rotate the third from the top value on the stack up to the top.",
        "a b c -- b c a"
    );
}
