use crate::{
    add_native_word,
    runtime::{
        data_structures::value::Value,
        error::{self, script_error_str},
        interpreter::Interpreter,
    },
};

/// Subtract the top value from the value below it.
///
/// Signature: `a b -- a-b`
fn word_subtract(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = interpreter.pop_as_int()?;
    let a = interpreter.pop_as_int()?;

    interpreter.push(Value::Int(a.wrapping_sub(b)));

    Ok(())
}

/// Compute a floored remainder, one that takes the sign of the divisor.  The built in `%` operator
/// truncates towards zero instead.
fn floored_remainder(a: i64, b: i64) -> i64 {
    let remainder = a.wrapping_rem(b);

    if remainder != 0 && (remainder < 0) != (b < 0) {
        remainder + b
    } else {
        remainder
    }
}

/// Compute the remainder of dividing the second value by the top value.  The remainder is floored,
/// it takes the sign of the divisor.
///
/// Signature: `a b -- a%b`
fn word_mod(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = interpreter.pop_as_int()?;
    let a = interpreter.pop_as_int()?;

    if b == 0 {
        script_error_str(interpreter, "Division by zero.")?;
    }

    interpreter.push(Value::Int(floored_remainder(a, b)));

    Ok(())
}

/// Compare the top two values for equality.  Values of different kinds are never equal, there is
/// no coercion between kinds.
///
/// Signature: `a b -- flag`
fn word_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(Value::Bool(a == b));

    Ok(())
}

/// Register the arithmetic and comparison words.
pub fn register_math_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "SUBTRACT",
        word_subtract,
        "Subtract the top value from the value below it.",
        "a b -- a-b"
    );

    add_native_word!(
        interpreter,
        "MOD",
        word_mod,
        "Remainder after dividing the second value by the top value.",
        "a b -- a%b"
    );

    add_native_word!(
        interpreter,
        "=",
        word_equal,
        "Compare the top two values for equality.",
        "a b -- flag"
    );
}
