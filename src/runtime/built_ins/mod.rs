/// Words that manipulate the data stack.
pub mod stack_words;

/// Words that perform arithmetic and comparison on stack values.
pub mod math_words;

use crate::runtime::{
    built_ins::{math_words::register_math_words, stack_words::register_stack_words},
    interpreter::Interpreter,
};

/// Called to register all of the builtin words of the language.
pub fn register_builtin_words(interpreter: &mut dyn Interpreter) {
    register_stack_words(interpreter);
    register_math_words(interpreter);
}
