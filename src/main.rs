use minth::runtime::{
    built_ins::register_builtin_words,
    error,
    interpreter::{CodeManagement, InterpreterStack, minth_interpreter::MinthInterpreter},
};
use std::env::args;

fn main() -> error::Result<()> {
    // Gather the arguments passed to the program.  The script to run is the first and only
    // argument.
    let args: Vec<String> = args().collect();

    if args.len() < 2 {
        eprintln!("One argument required: script file to run.");
        return Ok(());
    }

    // Create the core instance of the interpreter and register the builtin words.  These are all
    // the words that are implemented in Rust.
    let mut interpreter = MinthInterpreter::new();

    register_builtin_words(&mut interpreter);

    // Find and process the user's script file.
    interpreter.process_source_file(&args[1])?;

    // The stack grew upwards, so print it top first.
    for value in interpreter.stack().iter().rev() {
        println!("{}", value);
    }

    Ok(())
}
