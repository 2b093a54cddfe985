/// Module for managing the original source code.
pub mod source_buffer;

/// Module for managing the turning of the source code into a list of tokens for further processing.
pub mod tokenizing;

/// Module for defining the instructions of the Minth intermediate representation.
pub mod code;

/// Module for compiling the list of tokens into a block of instructions for the interpreter to
/// execute.  Procedure definitions are registered with the interpreter as they are compiled, so
/// this phase requires an active interpreter in order to compile the code.
///
/// That is, code compiled earlier may help in the compiling of later code.
pub mod compilation;
