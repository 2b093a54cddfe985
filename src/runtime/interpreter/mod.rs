use crate::{
    lang::{code::Block, source_buffer::SourceLocation},
    runtime::{
        data_structures::{
            dictionary::{Dictionary, WordInfo},
            procedures::{ProcedureInfo, ProcedureMap},
            value::Value,
        },
        error,
    },
};
use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};

pub mod minth_interpreter;

/// A call stack item is a record of the executing word or procedure's name and the location
/// within the original source code from which it was found.  These items are read-only and the
/// fields are accessed by member functions.
#[derive(Clone)]
pub struct CallItem {
    location: SourceLocation,
    word: String,
}

impl CallItem {
    /// Create a new call stack item.
    pub fn new(word: String, location: SourceLocation) -> CallItem {
        CallItem { location, word }
    }

    /// Where in the source code was the execution of this word found?
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    // The name of the word being executed.
    pub fn word(&self) -> &String {
        &self.word
    }
}

/// Make sure that this item can be nicely displayed to the user in event of an error.
impl Display for CallItem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.word)
    }
}

/// Type to represent a call stack.  This is a stack of call items currently being executed by the
/// interpreter.  This is used to help track errors and provide a script's stack trace to the user.
pub type CallStack = Vec<CallItem>;

/// The data stack of values managed by the interpreter.
pub type ValueStack = Vec<Value>;

/// Trait for managing the interpreter's data stack.  Intended to be called by native words and the
/// instruction dispatch itself.
pub trait InterpreterStack {
    /// What is the maximum depth the stack has reached so far?
    fn stack_max_depth(&self) -> usize;

    /// Use to examine the full data stack when required.  One example is rendering the final stack
    /// once a script has finished running.
    fn stack(&self) -> &ValueStack;

    /// Push a script value onto the stack.  This is the primary way of sending values to words.
    fn push(&mut self, value: Value);

    /// Pop a value from the stack.  This is the primary way of receiving operands within words.
    /// If the stack is empty a stack underflow error is returned.
    fn pop(&mut self) -> error::Result<Value>;

    /// Pop the top value and require it to be an integer.  The language performs no value
    /// coercion, so a boolean or string on top of the stack is a type mismatch error.  We also
    /// fail if the stack is empty.
    fn pop_as_int(&mut self) -> error::Result<i64>;

    /// Pop the top value and require it to be a boolean.  The language performs no value
    /// coercion, so an integer or string on top of the stack is a type mismatch error.  We also
    /// fail if the stack is empty.
    fn pop_as_bool(&mut self) -> error::Result<bool>;
}

/// Trait for turning source code into executable instruction blocks and running them.
pub trait CodeManagement {
    /// Compile and run a Minth script from a source file.  This will read the file, tokenize it,
    /// compile it into an instruction block, and execute that block.
    fn process_source_file(&mut self, path: &str) -> error::Result<()>;

    /// Compile and run a Minth script from an in memory source string.
    ///
    /// The path parameter is used to represent the source code in things like call stacks and
    /// error reporting.  For example, the tests use a path of "\<test\>" to represent source code
    /// supplied directly by a test.
    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>;

    /// Execute an instruction block and associate a name with that code for use in error
    /// reporting.  Nested blocks re-enter this call, so the implementation is expected to guard
    /// against runaway execution depth.
    fn execute_code(&mut self, name: &str, code: &Block) -> error::Result<()>;
}

/// Definition of a word handler function.  This is the function that is called when a builtin
/// word is to be executed.  Can be a lambda, a callable object or a Rust function.
pub type WordHandler = dyn Fn(&mut dyn Interpreter) -> error::Result<()>;

/// Information about a word handler.  Once created it's fields are read-only and accessed by
/// member methods.
#[derive(Clone)]
pub struct WordHandlerInfo {
    name: String,
    location: SourceLocation,
    handler: Rc<WordHandler>,
}

/// Core implementation of WordHandlerInfo's methods.
impl WordHandlerInfo {
    /// Create a new WordHandlerInfo instance.
    pub fn new(name: String, location: SourceLocation, handler: Rc<WordHandler>) -> WordHandlerInfo {
        WordHandlerInfo {
            name,
            location,
            handler,
        }
    }

    /// The name of the word itself.
    pub fn name(&self) -> &String {
        &self.name
    }

    /// Where this word was registered in the Rust source code.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The handler function for the word.
    pub fn handler(&self) -> Rc<WordHandler> {
        self.handler.clone()
    }
}

/// Simplify registering a native word with the interpreter.
///
/// Required parameters are, the interpreter instance to register with.  The name of the word to
/// register.  The word function handler to execute for the word.  A simple description of the
/// word.  As well as the word's stack signature.
#[macro_export]
macro_rules! add_native_word {
    (
        $interpreter:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use std::rc::Rc;

        // Register the word while recording where in the source code the word was registered
        // from.
        $interpreter.add_word(
            file!().to_string(), // Original source location that this
            line!() as usize,    //  word was registered from.
            column!() as usize,
            $name.to_string(),        // Name.
            Rc::new($function),       // Function handler.
            $description.to_string(), // Word description.
            $signature.to_string(),   // Word signature.
        );
    }};
}

/// Trait for managing and executing builtin words known to the interpreter.
pub trait WordManagement {
    /// If currently set, this represents the current executing location in the original Minth
    /// source code.
    fn current_location(&self) -> &Option<SourceLocation>;

    /// Add a new builtin word to the interpreter's dictionary.
    #[allow(clippy::too_many_arguments)]
    fn add_word(
        &mut self,
        file: String,
        line: usize,
        column: usize,
        name: String,
        handler: Rc<WordHandler>,
        description: String,
        signature: String,
    );

    /// Find a word in the interpreter's dictionary by name.
    fn find_word(&self, word: &str) -> Option<&WordInfo>;

    /// Get a word's execution information from it's handler index.
    fn word_handler_info(&self, index: usize) -> Option<&WordHandlerInfo>;

    /// Execute a word handler by it's handler information.
    fn execute_word_handler(
        &mut self,
        location: &SourceLocation,
        word_handler_info: &WordHandlerInfo,
    ) -> error::Result<()>;

    /// Find and execute a word by WordInfo.  Supply a source location to represent where the word
    /// was executed from.  Use the macro `location_here!()` to get the current location in the
    /// Rust source code if the word is executed from native code.
    fn execute_word(&mut self, location: &SourceLocation, word: &WordInfo) -> error::Result<()>;

    /// Find and execute a word by name.  Supply a source location to represent where the word was
    /// executed from.
    ///
    /// If the word is not found a script error is returned.  Otherwise the word is executed and
    /// it's result is returned.
    fn execute_word_named(&mut self, location: &SourceLocation, word: &str) -> error::Result<()>;

    /// The current script execution call stack.
    fn call_stack(&self) -> &CallStack;

    /// Push a new name and location onto the call stack.  This information is used to help track
    /// errors reported by the interpreter.
    fn call_stack_push(&mut self, name: String, location: SourceLocation);

    /// Pop the last name and location from the call stack.
    fn call_stack_pop(&mut self) -> error::Result<()>;
}

/// Trait for managing and executing the user defined procedures known to the interpreter.
pub trait ProcedureManagement {
    /// Register a procedure's name ahead of it's body.  Called by the compiler when it encounters
    /// a definition, before the body is compiled, so that the body can call the procedure itself.
    /// Redefining a name replaces the previous procedure.
    fn declare_procedure(&mut self, location: SourceLocation, name: String);

    /// Fill in the compiled body of a previously declared procedure.
    fn complete_procedure(
        &mut self,
        location: &SourceLocation,
        name: &str,
        body: Rc<Block>,
    ) -> error::Result<()>;

    /// Find a procedure in the interpreter's registry by name.
    fn find_procedure(&self, name: &str) -> Option<&ProcedureInfo>;

    /// Find and execute a procedure by name.  The name is resolved when this is called, not when
    /// the calling instruction was compiled.  A name that is missing from the registry, or whose
    /// definition was never completed, is an error.
    fn execute_procedure_named(
        &mut self,
        location: &SourceLocation,
        name: &str,
    ) -> error::Result<()>;
}

/// Core interpreter trait.
///
/// This trait defines and brings together the traits that define the core functionality of the
/// Minth interpreter.
///
/// Functionality includes, managing the Minth data stack.  Compiling and executing instruction
/// blocks.  As well as managing the builtin word dictionary and the user procedure registry.
pub trait Interpreter:
    InterpreterStack + CodeManagement + WordManagement + ProcedureManagement
{
    /// The current word dictionary of builtin words known to the interpreter.
    fn dictionary(&self) -> &Dictionary;

    /// The current registry of user defined procedures known to the interpreter.
    fn procedures(&self) -> &ProcedureMap;

    /// Reset the interpreter's execution state, clearing the data stack and the call stack.  The
    /// word dictionary and the procedure registry are kept, so the same session can run further
    /// programs.
    fn reset(&mut self) -> error::Result<()>;
}
