use crate::{
    lang::{
        code::{Block, Op},
        compilation::compile_tokens,
        source_buffer::SourceLocation,
        tokenizing::{tokenize_from_file, tokenize_from_source},
    },
    location_here,
    runtime::{
        data_structures::{
            dictionary::{Dictionary, WordInfo},
            procedures::{ProcedureInfo, ProcedureMap},
            value::{ToValue, Value},
        },
        error::{self, ScriptError, script_error, script_error_str},
        interpreter::{
            CallItem, CallStack, CodeManagement, Interpreter, InterpreterStack,
            ProcedureManagement, ValueStack, WordHandler, WordHandlerInfo, WordManagement,
        },
    },
};
use std::rc::Rc;

/// Maximum depth of nested block executions.  Every conditional branch, loop body, and procedure
/// call re-enters the execution loop on the native call stack, so a script with runaway recursion
/// would otherwise exhaust the native stack.  Hitting this limit is reported as a regular script
/// error.  The limit is sized to stay well within the default stack of a spawned thread.
pub const MAX_EXECUTION_DEPTH: usize = 1024;

/// List of word handlers known by the interpreter.
pub type WordList = Vec<WordHandlerInfo>;

/// The core interpreter implementation for the Minth language.
///
/// One value of this type is a complete session: the data stack, the builtin word dictionary, and
/// the user procedure registry all live here and are never global.  A session can compile and run
/// any number of programs, one after the other, against the same state.
pub struct MinthInterpreter {
    /// The maximum depth of the data stack during execution.
    max_depth: usize,

    /// The data stack used by the interpreter.
    stack: ValueStack,

    /// The last known location execution has reached in the original source code.
    current_location: Option<SourceLocation>,

    /// The call stack used to keep track of the current execution context.
    call_stack: CallStack,

    /// The dictionary of builtin words known by the interpreter.
    dictionary: Dictionary,

    /// The list of executable word handlers associated with the dictionary.
    word_handlers: WordList,

    /// The registry of user defined procedures known by the interpreter.
    procedures: ProcedureMap,

    /// How many block executions are currently nested within each other.  Guarded against
    /// MAX_EXECUTION_DEPTH.
    execution_depth: usize,
}

impl std::fmt::Debug for MinthInterpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinthInterpreter")
            .field("max_depth", &self.max_depth)
            .field("stack", &self.stack)
            .field("current_location", &self.current_location)
            .field("execution_depth", &self.execution_depth)
            .finish_non_exhaustive()
    }
}

impl InterpreterStack for MinthInterpreter {
    fn stack_max_depth(&self) -> usize {
        self.max_depth
    }

    fn stack(&self) -> &ValueStack {
        &self.stack
    }

    fn push(&mut self, value: Value) {
        self.stack.push(value);

        if self.stack.len() > self.max_depth {
            self.max_depth = self.stack.len();
        }
    }

    fn pop(&mut self) -> error::Result<Value> {
        let item = self.stack.pop();

        if item.is_none() {
            script_error_str(self, "Stack underflow.")?;
        }

        Ok(item.unwrap())
    }

    fn pop_as_int(&mut self) -> error::Result<i64> {
        let value = self.pop()?;

        if !value.is_int() {
            script_error_str(self, "Expected an integer value.")?;
        }

        Ok(value.get_int_val())
    }

    fn pop_as_bool(&mut self) -> error::Result<bool> {
        let value = self.pop()?;

        if !value.is_bool() {
            script_error_str(self, "Expected a boolean value.")?;
        }

        Ok(value.get_bool_val())
    }
}

// Helper methods for the interpreter instruction handling.
impl MinthInterpreter {
    /// Execute the instructions of one block in order.  Called with the execution depth guard
    /// already accounted for by execute_code.
    fn execute_instructions(&mut self, name: &str, code: &Block) -> error::Result<()> {
        for instruction in code.iter() {
            // Does the current instruction have a location associated with it?  If so we need to
            // keep track of it.
            let mut call_stack_pushed = false;

            if let Some(location) = &instruction.location {
                self.current_location = Some(location.clone());
                self.call_stack_push(name.to_string(), location.clone());
                call_stack_pushed = true;
            }

            // Keep track of whether the instruction was successful.
            let result: error::Result<()> = match &instruction.op {
                Op::PushInt(value) => {
                    self.push(value.to_value());
                    Ok(())
                }

                Op::PushLiteral(text) => {
                    self.push(text.to_value());
                    Ok(())
                }

                Op::Execute(word) => {
                    let location = self.effective_location();
                    self.execute_word_named(&location, word)
                }

                Op::Conditional(true_block, false_block) => {
                    self.execute_conditional(name, true_block, false_block.as_ref())
                }

                Op::Repeat(body) => self.execute_repeat(name, body),

                Op::DefineProcedure(_, _) => {
                    // The registration already happened at compile time, so there is nothing left
                    // to do at run time.
                    Ok(())
                }

                Op::CallProcedure(procedure) => {
                    let location = self.effective_location();
                    self.execute_procedure_named(&location, procedure)
                }
            };

            // If the instruction was not successful we need to clean up and report the error.
            match result {
                Err(script_error) => {
                    if call_stack_pushed {
                        let _ = self.call_stack.pop();
                    }

                    return Err(script_error);
                }

                Ok(()) => {
                    if call_stack_pushed {
                        self.call_stack_pop()?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Pop the condition flag and execute the matching branch.  A false flag with no else branch
    /// leaves the stack untouched.
    fn execute_conditional(
        &mut self,
        name: &str,
        true_block: &Block,
        false_block: Option<&Block>,
    ) -> error::Result<()> {
        let flag = self.pop_as_bool()?;

        if flag {
            self.execute_code(name, true_block)
        } else if let Some(false_block) = false_block {
            self.execute_code(name, false_block)
        } else {
            Ok(())
        }
    }

    /// Pop the iteration count and execute the loop body that many times.  Counts of zero or less
    /// execute the body zero times.  Every iteration observes the stack state left behind by the
    /// previous one.
    fn execute_repeat(&mut self, name: &str, body: &Block) -> error::Result<()> {
        let count = self.pop_as_int()?;

        for _ in 0..count.max(0) {
            self.execute_code(name, body)?;
        }

        Ok(())
    }

    /// The location execution has currently reached, or the location of the caller in the Rust
    /// source code if no script location is known.
    fn effective_location(&self) -> SourceLocation {
        match &self.current_location {
            Some(location) => location.clone(),
            None => location_here!(),
        }
    }
}

impl CodeManagement for MinthInterpreter {
    fn process_source_file(&mut self, path: &str) -> error::Result<()> {
        let tokens = tokenize_from_file(path)?;
        let code = compile_tokens(self, &tokens)?;

        self.execute_code(path, &code)
    }

    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()> {
        let tokens = tokenize_from_source(path, source);
        let code = compile_tokens(self, &tokens)?;

        self.execute_code(path, &code)
    }

    fn execute_code(&mut self, name: &str, code: &Block) -> error::Result<()> {
        if self.execution_depth >= MAX_EXECUTION_DEPTH {
            return script_error_str(self, "Maximum execution depth exceeded.");
        }

        self.execution_depth += 1;

        let result = self.execute_instructions(name, code);

        self.execution_depth -= 1;

        result
    }
}

impl WordManagement for MinthInterpreter {
    fn current_location(&self) -> &Option<SourceLocation> {
        &self.current_location
    }

    fn add_word(
        &mut self,
        file: String,
        line: usize,
        column: usize,
        name: String,
        handler: Rc<WordHandler>,
        description: String,
        signature: String,
    ) {
        let location = SourceLocation::new_from_info(&file, line, column);
        let mut word_info = WordInfo::new(location.clone());

        let info = WordHandlerInfo::new(name.clone(), location, handler);
        let index = self.word_handlers.len();

        self.word_handlers.push(info);

        word_info.name = name.clone();
        word_info.description = description;
        word_info.signature = signature;
        word_info.handler_index = index;

        self.dictionary.insert(name, word_info);
    }

    fn find_word(&self, word: &str) -> Option<&WordInfo> {
        self.dictionary.try_get(word)
    }

    fn word_handler_info(&self, index: usize) -> Option<&WordHandlerInfo> {
        if index >= self.word_handlers.len() {
            return None;
        }

        Some(&self.word_handlers[index])
    }

    fn execute_word_handler(
        &mut self,
        location: &SourceLocation,
        word_handler_info: &WordHandlerInfo,
    ) -> error::Result<()> {
        self.current_location = Some(location.clone());

        self.call_stack
            .push(CallItem::new(word_handler_info.name().clone(), location.clone()));

        let handler = word_handler_info.handler();
        let result = (*handler)(self);

        let _ = self.call_stack.pop();

        result
    }

    fn execute_word(&mut self, location: &SourceLocation, word: &WordInfo) -> error::Result<()> {
        let handler_info = self.word_handler_info(word.handler_index);

        if let Some(handler_info) = handler_info {
            self.execute_word_handler(location, &handler_info.clone())
        } else {
            script_error(
                self,
                format!(
                    "Handler for word {}, ({}) not found.",
                    word.name, word.handler_index
                ),
            )
        }
    }

    fn execute_word_named(&mut self, location: &SourceLocation, word: &str) -> error::Result<()> {
        let word_info = self.dictionary.try_get(word);

        if let Some(word_info) = word_info {
            self.execute_word(location, &word_info.clone())
        } else {
            script_error(self, format!("Word {} not found.", word))
        }
    }

    fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    fn call_stack_push(&mut self, name: String, location: SourceLocation) {
        self.call_stack.push(CallItem::new(name, location));
    }

    fn call_stack_pop(&mut self) -> error::Result<()> {
        if self.call_stack.is_empty() {
            script_error_str(self, "Call stack underflow.")?;
        }

        self.call_stack.pop();
        Ok(())
    }
}

impl ProcedureManagement for MinthInterpreter {
    fn declare_procedure(&mut self, location: SourceLocation, name: String) {
        self.procedures.declare(location, name);
    }

    fn complete_procedure(
        &mut self,
        location: &SourceLocation,
        name: &str,
        body: Rc<Block>,
    ) -> error::Result<()> {
        if !self.procedures.complete(name, body) {
            return ScriptError::new_as_result(
                Some(location.clone()),
                format!("Procedure {} was never declared.", name),
                None,
            );
        }

        Ok(())
    }

    fn find_procedure(&self, name: &str) -> Option<&ProcedureInfo> {
        self.procedures.try_get(name)
    }

    fn execute_procedure_named(
        &mut self,
        location: &SourceLocation,
        name: &str,
    ) -> error::Result<()> {
        // Resolve the name lazily, at the time the call actually executes.
        let body = match self.procedures.try_get(name) {
            Some(info) => match info.body() {
                Some(body) => body,
                None => {
                    return script_error(
                        self,
                        format!("Procedure {} was never completely defined.", name),
                    );
                }
            },

            None => return script_error(self, format!("Procedure {} not found.", name)),
        };

        self.current_location = Some(location.clone());

        self.call_stack
            .push(CallItem::new(name.to_string(), location.clone()));

        let result = self.execute_code(name, &body);

        let _ = self.call_stack.pop();

        result
    }
}

impl Interpreter for MinthInterpreter {
    fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn procedures(&self) -> &ProcedureMap {
        &self.procedures
    }

    fn reset(&mut self) -> error::Result<()> {
        // Clear the execution state.  The word dictionary and the procedure registry are kept so
        // that the session can run further programs.
        self.stack.clear();
        self.call_stack.clear();
        self.current_location = None;

        Ok(())
    }
}

impl MinthInterpreter {
    pub fn new() -> MinthInterpreter {
        MinthInterpreter {
            max_depth: 0,

            stack: Vec::with_capacity(20),

            current_location: None,
            call_stack: CallStack::with_capacity(40),

            dictionary: Dictionary::new(),
            word_handlers: WordList::new(),

            procedures: ProcedureMap::new(),

            execution_depth: 0,
        }
    }
}

impl Default for MinthInterpreter {
    fn default() -> Self {
        Self::new()
    }
}
