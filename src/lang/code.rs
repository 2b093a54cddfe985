use crate::lang::source_buffer::SourceLocation;
use std::rc::Rc;

/// The operations that can be performed by the Minth interpreter.
///
/// This is a closed set.  The interpreter matches on it exhaustively, so adding a new construct to
/// the language is a compile-time checked, localized change.
#[derive(Clone, PartialEq, Debug)]
pub enum Op {
    /// Push a literal integer onto the data stack.
    PushInt(i64),

    /// Push an unrecognized source token onto the data stack verbatim.  The language has no first
    /// class string type, this is how unclassified identifiers pass through a program.
    PushLiteral(String),

    /// Execute a builtin word by name.  The word is expected to exist in the interpreter's
    /// dictionary.
    Execute(String),

    /// Pop a boolean from the stack and execute the first block if it is true.  If it is false the
    /// second block is executed instead, when present.  A false value with no second block is a
    /// no-op.
    Conditional(Block, Option<Block>),

    /// Pop an integer count from the stack and execute the body that many times.  Counts of zero
    /// or less execute the body zero times.
    Repeat(Block),

    /// Record of a procedure definition.  The name and body were registered with the interpreter's
    /// procedure registry during compilation, so executing this instruction does nothing.  The
    /// body is shared with the registry entry.
    DefineProcedure(String, Rc<Block>),

    /// Execute a named procedure's body.  The name is resolved against the procedure registry when
    /// this instruction executes, not when it is compiled.
    CallProcedure(String),
}

/// Represents a single instruction of a compiled Minth program.
#[derive(Clone, PartialEq, Debug)]
pub struct Instruction {
    /// Location in the source code this instruction was generated from.  Instructions generated
    /// directly by native code will not have a location.
    pub location: Option<SourceLocation>,

    /// The operation to perform and optionally it's value as defined by the Op enum.
    pub op: Op,
}

/// A block of instructions making up a compiled program, a procedure body, or one branch of a
/// control structure.  Blocks nest by value, giving the compiled program its tree shape.
pub type Block = Vec<Instruction>;

impl Instruction {
    /// Create a new instruction with a location and operation.
    pub fn new(location: Option<SourceLocation>, op: Op) -> Instruction {
        Instruction { location, op }
    }
}
