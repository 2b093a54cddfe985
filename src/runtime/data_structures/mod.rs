/// Module contains the Value enumeration and it's implementation.  The value is one of the core
/// data structures of the interpreter.  It is used to represent all data types that the
/// interpreter and the underlying Minth code can understand and manage.
pub mod value;

/// The dictionary module provides the builtin word dictionary used by the Minth interpreter.
pub mod dictionary;

/// The registry of user defined procedures and their compiled bodies.
pub mod procedures;
