use crate::lang::{code::Block, source_buffer::SourceLocation};
use std::{collections::HashMap, rc::Rc};

/// The information stored in the procedure registry for each user defined procedure.
///
/// A procedure's name is registered before it's body has been compiled.  Until the body arrives
/// the entry is a placeholder, which is what allows the body being compiled to refer to the
/// procedure itself.
#[derive(Clone)]
pub struct ProcedureInfo {
    /// The location in the script source code where the procedure was defined.
    location: SourceLocation,

    /// The name of the procedure.
    name: String,

    /// The procedure's compiled body.  None while the definition is still being compiled.  The
    /// block is shared with the DefineProcedure instruction that created it.
    body: Option<Rc<Block>>,
}

impl ProcedureInfo {
    /// Create a new placeholder ProcedureInfo without a body.
    pub fn new(location: SourceLocation, name: String) -> ProcedureInfo {
        ProcedureInfo {
            location,
            name,
            body: None,
        }
    }

    /// Where in the script source code was this procedure defined?
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The name of the procedure.
    pub fn name(&self) -> &String {
        &self.name
    }

    /// The procedure's compiled body, if it has been completed.
    pub fn body(&self) -> Option<Rc<Block>> {
        self.body.clone()
    }
}

/// The registry of user defined procedures known to the interpreter.
///
/// Entries persist for the lifetime of the session.  Defining a procedure with a name that is
/// already registered overwrites the previous entry, the last definition wins.
pub struct ProcedureMap {
    procedures: HashMap<String, ProcedureInfo>,
}

impl Default for ProcedureMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcedureMap {
    /// Create a new empty procedure registry.
    pub fn new() -> ProcedureMap {
        ProcedureMap {
            procedures: HashMap::new(),
        }
    }

    /// Register a procedure's name with a placeholder entry.  Called before the procedure's body
    /// is compiled so that the body can call the procedure itself.  Any previous entry under the
    /// same name is replaced.
    pub fn declare(&mut self, location: SourceLocation, name: String) {
        let info = ProcedureInfo::new(location, name.clone());
        let _ = self.procedures.insert(name, info);
    }

    /// Fill in the compiled body of a previously declared procedure.  Returns false if the name
    /// was never declared.
    pub fn complete(&mut self, name: &str, body: Rc<Block>) -> bool {
        match self.procedures.get_mut(name) {
            Some(info) => {
                info.body = Some(body);
                true
            }

            None => false,
        }
    }

    /// Try to get a procedure from the registry.
    pub fn try_get(&self, name: &str) -> Option<&ProcedureInfo> {
        self.procedures.get(name)
    }

    /// How many procedures have been registered?
    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    /// Check if the registry has no procedures registered at all.
    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}
