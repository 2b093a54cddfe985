use crate::lang::source_buffer::SourceLocation;
use std::collections::HashMap;

/// The information stored in the Minth word dictionary for each builtin word.
#[derive(Clone, PartialEq, Eq)]
pub struct WordInfo {
    /// The location in the Rust source code where the word was registered.
    pub location: SourceLocation,

    /// The name of the word.
    pub name: String,

    /// A simple description of the word.
    pub description: String,

    /// The stack signature of the word.
    pub signature: String,

    /// The index of the actual handler for the word in the interpreter's handler list.
    pub handler_index: usize,
}

impl WordInfo {
    /// Create a new WordInfo with default values.
    pub fn new(location: SourceLocation) -> WordInfo {
        WordInfo {
            location,
            name: String::new(),
            description: String::new(),
            signature: String::new(),
            handler_index: 0,
        }
    }
}

/// The Minth word dictionary used by the interpreter.  We use this to keep track of all of the
/// builtin words registered with the interpreter.
///
/// The dictionary is populated once when the interpreter's session is constructed and stays fixed
/// afterwards.  Registering a name a second time overwrites the earlier entry.
pub struct Dictionary {
    words: HashMap<String, WordInfo>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Dictionary {
        Dictionary {
            words: HashMap::new(),
        }
    }

    /// Insert a new word and it's info into the dictionary.
    pub fn insert(&mut self, name: String, info: WordInfo) {
        let _ = self.words.insert(name, info);
    }

    /// Try to get a word from the dictionary.
    pub fn try_get(&self, name: &str) -> Option<&WordInfo> {
        self.words.get(name)
    }

    /// How many words have been registered?
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the dictionary has no words registered at all.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
