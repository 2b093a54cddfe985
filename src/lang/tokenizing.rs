use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::error,
};
use std::{
    fmt::{self, Debug, Display, Formatter},
    fs::read_to_string,
};

/// A token is a simple unit of the language.  Minth source code carries one directive or literal
/// per line, so a token is simply a line of text with the surrounding whitespace trimmed away.
///
/// Classification of the text, be it a keyword, a word, a number, or an opaque literal, is the
/// compiler's job.  The token also holds the location in the original source code where it was
/// found.
///
/// Blank lines produce tokens with empty text.  They are kept in the token list so that line
/// numbering stays true to the original source, and the compiler skips them.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    location: SourceLocation,
    text: String,
}

/// A list of tokens found in the source code.
pub type TokenList = Vec<Token>;

impl Token {
    /// Create a new token.  The text is trimmed of surrounding whitespace here so that every later
    /// phase can classify it directly.
    pub fn new(location: SourceLocation, text: &str) -> Token {
        Token {
            location,
            text: text.trim().to_string(),
        }
    }

    /// Get the token's location in the original source text.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The trimmed text of the token.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if the token came from a blank line.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Make sure that the tokens are nicely printable for debugging purposes.
impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Make sure that the tokens are nicely printable for debugging purposes.  We include the location
/// the token was found at in the original source code.
impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.text)
    }
}

/// Tokenize a Minth script from an in memory source string.  Every line of the source becomes one
/// token, stamped with the location it was found at.
///
/// The path parameter is used to represent the source code in things like call stacks and error
/// reporting.  For example, the tests use a path of "\<test\>" to represent source code supplied
/// directly by a test.
pub fn tokenize_from_source(path: &str, source: &str) -> TokenList {
    let mut buffer = SourceBuffer::new(path, source);
    let mut tokens = TokenList::new();

    while let Some((location, line)) = buffer.next_line() {
        tokens.push(Token::new(location, line));
    }

    tokens
}

/// Tokenize a Minth script directly from a source file.
pub fn tokenize_from_file(path: &str) -> error::Result<TokenList> {
    let source = read_to_string(path)?;
    Ok(tokenize_from_source(path, &source))
}
