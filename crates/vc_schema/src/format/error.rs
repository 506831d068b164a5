use alloc::string::String;

use thiserror::Error;

use crate::lexical::LexicalError;

// -----------------------------------------------------------------------------
// WriteError

/// A failure while serializing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WriteError {
    #[error("type `{type_name}` has a nameless schema, but the format requires member names")]
    NamesRequired { type_name: &'static str },

    #[error("schema of `{type_name}` was applied to an object of another type")]
    AccessorMismatch { type_name: &'static str },

    #[error("formatter produced output that is not valid UTF-8")]
    NonUtf8Output,
}

// -----------------------------------------------------------------------------
// ReadError

/// A failure while deserializing.
///
/// No partially populated object is ever handed back alongside an error.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ReadError {
    #[error("type `{type_name}` has a nameless schema, but the format requires member names")]
    NamesRequired { type_name: &'static str },

    #[error("schema of `{type_name}` was applied to an object of another type")]
    AccessorMismatch { type_name: &'static str },

    #[error(transparent)]
    Lexical(#[from] LexicalError),

    #[error("input is not valid UTF-8")]
    InvalidUtf8,

    #[error("expected an object enclosed in braces, found `{found}`")]
    MissingBraces { found: String },

    #[error("expected a sequence enclosed in brackets, found `{found}`")]
    MissingBrackets { found: String },

    #[error("expected a string enclosed in quotes, found `{found}`")]
    MissingQuotes { found: String },

    #[error("unbalanced nesting at offset {offset}")]
    UnbalancedNesting { offset: usize },

    #[error("unterminated string literal in `{found}`")]
    UnterminatedString { found: String },

    #[error("expected a quoted member name, found `{found}`")]
    ExpectedMemberName { found: String },

    #[error("expected `:` after a member name, found `{found}`")]
    ExpectedColon { found: String },

    #[error("unknown members left after reading an object: `{content}`")]
    UnknownMembers { content: String },

    #[error("expected {expected} elements, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("no variant of `{type_name}` has the discriminant `{repr}`")]
    InvalidEnum { type_name: &'static str, repr: String },

    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("length prefix {len} cannot be satisfied by the {remaining} remaining bytes")]
    LengthOutOfRange { len: usize, remaining: usize },

    #[error("invalid flag byte {flag}, expected 0 or 1")]
    InvalidFlag { flag: u8 },

    #[error("{count} bytes left after the top-level object")]
    TrailingBytes { count: usize },

    #[error("no schema registered under the name `{name}`")]
    UnregisteredType { name: String },
}

// -----------------------------------------------------------------------------
// Helpers

const EXCERPT_LEN: usize = 32;

/// Copies at most a short prefix of `text` for an error message.
pub(crate) fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_LEN) {
        None => String::from(text),
        Some((end, _)) => {
            let mut out = String::from(&text[..end]);
            out.push_str("...");
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::excerpt;

    #[test]
    fn excerpt_truncates_on_char_boundary() {
        assert_eq!(excerpt("abc"), "abc");
        let long = "é".repeat(40);
        let short = excerpt(&long);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), 32 + 3);
    }
}
