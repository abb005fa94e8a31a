//! Parse errors.
//!
//! A parse error is scoped to a single statement: the statement loop
//! catches it, logs it, advances one token, and keeps going. No parse
//! error is ever fatal to a load.

use std::fmt;

/// Error raised while parsing one statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable description of what went wrong.
    pub message: String,
    /// Token index at which the error was detected.
    pub at: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, at: usize) -> Self {
        ParseError {
            message: message.into(),
            at,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at token {})", self.message, self.at)
    }
}

impl std::error::Error for ParseError {}
