//! Lexical and syntactic errors produced during a parse.
//!
//! Both kinds are *reported*, never *thrown*: the driver records them and
//! keeps going until recovery fails or the configured error count is
//! reached. See `lrkit_tables::ModuleError` for the separate, fatal
//! initialization-time error kind.

use lrkit_core::Position;

/// A lexical or syntactic error detected during a parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The lexer could not extend any match from the current state.
    #[error("unexpected character {found:?} at {position}")]
    UnexpectedChar { found: String, position: Position },

    /// The parser had no action for `found` in the current state.
    #[error("unexpected token {found:?} at {position}, expected one of {expected:?}")]
    UnexpectedToken {
        found: String,
        expected: Vec<String>,
        position: Position,
    },
}

impl ParseError {
    /// The 1-based source position this error is anchored to.
    pub fn position(&self) -> Position {
        match self {
            ParseError::UnexpectedChar { position, .. } => *position,
            ParseError::UnexpectedToken { position, .. } => *position,
        }
    }
}
