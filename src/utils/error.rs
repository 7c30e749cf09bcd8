//! Error handling for Tilwa

use crate::utils::Position;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Translation error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ==================== Pipeline Errors ====================

    /// A closer that does not match the innermost explicit opener, or an
    /// explicit group still open at end of input
    #[error("Unmatched parenthesis at {position}")]
    UnmatchedParens { position: Position },

    /// A string literal still open at end of input
    #[error("Non-terminated string starting at {position}")]
    NonTerminatedString { position: Position },

    // ==================== Output Errors ====================

    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Get the position associated with this error
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::UnmatchedParens { position } => Some(*position),
            Self::NonTerminatedString { position } => Some(*position),
            Self::Io(_) => None,
        }
    }
}
