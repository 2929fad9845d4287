//! Error types for LeafDB
//!
//! Provides a unified error type for all operations. The `Display` text of
//! each variant is the message shown at the prompt.

use std::fmt;

use thiserror::Error;

/// Result type alias using LeafError
pub type Result<T> = std::result::Result<T, LeafError>;

/// Row field that can overflow its fixed-width slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Email,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Username => f.write_str("username"),
            Field::Email => f.write_str("email"),
        }
    }
}

/// Unified error type for LeafDB operations
#[derive(Debug, Error)]
pub enum LeafError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Row Validation Errors
    // -------------------------------------------------------------------------
    #[error("ID can't be negative or zero")]
    NonPositiveId,

    #[error("ID {0} is too large")]
    IdOutOfRange(i64),

    #[error("{0} too long")]
    FieldTooLong(Field),

    #[error("{0} can't contain NUL bytes")]
    FieldContainsNul(Field),

    // -------------------------------------------------------------------------
    // Table Errors
    // -------------------------------------------------------------------------
    #[error("Duplicate key")]
    DuplicateKey(u32),

    #[error("Table full")]
    TableFull,

    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    #[error("Syntax error. Could not parse statement")]
    SyntaxError,

    #[error("Unrecognized command '{0}'")]
    UnrecognizedCommand(String),

    #[error("Unrecognized keyword at start of '{0}'")]
    UnrecognizedStatement(String),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Db file is not a whole number of pages. Corrupt file (length {length})")]
    CorruptFile { length: u64 },

    #[error("Corrupt node: {0}")]
    CorruptNode(String),

    #[error("Tried to fetch page number out of bounds. {page_num} >= {max_pages}")]
    PagerOutOfBounds { page_num: u32, max_pages: u32 },

    #[error("Tried to flush page {0} which is not cached")]
    PageNotCached(u32),
}

impl LeafError {
    /// Whether the process must stop operating on the store.
    ///
    /// Storage errors mean page boundaries or page indexes can no longer be
    /// trusted. Everything else is reported at the prompt and the loop goes on.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LeafError::Io(_)
                | LeafError::CorruptFile { .. }
                | LeafError::CorruptNode(_)
                | LeafError::PagerOutOfBounds { .. }
                | LeafError::PageNotCached(_)
        )
    }
}
