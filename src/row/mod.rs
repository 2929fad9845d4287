//! Row Module
//!
//! The single record shape the table stores.
//!
//! ## Serialized Layout (291 bytes)
//! ```text
//! ┌──────────┬──────────────────────┬──────────────────────────────┐
//! │ Id (4)   │ Username (32)        │ Email (255)                  │
//! │ u32 LE   │ NUL padded           │ NUL padded                   │
//! └──────────┴──────────────────────┴──────────────────────────────┘
//! ```

mod codec;

use std::fmt;

pub use codec::{decode, encode, encode_keyed, validate, validate_id};

// =============================================================================
// Layout Constants
// =============================================================================

/// Maximum username length in bytes
pub const USERNAME_SIZE: usize = 32;

/// Maximum email length in bytes
pub const EMAIL_SIZE: usize = 255;

pub const ID_SIZE: usize = std::mem::size_of::<u32>();
pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;

/// Width of one serialized row
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

// =============================================================================
// Row
// =============================================================================

/// A logical record: positive integer key plus two bounded strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl Row {
    pub fn new(id: i64, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}
