//! # LeafDB
//!
//! A single-table persistent store with a sqlite-style prompt:
//! - Fixed-width rows (positive integer key, username, email)
//! - Page-based file cache with whole-page writes
//! - One sorted leaf node holding every row
//! - Line-oriented command loop
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Command Dispatcher                        │
//! │              (prompt, parse, format responses)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                         Table                                │
//! │         (sorted insert, select cursor, describe)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Row Codec  │          │  Leaf Node  │
//!   │ (291 bytes) │          │ (page view) │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │    Pager    │
//!                           │ (4 KB pages)│
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod row;
pub mod pager;
pub mod btree;
pub mod table;
pub mod repl;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LeafError, Result};
pub use config::{Config, FlushPolicy};
pub use row::Row;
pub use table::Table;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of LeafDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
