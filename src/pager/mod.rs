//! Pager Module
//!
//! Mediates between page numbers and file bytes.
//!
//! ## Responsibilities
//! - Own the database file handle
//! - Cache fixed-size pages in memory, loading them on demand
//! - Write whole pages back at `page_num * PAGE_SIZE`
//! - Reject files whose length is not a whole number of pages
//!
//! ## File Format
//! ```text
//! ┌──────────────┬──────────────┬──────────────┬─────┐
//! │ Page 0 (4096)│ Page 1 (4096)│ Page 2 (4096)│ ... │
//! └──────────────┴──────────────┴──────────────┴─────┘
//! ```

mod cache;
mod page;

pub use cache::Pager;
pub use page::Page;

/// Size of one page, the unit of file I/O
pub const PAGE_SIZE: usize = 4096;
