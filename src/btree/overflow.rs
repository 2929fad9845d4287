//! Overflow policy
//!
//! What the table does when the leaf an insert targets has no free cell.

use crate::error::{LeafError, Result};
use crate::pager::Pager;

/// Consulted by the table's capacity check before an insert into a full leaf
pub trait OverflowPolicy {
    /// Make room for one more cell.
    ///
    /// Returns the page the insert should go to. A policy that cannot make
    /// room returns an error, which the insert propagates unchanged.
    fn on_full(&self, pager: &mut Pager, page_num: u32) -> Result<u32>;
}

/// Single-leaf behaviour: a full leaf rejects further inserts
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectWhenFull;

impl OverflowPolicy for RejectWhenFull {
    fn on_full(&self, _pager: &mut Pager, _page_num: u32) -> Result<u32> {
        Err(LeafError::TableFull)
    }
}
