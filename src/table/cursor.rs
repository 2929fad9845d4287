//! Table Cursor
//!
//! Sequential iteration over the rows of a leaf in key order.

use crate::btree::LeafNode;
use crate::error::Result;
use crate::pager::Pager;
use crate::row::{self, Row};

/// Iterator over table rows in ascending key order
///
/// Holds the pager borrow for its lifetime, so the table cannot change
/// underneath it. Each call to `Table::select_all` starts a fresh cursor.
pub struct Cursor<'a> {
    pager: &'a mut Pager,
    page_num: u32,
    cell_num: usize,
    /// Cell count when the cursor was created
    num_cells: usize,
}

impl<'a> Cursor<'a> {
    /// Position a cursor on the first cell of a leaf
    pub(super) fn start(pager: &'a mut Pager, page_num: u32) -> Result<Self> {
        let page = pager.get_page(page_num)?;
        let num_cells = LeafNode::new(page.as_bytes()).num_cells();
        Ok(Self {
            pager,
            page_num,
            cell_num: 0,
            num_cells,
        })
    }

    pub fn end_of_table(&self) -> bool {
        self.cell_num >= self.num_cells
    }

    fn read_row(&mut self) -> Result<Row> {
        let page = self.pager.get_page(self.page_num)?;
        let node = LeafNode::new(page.as_bytes());
        row::decode(node.value(self.cell_num))
    }
}

impl Iterator for Cursor<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.end_of_table() {
            return None;
        }

        let row = self.read_row();
        self.cell_num += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num_cells.saturating_sub(self.cell_num);
        (remaining, Some(remaining))
    }
}
