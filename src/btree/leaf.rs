//! Leaf node
//!
//! A typed view over the bytes of a page holding a leaf node.

use crate::error::Result;

use super::{
    NodeType, IS_ROOT_OFFSET, LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE, LEAF_NODE_KEY_OFFSET,
    LEAF_NODE_MAX_CELLS, LEAF_NODE_NUM_CELLS_OFFSET, LEAF_NODE_VALUE_OFFSET,
    LEAF_NODE_VALUE_SIZE, NODE_TYPE_OFFSET, PARENT_POINTER_OFFSET,
};

/// Leaf node view over a page buffer
///
/// Read accessors work on any `AsRef<[u8]>`; mutation needs `AsMut<[u8]>`
/// as well, so a node over `&[u8]` is read-only by construction.
pub struct LeafNode<B> {
    buf: B,
}

impl<B: AsRef<[u8]>> LeafNode<B> {
    pub fn new(buf: B) -> Self {
        Self { buf }
    }

    pub fn node_type(&self) -> Result<NodeType> {
        NodeType::try_from(self.buf.as_ref()[NODE_TYPE_OFFSET])
    }

    pub fn is_root(&self) -> bool {
        self.buf.as_ref()[IS_ROOT_OFFSET] != 0
    }

    pub fn num_cells(&self) -> usize {
        self.read_u32(LEAF_NODE_NUM_CELLS_OFFSET) as usize
    }

    pub fn is_full(&self) -> bool {
        self.num_cells() >= LEAF_NODE_MAX_CELLS
    }

    /// Key of cell `cell_num`
    pub fn key(&self, cell_num: usize) -> u32 {
        self.read_u32(cell_offset(cell_num) + LEAF_NODE_KEY_OFFSET)
    }

    /// Serialized row of cell `cell_num`
    pub fn value(&self, cell_num: usize) -> &[u8] {
        let start = cell_offset(cell_num) + LEAF_NODE_VALUE_OFFSET;
        &self.buf.as_ref()[start..start + LEAF_NODE_VALUE_SIZE]
    }

    /// Keys of occupied cells, in stored order
    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.num_cells()).map(move |i| self.key(i))
    }

    /// Binary search for `key` among the occupied cells
    ///
    /// `Ok(i)` if cell `i` holds the key, otherwise `Err(i)` with the first
    /// index whose key is greater.
    pub fn find_cell(&self, key: u32) -> std::result::Result<usize, usize> {
        let mut min = 0;
        let mut max = self.num_cells();

        while min != max {
            let mid = (min + max) / 2;
            let key_at_mid = self.key(mid);
            if key == key_at_mid {
                return Ok(mid);
            }
            if key < key_at_mid {
                max = mid;
            } else {
                min = mid + 1;
            }
        }

        Err(min)
    }

    fn read_u32(&self, offset: usize) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.buf.as_ref()[offset..offset + 4]);
        u32::from_le_bytes(bytes)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> LeafNode<B> {
    /// Reset the page to an empty leaf
    pub fn initialize(&mut self, is_root: bool) {
        let buf = self.buf.as_mut();
        buf[NODE_TYPE_OFFSET] = NodeType::Leaf as u8;
        buf[IS_ROOT_OFFSET] = u8::from(is_root);
        self.write_u32(PARENT_POINTER_OFFSET, 0);
        self.set_num_cells(0);
    }

    /// Place a cell at `cell_num`, shifting later cells one slot right
    ///
    /// The caller must have checked capacity and found `cell_num` with
    /// [`find_cell`](Self::find_cell).
    pub fn insert_cell(&mut self, cell_num: usize, key: u32, value: &[u8]) {
        let num_cells = self.num_cells();
        debug_assert!(num_cells < LEAF_NODE_MAX_CELLS);
        debug_assert!(cell_num <= num_cells);
        debug_assert_eq!(value.len(), LEAF_NODE_VALUE_SIZE);

        let start = cell_offset(cell_num);
        if cell_num < num_cells {
            let end = cell_offset(num_cells);
            self.buf
                .as_mut()
                .copy_within(start..end, start + LEAF_NODE_CELL_SIZE);
        }

        self.write_u32(start + LEAF_NODE_KEY_OFFSET, key);
        let value_start = start + LEAF_NODE_VALUE_OFFSET;
        self.buf.as_mut()[value_start..value_start + LEAF_NODE_VALUE_SIZE].copy_from_slice(value);
        self.set_num_cells(num_cells + 1);
    }

    fn set_num_cells(&mut self, num_cells: usize) {
        self.write_u32(LEAF_NODE_NUM_CELLS_OFFSET, num_cells as u32);
    }

    fn write_u32(&mut self, offset: usize, value: u32) {
        self.buf.as_mut()[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }
}

/// Byte offset of a cell within the page
fn cell_offset(cell_num: usize) -> usize {
    LEAF_NODE_HEADER_SIZE + cell_num * LEAF_NODE_CELL_SIZE
}
