//! B-Tree Node Module
//!
//! Byte layout of tree nodes inside a page, and the leaf node view.
//! Only leaf nodes exist so far. The root page is always a leaf.
//!
//! ## Leaf Node Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ Common Header (6 bytes)                                     │
//! │   NodeType: u8 (1) | IsRoot: u8 (1) | Parent: u32 (4)       │
//! ├─────────────────────────────────────────────────────────────┤
//! │ Leaf Header (4 bytes)                                       │
//! │   NumCells: u32 (4)                                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │ Cells (295 bytes each, ascending by key)                    │
//! │   [Key: u32 (4)][Row (291)]                                 │
//! │   ... repeated NumCells times ...                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers are little-endian.

mod leaf;
mod overflow;

pub use leaf::LeafNode;
pub use overflow::{OverflowPolicy, RejectWhenFull};

use crate::error::LeafError;
use crate::pager::PAGE_SIZE;
use crate::row::ROW_SIZE;

// =============================================================================
// Common Node Header
// =============================================================================

pub const NODE_TYPE_SIZE: usize = std::mem::size_of::<u8>();
pub const NODE_TYPE_OFFSET: usize = 0;
pub const IS_ROOT_SIZE: usize = std::mem::size_of::<u8>();
pub const IS_ROOT_OFFSET: usize = NODE_TYPE_OFFSET + NODE_TYPE_SIZE;
pub const PARENT_POINTER_SIZE: usize = std::mem::size_of::<u32>();
pub const PARENT_POINTER_OFFSET: usize = IS_ROOT_OFFSET + IS_ROOT_SIZE;
pub const COMMON_NODE_HEADER_SIZE: usize = NODE_TYPE_SIZE + IS_ROOT_SIZE + PARENT_POINTER_SIZE;

// =============================================================================
// Leaf Node Header
// =============================================================================

pub const LEAF_NODE_NUM_CELLS_SIZE: usize = std::mem::size_of::<u32>();
pub const LEAF_NODE_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
pub const LEAF_NODE_HEADER_SIZE: usize = COMMON_NODE_HEADER_SIZE + LEAF_NODE_NUM_CELLS_SIZE;

// =============================================================================
// Leaf Node Body
// =============================================================================

pub const LEAF_NODE_KEY_SIZE: usize = std::mem::size_of::<u32>();
pub const LEAF_NODE_KEY_OFFSET: usize = 0;
pub const LEAF_NODE_VALUE_SIZE: usize = ROW_SIZE;
pub const LEAF_NODE_VALUE_OFFSET: usize = LEAF_NODE_KEY_OFFSET + LEAF_NODE_KEY_SIZE;
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + LEAF_NODE_VALUE_SIZE;
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;

/// Cells that fit in one leaf
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE;

/// Node kind tag stored in the first header byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeType {
    Internal = 0,
    Leaf = 1,
}

impl TryFrom<u8> for NodeType {
    type Error = LeafError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(NodeType::Internal),
            1 => Ok(NodeType::Leaf),
            other => Err(LeafError::CorruptNode(format!("unknown node type {}", other))),
        }
    }
}
