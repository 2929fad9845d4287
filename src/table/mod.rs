//! Table Module
//!
//! The engine's root handle: one pager, one root leaf.
//!
//! ## Responsibilities
//! - Initialize an empty root leaf for a new file, or check the header of
//!   an existing one
//! - Sorted, unique-key insertion with capacity enforcement
//! - Key-ordered scans and a textual dump of the node
//! - Flush everything back to the file on close

mod cursor;

use std::path::Path;

use tracing::{debug, info};

use crate::btree::{LeafNode, NodeType, OverflowPolicy, RejectWhenFull, LEAF_NODE_MAX_CELLS};
use crate::config::{Config, FlushPolicy};
use crate::error::{LeafError, Result};
use crate::pager::Pager;
use crate::row::{self, Row};

pub use cursor::Cursor;

/// A single-table store backed by one database file
pub struct Table {
    /// Table configuration
    config: Config,

    /// Sole owner of the file and page cache
    pager: Pager,

    /// Page holding the root leaf
    root_page_num: u32,

    /// Consulted when the target leaf is full
    overflow: Box<dyn OverflowPolicy>,
}

impl Table {
    /// Open or create a table with the given config
    ///
    /// A full leaf rejects further inserts with `TableFull`.
    pub fn open(config: Config) -> Result<Self> {
        Self::open_with_policy(config, Box::new(RejectWhenFull))
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified database file
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().db_path(path).build();
        Self::open(config)
    }

    /// Open with a custom overflow policy
    ///
    /// On startup:
    /// 1. Open the file and validate its page grid
    /// 2. New file: write an empty root leaf into page 0
    /// 3. Existing file: load page 0 and check its header
    pub fn open_with_policy(config: Config, overflow: Box<dyn OverflowPolicy>) -> Result<Self> {
        let mut pager = Pager::open(&config.db_path, config.max_pages)?;
        let root_page_num = 0;

        if pager.num_pages() == 0 {
            let page = pager.get_page(root_page_num)?;
            LeafNode::new(page.as_bytes_mut()).initialize(true);
            pager.mark_dirty(root_page_num);
            info!(path = %config.db_path.display(), "initialized empty table");
        } else {
            let page = pager.get_page(root_page_num)?;
            let node = LeafNode::new(page.as_bytes());

            if node.node_type()? != NodeType::Leaf {
                return Err(LeafError::CorruptNode(format!(
                    "root page {} is not a leaf",
                    root_page_num
                )));
            }
            if !node.is_root() {
                return Err(LeafError::CorruptNode(format!(
                    "root page {} is not flagged as root",
                    root_page_num
                )));
            }
            let num_cells = node.num_cells();
            if num_cells > LEAF_NODE_MAX_CELLS {
                return Err(LeafError::CorruptNode(format!(
                    "root leaf claims {} cells, capacity is {}",
                    num_cells, LEAF_NODE_MAX_CELLS
                )));
            }

            info!(
                path = %config.db_path.display(),
                num_pages = pager.num_pages(),
                rows = num_cells,
                "opened existing table"
            );
        }

        Ok(Self {
            config,
            pager,
            root_page_num,
            overflow,
        })
    }

    /// Insert a row, keeping cells sorted by key
    ///
    /// Steps:
    /// 1. Validate and encode the row (no state touched on failure)
    /// 2. Consult the overflow policy if the leaf is full
    /// 3. Binary search for the slot; reject an existing key
    /// 4. Shift later cells right and write the new cell
    pub fn insert(&mut self, row: &Row) -> Result<()> {
        let (key, value) = row::encode_keyed(row)?;

        let mut page_num = self.root_page_num;
        if self.leaf_is_full(page_num)? {
            page_num = self.overflow.on_full(&mut self.pager, page_num)?;
        }

        let page = self.pager.get_page(page_num)?;
        let mut node = LeafNode::new(page.as_bytes_mut());
        if node.node_type()? != NodeType::Leaf || node.is_full() {
            return Err(LeafError::CorruptNode(format!(
                "page {} cannot take another cell",
                page_num
            )));
        }
        let cell_num = match node.find_cell(key) {
            Ok(_) => return Err(LeafError::DuplicateKey(key)),
            Err(cell_num) => cell_num,
        };
        node.insert_cell(cell_num, key, &value);
        self.pager.mark_dirty(page_num);

        debug!(key, page_num, cell_num, "row inserted");

        if self.config.flush_policy == FlushPolicy::EveryInsert {
            self.pager.flush_dirty()?;
        }

        Ok(())
    }

    /// All rows in ascending key order
    ///
    /// The cursor is lazy; call again after further inserts to see them.
    pub fn select_all(&mut self) -> Result<Cursor<'_>> {
        Cursor::start(&mut self.pager, self.root_page_num)
    }

    /// Human-readable dump of the root node: a header line, then one
    /// `index : key` line per cell
    pub fn describe(&mut self) -> Result<Vec<String>> {
        let page = self.pager.get_page(self.root_page_num)?;
        let node = LeafNode::new(page.as_bytes());

        let mut lines = Vec::with_capacity(node.num_cells() + 1);
        lines.push(format!("leaf (size {}).", node.num_cells()));
        lines.extend(
            node.keys()
                .enumerate()
                .map(|(cell_num, key)| format!("\t{} : {}", cell_num, key)),
        );
        Ok(lines)
    }

    /// Number of stored rows
    pub fn row_count(&mut self) -> Result<usize> {
        let page = self.pager.get_page(self.root_page_num)?;
        Ok(LeafNode::new(page.as_bytes()).num_cells())
    }

    /// Close the table gracefully
    ///
    /// Flushes every cached page and syncs the file
    pub fn close(self) -> Result<()> {
        info!(path = %self.config.db_path.display(), "closing table");
        self.pager.close()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the pager
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn leaf_is_full(&mut self, page_num: u32) -> Result<bool> {
        let page = self.pager.get_page(page_num)?;
        Ok(LeafNode::new(page.as_bytes()).is_full())
    }
}
