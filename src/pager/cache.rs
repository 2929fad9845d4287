//! Pager
//!
//! Page cache over the database file.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{LeafError, Result};

use super::{Page, PAGE_SIZE};

/// Owns the database file and every cached page
///
/// Callers get scoped `&mut Page` borrows and must not hold on to them
/// across operations.
pub struct Pager {
    /// Open database file
    file: File,

    /// Path the file was opened from (for logging)
    path: PathBuf,

    /// Length of the file when it was opened
    file_length: u64,

    /// Pages known to exist, on disk or allocated since open
    num_pages: u32,

    /// Page numbers at or beyond this are rejected
    max_pages: u32,

    /// Cached pages keyed by page number
    pages: HashMap<u32, Page>,

    /// Pages modified since their last flush
    dirty: BTreeSet<u32>,
}

impl Pager {
    /// Open or create the database file
    ///
    /// Fails with `CorruptFile` if the file ends in a partial page.
    pub fn open(path: &Path, max_pages: u32) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        let file_length = file.metadata()?.len();

        if file_length % PAGE_SIZE as u64 != 0 {
            warn!(path = %path.display(), file_length, "database file ends in a partial page");
            return Err(LeafError::CorruptFile {
                length: file_length,
            });
        }

        let num_pages = page_count(file_length)?;
        debug!(path = %path.display(), file_length, num_pages, "pager opened");

        Ok(Self {
            file,
            path: path.to_path_buf(),
            file_length,
            num_pages,
            max_pages,
            pages: HashMap::new(),
            dirty: BTreeSet::new(),
        })
    }

    /// Get a page, loading it from the file on a cache miss
    ///
    /// Pages past the end of the file come back zeroed and extend
    /// `num_pages`. Only pages wholly inside the file are read from it.
    pub fn get_page(&mut self, page_num: u32) -> Result<&mut Page> {
        if page_num >= self.max_pages {
            warn!(page_num, max_pages = self.max_pages, "page number out of bounds");
            return Err(LeafError::PagerOutOfBounds {
                page_num,
                max_pages: self.max_pages,
            });
        }

        match self.pages.entry(page_num) {
            Entry::Occupied(o) => Ok(o.into_mut()),
            Entry::Vacant(v) => {
                let mut page = Page::zeroed();

                let offset = page_num as u64 * PAGE_SIZE as u64;

                if offset + PAGE_SIZE as u64 <= self.file_length {
                    self.file.seek(SeekFrom::Start(offset))?;
                    self.file.read_exact(page.as_bytes_mut())?;
                    debug!(page_num, "page loaded from file");
                } else {
                    self.num_pages = self.num_pages.max(page_num + 1);
                    debug!(page_num, "fresh page allocated");
                }

                Ok(v.insert(page))
            }
        }
    }

    /// Record that a cached page differs from its on-disk copy
    pub fn mark_dirty(&mut self, page_num: u32) {
        self.dirty.insert(page_num);
    }

    /// Write the full contents of a cached page back to the file
    pub fn flush(&mut self, page_num: u32) -> Result<()> {
        let page = self
            .pages
            .get(&page_num)
            .ok_or(LeafError::PageNotCached(page_num))?;

        self.file
            .seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))?;
        self.file.write_all(page.as_bytes())?;
        self.dirty.remove(&page_num);

        debug!(page_num, "page flushed");
        Ok(())
    }

    /// Flush only pages marked dirty
    pub fn flush_dirty(&mut self) -> Result<()> {
        let dirty: Vec<u32> = self.dirty.iter().copied().collect();
        for page_num in dirty {
            self.flush(page_num)?;
        }
        Ok(())
    }

    /// Flush every cached page, in page order
    pub fn flush_all(&mut self) -> Result<()> {
        let mut cached: Vec<u32> = self.pages.keys().copied().collect();
        cached.sort_unstable();
        for page_num in cached {
            self.flush(page_num)?;
        }
        Ok(())
    }

    /// Flush everything, sync to disk and release the file
    pub fn close(mut self) -> Result<()> {
        self.flush_all()?;
        self.file.sync_all()?;
        debug!(path = %self.path.display(), num_pages = self.num_pages, "pager closed");
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// File length observed at open
    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    pub fn is_cached(&self, page_num: u32) -> bool {
        self.pages.contains_key(&page_num)
    }

    pub fn is_dirty(&self, page_num: u32) -> bool {
        self.dirty.contains(&page_num)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Number of whole pages in a file of `file_length` bytes
fn page_count(file_length: u64) -> Result<u32> {
    u32::try_from(file_length / PAGE_SIZE as u64).map_err(|_| LeafError::CorruptFile {
        length: file_length,
    })
}
