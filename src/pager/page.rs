//! In-memory page buffer

use super::PAGE_SIZE;

/// One cached page
///
/// Heap allocated so moving a page in and out of the cache never copies
/// the buffer.
#[derive(Debug, Clone)]
pub struct Page {
    buffer: Box<[u8; PAGE_SIZE]>,
}

impl Page {
    /// A page of zero bytes
    pub fn zeroed() -> Self {
        Self {
            buffer: Box::new([0u8; PAGE_SIZE]),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..]
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.buffer[..]
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::zeroed()
    }
}
