//! Firmware memory page images.
//!
//! The target controller stores its configuration in 16 pages of 2048 bytes.
//! Only the three 16×16 tables are mapped; every other byte stays zero.
//!
//! | Page index | XML `number` | Table | Offset | Scale |
//! |------------|--------------|-------|--------|-------|
//! | 3  | 4  | VE    | `0x0000` | ×1  |
//! | 9  | 10 | AFR   | `0x0000` | ×10 |
//! | 11 | 12 | Spark | `0x0000` | ×1  |
//!
//! Cells are written row-major (load row outer, RPM column inner), one
//! unsigned byte each, saturating to `0..=255`.

mod cursor;
mod decode;
mod encode;
mod layout;

use serde::{Deserialize, Serialize};

use crate::notice::Notice;

pub use cursor::ByteReader;
pub use decode::{decode_page_set, decode_table};
pub use encode::{EncodedPages, PageEncoder};
pub use layout::{layout_for, LayoutEntry, LAYOUT, TABLE_BYTES};

/// Number of pages in a page set.
pub const PAGE_COUNT: usize = 16;

/// Size of every page in bytes.
pub const PAGE_SIZE: usize = 2048;

/// Raw bytes of one page.
///
/// Buffers built by the encoder are always [`PAGE_SIZE`] long. Buffers handed
/// in by callers are not checked until they pass through
/// [`PageSet::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBuffer(Vec<u8>);

impl PageBuffer {
    pub fn zeroed() -> Self {
        Self(vec![0; PAGE_SIZE])
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the buffer is exactly [`PAGE_SIZE`] bytes.
    pub fn is_valid(&self) -> bool {
        self.0.len() == PAGE_SIZE
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl Default for PageBuffer {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// An ordered set of page buffers, index 0 first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSet {
    pages: Vec<PageBuffer>,
}

impl PageSet {
    /// Sixteen zero-filled pages.
    pub fn zeroed() -> Self {
        Self {
            pages: vec![PageBuffer::zeroed(); PAGE_COUNT],
        }
    }

    /// Wraps caller buffers as-is. Use [`PageSet::normalize`] before relying
    /// on the count or buffer lengths.
    pub fn from_buffers(pages: Vec<PageBuffer>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[PageBuffer] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&PageBuffer> {
        self.pages.get(index)
    }

    pub(crate) fn page_mut(&mut self, index: usize) -> Option<&mut PageBuffer> {
        self.pages.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// True when the set holds exactly 16 pages of 2048 bytes.
    pub fn is_valid(&self) -> bool {
        self.pages.len() == PAGE_COUNT && self.pages.iter().all(PageBuffer::is_valid)
    }

    /// Forces the set into 16 × 2048 bytes.
    ///
    /// Wrong-length buffers are replaced by zero pages, missing pages are
    /// appended as zero pages and surplus pages are dropped. Each repair is
    /// returned as a notice.
    pub fn normalize(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        if self.pages.len() != PAGE_COUNT {
            notices.push(Notice::PageCountMismatch {
                found: self.pages.len(),
            });
            self.pages.resize_with(PAGE_COUNT, PageBuffer::zeroed);
        }
        for (page, buffer) in self.pages.iter_mut().enumerate() {
            if !buffer.is_valid() {
                notices.push(Notice::BufferLengthViolation {
                    page,
                    length: buffer.len(),
                });
                *buffer = PageBuffer::zeroed();
            }
        }
        notices
    }

    pub fn into_buffers(self) -> Vec<PageBuffer> {
        self.pages
    }
}

impl Default for PageSet {
    fn default() -> Self {
        Self::zeroed()
    }
}
