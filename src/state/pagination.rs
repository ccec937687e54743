/// Page-by-page reveal tracking for a result set
///
/// A tracker is bound to one result set for its whole life. When the active
/// result set changes, the coordinator builds a new tracker instead of
/// rewinding the old one.
use crate::error::{BrowserError, Result};

/// Page size used by the reference catalog
pub const DEFAULT_PAGE_SIZE: usize = 36;

/// Number of previews revealed per "load more" step. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(BrowserError::InvalidPageSize(size));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

/// Counts how many items of a result set of length `len` have been revealed.
///
/// `revealed` only grows, in steps of one page. It may overshoot `len`;
/// callers stop rendering when an index reaches `len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationTracker {
    page_size: usize,
    len: usize,
    revealed: usize,
}

impl PaginationTracker {
    pub fn new(page_size: PageSize, len: usize) -> Self {
        Self {
            page_size: page_size.get(),
            len,
            revealed: 0,
        }
    }

    /// Move one page forward
    pub fn advance(&mut self) {
        self.revealed = self.revealed.saturating_add(self.page_size);
    }

    /// Items still hidden once the upcoming page has been shown.
    ///
    /// This deliberately subtracts one page more than the revealed count:
    /// the value labels the load-more control ahead of its next reveal.
    pub fn remaining_count(&self) -> usize {
        self.len
            .saturating_sub(self.page_size)
            .saturating_sub(self.revealed)
    }

    /// First index of the next slice
    pub fn lower_bound(&self) -> usize {
        self.revealed
    }

    /// Exclusive end of the next slice, not capped at the result set length
    pub fn upper_bound(&self) -> usize {
        self.revealed.saturating_add(self.page_size)
    }

    /// True once every index of the next slice lies past the end
    pub fn is_exhausted(&self) -> bool {
        self.lower_bound() >= self.len
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}
