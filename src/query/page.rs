//! Paginator
//!
//! Applies an offset/limit window to the sorted, filtered collection. The
//! window is clipped to the collection bounds; an offset past the end
//! yields an empty window. Negative offsets or limits are request errors,
//! never silently clamped.

use crate::error::{Error, Result};

/// Validated pagination window.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pagination {
    start: usize,
    limit: Option<usize>,
}

impl Pagination {
    /// Validate raw request pagination fields.
    ///
    /// `slice_size` of `None` means everything from `start_index` on.
    pub(crate) fn from_request(start_index: i64, slice_size: Option<i64>) -> Result<Self> {
        let invalid = || Error::InvalidPagination {
            start_index,
            slice_size,
        };
        let start = usize::try_from(start_index).map_err(|_| invalid())?;
        let limit = match slice_size {
            Some(size) => Some(usize::try_from(size).map_err(|_| invalid())?),
            None => None,
        };
        Ok(Self { start, limit })
    }

    /// Slice the window `[start, start+limit)` out of the items.
    pub(crate) fn window<T>(self, mut items: Vec<T>) -> Vec<T> {
        if self.start >= items.len() {
            return Vec::new();
        }
        let mut window: Vec<T> = items.drain(self.start..).collect();
        if let Some(limit) = self.limit {
            window.truncate(limit);
        }
        window
    }
}
