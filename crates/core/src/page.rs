//! 1-indexed pagination window over an ordered result set.

use core::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Upper bound on `size` accepted by [`PageRequest::new`].
pub const MAX_PAGE_SIZE: i64 = 1000;

/// A validated page request.
///
/// `number` is 1-indexed: page 1 covers records `[0, size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    pub fn new(number: i64, size: i64) -> DomainResult<Self> {
        if number < 1 {
            return Err(DomainError::validation("pageNumber must be >= 1"));
        }
        if size < 1 {
            return Err(DomainError::validation("pageSize must be >= 1"));
        }
        if size > MAX_PAGE_SIZE {
            return Err(DomainError::validation(format!(
                "pageSize must be <= {MAX_PAGE_SIZE}"
            )));
        }
        let number = u32::try_from(number)
            .map_err(|_| DomainError::validation("pageNumber is too large"))?;
        let size = u32::try_from(size)
            .map_err(|_| DomainError::validation("pageSize is too large"))?;

        Ok(Self { number, size })
    }

    /// Number of records skipped before this page (SQL `OFFSET`).
    pub fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }

    /// Maximum number of records on this page (SQL `LIMIT`).
    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }

    /// Index range of this page within a collection of `len` records.
    ///
    /// Pages past the end yield an empty range.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX).min(len);
        let end = start.saturating_add(usize::try_from(self.size).unwrap_or(usize::MAX)).min(len);
        start..end
    }
}
