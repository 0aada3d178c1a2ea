//! Pagination utilities for service layer
//!
//! `PageRequest` validates 1-based page inputs and converts them to offset/limit.

use crate::errors::ServiceError;

const MAX_OFFSET: u64 = i64::MAX as u64;

/// Validated pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page index
    pub page_number: u64,
    /// items per page
    pub page_size: u64,
}

impl PageRequest {
    /// Page size is checked before page number.
    pub fn new(page_number: i64, page_size: i64) -> Result<Self, ServiceError> {
        if page_size < 1 {
            return Err(ServiceError::invalid("Page size invalid!"));
        }
        if page_number < 1 {
            return Err(ServiceError::invalid("Page number invalid!"));
        }
        Ok(Self { page_number: page_number as u64, page_size: page_size as u64 })
    }

    /// Rows to skip: `(page_number - 1) * page_size`, capped at `i64::MAX` so Postgres can bind it.
    pub fn skip(&self) -> u64 {
        (self.page_number - 1)
            .checked_mul(self.page_size)
            .map_or(MAX_OFFSET, |v| v.min(MAX_OFFSET))
    }

    pub fn take(&self) -> u64 { self.page_size }
}

impl Default for PageRequest {
    fn default() -> Self { Self { page_number: 1, page_size: 1 } }
}

#[cfg(test)]
mod tests {
    use super::PageRequest;
    use crate::errors::ServiceError;

    #[test]
    fn rejects_zero_and_negative_page_size() {
        for size in [0, -1, i64::MIN] {
            match PageRequest::new(1, size) {
                Err(ServiceError::InvalidArgument(msg)) => assert!(msg.contains("Page size")),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn rejects_zero_page_number() {
        match PageRequest::new(0, 10) {
            Err(ServiceError::InvalidArgument(msg)) => assert!(msg.contains("Page number")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn page_size_checked_first() {
        match PageRequest::new(0, 0) {
            Err(ServiceError::InvalidArgument(msg)) => assert!(msg.contains("Page size")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn skip_is_offset_of_first_row() {
        let p = PageRequest::new(3, 25).unwrap();
        assert_eq!(p.skip(), 50);
        assert_eq!(p.take(), 25);
        assert_eq!(PageRequest::new(1, 7).unwrap().skip(), 0);
    }

    #[test]
    fn skip_never_exceeds_bigint() {
        for (number, size) in [(i64::MAX, 2), (i64::MAX, i64::MAX), (2, i64::MAX), (i64::MAX / 2 + 2, 2)] {
            let p = PageRequest::new(number, size).unwrap();
            assert!(p.skip() <= i64::MAX as u64, "{number} x {size}");
        }
        assert_eq!(PageRequest::new(2, i64::MAX).unwrap().skip(), i64::MAX as u64);
    }

    #[test]
    fn default_is_first_single_row_page() {
        let d = PageRequest::default();
        assert_eq!((d.page_number, d.page_size), (1, 1));
    }
}
