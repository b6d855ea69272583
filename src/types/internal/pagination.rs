pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Normalized 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Build from raw query values. Missing values take the defaults and
    /// anything below 1 is clamped up to 1.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let clamp = |value: Option<i64>, default: u64| match value {
            Some(v) if v >= 1 => v as u64,
            Some(_) => 1,
            None => default,
        };
        Self {
            page: clamp(page, DEFAULT_PAGE),
            limit: clamp(limit, DEFAULT_LIMIT),
        }
    }

    /// Row offset of the first item, or None when it does not fit the
    /// signed 64-bit range the database binds offsets with
    pub fn offset(&self) -> Option<u64> {
        (self.page - 1)
            .checked_mul(self.limit)
            .filter(|offset| *offset <= i64::MAX as u64)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus the unpaged total
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub request: PageRequest,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        self.request.total_pages(self.total)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            request: self.request,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_missing() {
        let req = PageRequest::new(None, None);
        assert_eq!(req, PageRequest { page: 1, limit: 10 });
        assert_eq!(req.offset(), Some(0));
    }

    #[test]
    fn test_values_below_one_are_clamped() {
        let req = PageRequest::new(Some(0), Some(-5));
        assert_eq!(req, PageRequest { page: 1, limit: 1 });
    }

    #[test]
    fn test_offset_out_of_range() {
        let req = PageRequest::new(Some(i64::MAX), Some(100));
        assert_eq!(req.offset(), None);
        assert_eq!(req.total_pages(25), 1);

        // Largest offset that still binds
        let req = PageRequest {
            page: i64::MAX as u64 + 1,
            limit: 1,
        };
        assert_eq!(req.offset(), Some(i64::MAX as u64));
    }

    #[test]
    fn test_offset_and_total_pages() {
        let req = PageRequest::new(Some(3), Some(10));
        assert_eq!(req.offset(), Some(20));
        assert_eq!(req.total_pages(25), 3);
        assert_eq!(req.total_pages(30), 3);
        assert_eq!(req.total_pages(0), 0);
    }
}
