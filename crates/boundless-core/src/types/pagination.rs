//! Pagination parameters for list endpoints.

use serde::{Deserialize, Serialize};

/// Default number of items returned by a list query.
const DEFAULT_LIMIT: i64 = 100;
/// Maximum number of items a single list query may return.
const MAX_LIMIT: i64 = 100;

/// Offset/limit query parameters for paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageParams {
    /// Number of items to skip from the start of the result set.
    #[serde(default)]
    pub skip: i64,
    /// Maximum number of items to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl PageParams {
    /// Create new page parameters.
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }

    /// The SQL `OFFSET` value (never negative).
    pub fn offset(&self) -> i64 {
        self.skip.max(0)
    }

    /// The SQL `LIMIT` value, clamped to the allowed range.
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, MAX_LIMIT)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamping() {
        let page = PageParams::new(-5, 0);
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 1);

        let page = PageParams::new(10, 5000);
        assert_eq!(page.offset(), 10);
        assert_eq!(page.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_defaults() {
        let page = PageParams::default();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), DEFAULT_LIMIT);
    }
}
