//! Pagination window for list operations.
//!
//! A page covers rows `offset ..= offset + limit - 1`, the same inclusive
//! range a hosted table API takes. SQL callers use [`Page::limit`] and
//! [`Page::offset`] directly.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default page size for feeds and listings.
pub const DEFAULT_LIMIT: u32 = 10;

/// Default page size for chat history.
pub const DEFAULT_MESSAGE_LIMIT: u32 = 50;

/// Largest page a caller may request.
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Page {
    /// Build a page, clamping `limit` into `1..=MAX_LIMIT`.
    #[must_use]
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset,
        }
    }

    /// Build a page from optional query parameters, falling back to `default_limit`.
    #[must_use]
    pub fn from_query(limit: Option<u32>, offset: Option<u32>, default_limit: u32) -> Self {
        Self::new(limit.unwrap_or(default_limit), offset.unwrap_or(0))
    }

    /// First page of chat history.
    #[must_use]
    pub fn messages() -> Self {
        Self::new(DEFAULT_MESSAGE_LIMIT, 0)
    }

    /// Inclusive index of the last row in this page.
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.offset.saturating_add(self.limit).saturating_sub(1)
    }

    /// The page following this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset.saturating_add(self.limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_is_first_ten() {
        let page = Page::default();
        assert_eq!(page.limit, 10);
        assert_eq!(page.offset, 0);
        assert_eq!(page.end(), 9);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(50, 50)]
    #[case(100, 100)]
    #[case(1000, 100)]
    fn limit_is_clamped(#[case] requested: u32, #[case] expected: u32) {
        assert_eq!(Page::new(requested, 0).limit, expected);
    }

    #[test]
    fn next_advances_by_limit() {
        let page = Page::new(10, 0).next();
        assert_eq!(page.offset, 10);
        assert_eq!(page.end(), 19);
    }

    #[test]
    fn from_query_uses_default_limit() {
        assert_eq!(Page::from_query(None, None, DEFAULT_MESSAGE_LIMIT), Page::messages());
        assert_eq!(Page::from_query(Some(5), Some(20), 10), Page::new(5, 20));
    }
}
