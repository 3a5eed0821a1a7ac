//! Page/limit windowing for list endpoints.
//!
//! `page` and `limit` arrive as raw query strings and are never rejected.
//! The window is computed as `start = (page - 1) * limit`, `end = start + limit`
//! and resolved against the list length with relative-index semantics:
//!
//! - a negative bound counts back from the end of the list (floored at 0)
//! - a bound past the end is clamped to the list length
//! - `end <= start` yields an empty page
//! - fractional values are accepted; each bound is truncated toward zero
//! - a value that does not parse as a number yields an empty page

use std::ops::Range;

/// Page used when the client does not send one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the client does not send one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Unresolved slice bounds for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    start: i64,
    end: i64,
}

impl Pagination {
    /// A window that always selects nothing.
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Window for a 1-based `page` of `limit` items.
    pub fn new(page: i64, limit: i64) -> Self {
        let start = page.saturating_sub(1).saturating_mul(limit);
        Self {
            start,
            end: start.saturating_add(limit),
        }
    }

    /// Build a window from optional raw query values.
    ///
    /// Missing values take their defaults; unparseable values select nothing.
    /// Values may be fractional (`page=1.5&limit=2` selects `1..3`).
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = parse_or_default(page, DEFAULT_PAGE);
        let limit = parse_or_default(limit, DEFAULT_LIMIT);

        match (page, limit) {
            (Some(page), Some(limit)) => {
                let start = (page - 1.0) * limit;
                Self {
                    start: truncate(start),
                    end: truncate(start + limit),
                }
            }
            _ => Self::EMPTY,
        }
    }

    /// Resolve the window against a list of `len` items.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = resolve_bound(self.start, len);
        let end = resolve_bound(self.end, len);
        start..end.max(start)
    }

    /// Keep only the items inside the window.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let range = self.range(items.len());
        items
            .into_iter()
            .skip(range.start)
            .take(range.len())
            .collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

fn parse_or_default(raw: Option<&str>, default: i64) -> Option<f64> {
    match raw {
        Some(value) => value.trim().parse().ok(),
        None => Some(default as f64),
    }
}

/// Truncate toward zero; NaN selects index 0 and infinities saturate.
fn truncate(bound: f64) -> i64 {
    if bound.is_nan() { 0 } else { bound.trunc() as i64 }
}

fn resolve_bound(bound: i64, len: usize) -> usize {
    let len_i64 = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = if bound < 0 {
        len_i64.saturating_add(bound).max(0)
    } else {
        bound.min(len_i64)
    };
    usize::try_from(resolved).unwrap_or(0)
}
