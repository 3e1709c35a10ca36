// ABOUTME: Offset pagination module for title search and trash listings
// ABOUTME: Provides lenient page/limit parsing that falls back to defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE};

/// A 1-based page request
///
/// Both fields are always at least 1. Out-of-range or unparseable input is
/// never an error: it falls back to the defaults instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number, starting at 1
    pub page: u32,
    /// Items per page
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Create a page request, replacing values below 1 with the defaults
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self::with_default_limit(page, limit, DEFAULT_LIMIT)
    }

    /// Same as [`PageRequest::new`] with a caller-chosen default limit
    #[must_use]
    pub fn with_default_limit(page: Option<i64>, limit: Option<i64>, default_limit: u32) -> Self {
        let default_limit = default_limit.max(1);
        Self {
            page: clamp_or(page, DEFAULT_PAGE),
            limit: clamp_or(limit, default_limit),
        }
    }

    /// Parse raw query-string values, ignoring anything that is not an integer
    #[must_use]
    pub fn parse_lenient(page: Option<&str>, limit: Option<&str>, default_limit: u32) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|s| s.trim().parse::<i64>().ok());
        Self::with_default_limit(parse(page), parse(limit), default_limit)
    }

    /// Number of items to skip before this page
    #[must_use]
    pub const fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.limit as usize)
    }

    /// Slice one page out of an already ordered sequence
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.limit as usize)
            .collect()
    }
}

fn clamp_or(value: Option<i64>, default: u32) -> u32 {
    match value {
        Some(v) if v >= 1 => u32::try_from(v).unwrap_or(u32::MAX),
        _ => default,
    }
}

/// One page of results plus the size of the filtered set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in natural order
    pub items: Vec<T>,
    /// Page number that was served
    pub page: u32,
    /// Page size that was applied
    pub limit: u32,
    /// Number of items matching the filter across all pages
    pub total: usize,
}

impl<T> Page<T> {
    /// Whether another page follows this one
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.total > self.page as usize * self.limit as usize
    }

    /// Transform the items while keeping the pagination metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let request = PageRequest::new(None, None);
        assert_eq!(request, PageRequest { page: 1, limit: 20 });
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_non_positive_values_fall_back() {
        let request = PageRequest::new(Some(0), Some(-3));
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 20);
    }

    #[test]
    fn test_lenient_parse_ignores_garbage() {
        let request = PageRequest::parse_lenient(Some("two"), Some("5"), 20);
        assert_eq!(request, PageRequest { page: 1, limit: 5 });

        let request = PageRequest::parse_lenient(Some(" 3 "), Some("ten"), 12);
        assert_eq!(request, PageRequest { page: 3, limit: 12 });
    }

    #[test]
    fn test_apply_slices_second_page() {
        let request = PageRequest::new(Some(2), Some(5));
        let page = request.apply(1..=12);
        assert_eq!(page, vec![6, 7, 8, 9, 10]);
        assert_eq!(request.offset(), 5);
    }

    #[test]
    fn test_apply_past_the_end_is_empty() {
        let request = PageRequest::new(Some(4), Some(5));
        assert!(request.apply(1..=12).is_empty());
    }

    #[test]
    fn test_has_more() {
        let page = Page {
            items: vec![1, 2],
            page: 1,
            limit: 2,
            total: 3,
        };
        assert!(page.has_more());
        let page = page.map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
    }
}
