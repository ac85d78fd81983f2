//! Pagination utilities for Hangar API responses.

use serde::{Deserialize, Serialize};

/// Page size used when a caller leaves [`ListOptions::limit`] at zero.
pub const DEFAULT_LIMIT: u32 = 25;

/// Pagination metadata attached to every list response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of items available on the server.
    #[serde(default)]
    pub count: u64,
    /// Maximum number of items in this page.
    #[serde(default)]
    pub limit: u32,
    /// Position of the first item of this page.
    #[serde(default)]
    pub offset: u64,
}

/// A page of results from the Hangar API.
///
/// Mirrors the `{pagination, result}` envelope returned by every list
/// endpoint. `result` keeps the order the server sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Pagination metadata.
    pub pagination: Pagination,
    /// The items on this page.
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,
}

impl<T> Page<T> {
    /// Wrap a bare array response into a single page covering all of it.
    #[must_use]
    pub fn from_items(result: Vec<T>) -> Self {
        let len = result.len();
        Self {
            pagination: Pagination {
                count: len as u64,
                limit: u32::try_from(len).unwrap_or(u32::MAX),
                offset: 0,
            },
            result,
        }
    }

    /// Whether items remain on the server past this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        let seen = self.pagination.offset + self.result.len() as u64;
        !self.result.is_empty() && seen < self.pagination.count
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            pagination: self.pagination,
            result: self.result.into_iter().map(f).collect(),
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.result.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.result.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.result.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.result.iter()
    }
}

/// Limit and offset for paginated requests.
///
/// A zero `limit` means "use [`DEFAULT_LIMIT`]".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum number of items to return.
    pub limit: u32,
    /// Starting position.
    pub offset: u64,
}

impl ListOptions {
    /// Options for a specific window.
    #[must_use]
    pub fn new(limit: u32, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// The limit actually sent to the server.
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        if self.limit == 0 {
            DEFAULT_LIMIT
        } else {
            self.limit
        }
    }

    /// Query parameters for this window, with the default limit applied.
    pub(crate) fn params(&self) -> PageParams {
        PageParams {
            limit: self.effective_limit(),
            offset: self.offset,
        }
    }
}

/// Wire form of [`ListOptions`]. Both fields are always sent.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct PageParams {
    pub limit: u32,
    pub offset: u64,
}

/// Serde predicate: skip optional filters that are unset or empty.
pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}
