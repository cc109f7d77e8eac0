//! Pagination utilities for paginated IntelOwl collections.

use serde::{Deserialize, Serialize};

/// Wire shape of a paginated collection response.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PageEnvelope<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// A page of results from the IntelOwl API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    /// Current page number (1-indexed).
    pub page: u32,
    /// Requested number of items per page.
    pub page_size: u32,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether there are more pages.
    pub has_more: bool,
}

impl<T> Page<T> {
    pub(crate) fn from_envelope(envelope: PageEnvelope<T>, page: u32, page_size: u32) -> Self {
        Self::new(
            envelope.results,
            page,
            page_size,
            envelope.count,
            envelope.total_pages,
        )
    }

    /// Create a new page from items and pagination info.
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total: u64, total_pages: u32) -> Self {
        let has_more = page < total_pages && !items.is_empty();
        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
            has_more,
        }
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_more: self.has_more,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
