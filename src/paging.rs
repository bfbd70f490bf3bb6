//! Paged envelopes and client-side pagination emulation.
//!
//! Some endpoints return a native page envelope, others (current borrows,
//! borrow history) return a flat array. [`paginate`] builds the same envelope
//! for the flat case so callers never need to know which kind they got.

use serde::{Deserialize, Serialize};

use crate::transport::QueryParams;

/// Default page size used when a caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A window over a larger collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
    pub number: u32,
    pub size: u32,
    pub number_of_elements: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pageable: Option<serde_json::Value>,
}

impl<T> PagedResponse<T> {
    /// Returns `true` when the window holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Maps the content while keeping the envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResponse<U> {
        PagedResponse {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
            number: self.number,
            size: self.size,
            number_of_elements: self.number_of_elements,
            pageable: self.pageable,
        }
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    /// Backend sort expression, e.g. `title,asc`.
    pub sort: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl PageRequest {
    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: None,
        }
    }

    #[must_use]
    pub fn sorted(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Query parameters understood by the backend's paged endpoints.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .with("page", self.page)
            .with("size", self.size.max(1))
            .with_opt("sort", self.sort.as_deref())
    }
}

/// Emulates a page window over a fully materialized list.
///
/// `size` is floored to 1. `total_pages` is at least 1 so an empty list
/// yields a single page that is both first and last. Pages past the end
/// produce empty content with the same envelope arithmetic.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: u32, size: u32) -> PagedResponse<T> {
    let size = size.max(1);
    let total_elements = items.len() as u64;
    let total_pages = u32::try_from(total_elements.div_ceil(u64::from(size)))
        .unwrap_or(u32::MAX)
        .max(1);

    let start = usize::try_from(u64::from(page) * u64::from(size)).unwrap_or(usize::MAX);
    let content: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(size as usize)
        .collect();
    let number_of_elements = u32::try_from(content.len()).unwrap_or(u32::MAX);

    PagedResponse {
        content,
        total_elements,
        total_pages,
        first: page == 0,
        last: page >= total_pages - 1,
        number: page,
        size,
        number_of_elements,
        pageable: None,
    }
}
