use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexCategory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Full catalog entry for a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub available_quantity: i64,
    #[serde(default)]
    pub total_quantity: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "coverURL")]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub publishers: Vec<Publisher>,
    #[serde(default)]
    pub index_category: Option<IndexCategory>,
}

/// Lightweight listing row from `GET /books/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub publishers: Vec<String>,
    #[serde(default, rename = "coverURL")]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub available_quantity: i64,
    #[serde(default)]
    pub total_quantity: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCreate {
    pub isbn: String,
    pub title: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "coverURL", skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub author_names: Vec<String>,
    pub publisher_names: Vec<String>,
    pub category_name: String,
    pub total_quantity: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "coverURL", skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

/// Filters for `GET /books/search`. Unset filters are omitted from the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSearchParams {
    pub keyword: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub available: Option<bool>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsbnExists {
    pub exists: bool,
}

/// Physical copy status. Authoritative on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookCopyStatus {
    Available,
    Borrowed,
    Maintenance,
    Scrapped,
    Discarded,
    #[serde(other)]
    Unknown,
}

/// Title reference embedded in a copy entity (`{"book": {"id": ..}}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyBookRef {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
}

/// One trackable unit of a title.
///
/// Only `id` and `status` are required; the owning title arrives either as a
/// flat `bookId` or as a nested `book` object depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCopy {
    pub id: i64,
    #[serde(default)]
    pub book_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<CopyBookRef>,
    #[serde(default)]
    pub book_title: Option<String>,
    #[serde(default)]
    pub book_isbn: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    pub status: BookCopyStatus,
    #[serde(default)]
    pub purchase_price: Option<f64>,
    #[serde(default)]
    pub purchase_time: Option<String>,
    #[serde(default)]
    pub last_maintenance: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}

impl BookCopy {
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == BookCopyStatus::Available
    }

    /// Owning title id from whichever shape the backend sent.
    #[must_use]
    pub fn owning_book_id(&self) -> Option<i64> {
        self.book_id.or_else(|| self.book.as_ref().map(|book| book.id))
    }
}
