use tracing::instrument;

use crate::error::ClientError;
use crate::models::{
    Book, BookCopy, BookCreate, BookSearchParams, BookSummary, BookUpdate, IsbnExists,
    MessageResponse,
};
use crate::paging::{PageRequest, PagedResponse};
use crate::transport::{ApiClient, QueryParams, encode_segment};

const BASE_PATH: &str = "/books";

/// Catalog reads and admin book maintenance.
#[derive(Debug, Clone)]
pub struct BooksService {
    api: ApiClient,
}

impl BooksService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /books` (paged).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn list(&self, page: &PageRequest) -> Result<PagedResponse<Book>, ClientError> {
        Ok(self.api.get(BASE_PATH, page.to_params()).await?)
    }

    /// `GET /books/summary` (paged).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn list_summary(
        &self,
        page: &PageRequest,
    ) -> Result<PagedResponse<BookSummary>, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/summary"), page.to_params())
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure or unknown id.
    pub async fn get(&self, id: i64) -> Result<Book, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/{id}"), QueryParams::new())
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure or unknown ISBN.
    pub async fn get_by_isbn(&self, isbn: &str) -> Result<Book, ClientError> {
        let path = format!("{BASE_PATH}/isbn/{}", encode_segment(isbn));
        Ok(self.api.get(&path, QueryParams::new()).await?)
    }

    /// `GET /books/search`; unset filters are not sent.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    #[instrument(level = "debug", skip_all, fields(keyword = ?params.keyword))]
    pub async fn search(
        &self,
        params: &BookSearchParams,
    ) -> Result<PagedResponse<Book>, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/search"), search_params(params))
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the book.
    pub async fn create(&self, book: &BookCreate) -> Result<MessageResponse, ClientError> {
        Ok(self
            .api
            .post(&format!("{BASE_PATH}/create"), Some(book))
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the update.
    pub async fn update(&self, id: i64, book: &BookUpdate) -> Result<MessageResponse, ClientError> {
        Ok(self
            .api
            .put(&format!("{BASE_PATH}/{id}"), Some(book))
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the delete.
    pub async fn delete(&self, id: i64) -> Result<MessageResponse, ClientError> {
        Ok(self.api.delete(&format!("{BASE_PATH}/{id}")).await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn exists_by_isbn(&self, isbn: &str) -> Result<bool, ClientError> {
        let path = format!("{BASE_PATH}/exists/isbn/{}", encode_segment(isbn));
        let exists: IsbnExists = self.api.get(&path, QueryParams::new()).await?;
        Ok(exists.exists)
    }

    /// Copies of a title in backend order (flat array).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn copies(&self, book_id: i64) -> Result<Vec<BookCopy>, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/{book_id}/copies"), QueryParams::new())
            .await?)
    }
}

fn search_params(params: &BookSearchParams) -> QueryParams {
    QueryParams::new()
        .with_opt("keyword", params.keyword.as_deref())
        .with_opt("author", params.author.as_deref())
        .with_opt("category", params.category.as_deref())
        .with_opt("language", params.language.as_deref())
        .with_opt("available", params.available)
        .with_opt("page", params.page)
        .with_opt("size", params.size)
        .with_opt("sort", params.sort.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_skip_unset_filters() {
        let params = BookSearchParams {
            keyword: Some("dune".to_string()),
            available: Some(true),
            page: Some(0),
            ..BookSearchParams::default()
        };
        let query = search_params(&params);
        let pairs: Vec<_> = query.present().collect();
        assert_eq!(
            pairs,
            vec![("keyword", "dune"), ("available", "true"), ("page", "0")]
        );
    }

    #[test]
    fn test_search_params_empty_when_nothing_set() {
        assert!(search_params(&BookSearchParams::default()).is_empty());
    }
}
