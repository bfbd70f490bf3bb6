use tracing::warn;

use crate::error::ClientError;
use crate::models::{
    Favorite, FavoriteCheck, FavoriteCount, FavoriteCreate, FavoriteEntry, MessageResponse,
};
use crate::paging::{PageRequest, PagedResponse};
use crate::transport::{ApiClient, QueryParams};

const BASE_PATH: &str = "/favorites";

/// Per-user bookmarked titles.
#[derive(Debug, Clone)]
pub struct FavoritesService {
    api: ApiClient,
}

impl FavoritesService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn user_favorites(
        &self,
        page: &PageRequest,
    ) -> Result<PagedResponse<FavoriteEntry>, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/user"), page.to_params())
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend refuses (e.g. already a favorite).
    pub async fn add(&self, book_id: i64) -> Result<Favorite, ClientError> {
        Ok(self
            .api
            .post(BASE_PATH, Some(&FavoriteCreate { book_id }))
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn remove(&self, favorite_id: i64) -> Result<MessageResponse, ClientError> {
        Ok(self
            .api
            .delete(&format!("{BASE_PATH}/{favorite_id}"))
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn remove_by_book(&self, book_id: i64) -> Result<MessageResponse, ClientError> {
        Ok(self
            .api
            .delete(&format!("{BASE_PATH}/book/{book_id}"))
            .await?)
    }

    /// Whether `book_id` is a favorite. Lookup failures read as `false`.
    pub async fn is_favorite(&self, book_id: i64) -> bool {
        match self
            .api
            .get::<FavoriteCheck>(&format!("{BASE_PATH}/check/{book_id}"), QueryParams::new())
            .await
        {
            Ok(check) => check.is_favorite,
            Err(error) => {
                warn!(book_id, error = %error, "Favorite check failed; treating as not favorite");
                false
            }
        }
    }

    /// Number of favorites. Lookup failures read as `0`.
    pub async fn count(&self) -> u64 {
        match self
            .api
            .get::<FavoriteCount>(&format!("{BASE_PATH}/count"), QueryParams::new())
            .await
        {
            Ok(count) => count.count,
            Err(error) => {
                warn!(error = %error, "Favorite count failed; treating as zero");
                0
            }
        }
    }
}
