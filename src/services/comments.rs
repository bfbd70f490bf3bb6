use crate::error::ClientError;
use crate::models::{Comment, CommentCreate, CommentUpdate, MessageResponse};
use crate::paging::{PageRequest, PagedResponse};
use crate::transport::{ApiClient, QueryParams};

const BASE_PATH: &str = "/comments";

/// Reviews and ratings on titles.
#[derive(Debug, Clone)]
pub struct CommentsService {
    api: ApiClient,
}

impl CommentsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn by_book(
        &self,
        book_id: i64,
        page: &PageRequest,
    ) -> Result<PagedResponse<Comment>, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/book/{book_id}"), page.to_params())
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn by_user(
        &self,
        user_id: i64,
        page: &PageRequest,
    ) -> Result<PagedResponse<Comment>, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/user/{user_id}"), page.to_params())
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn mine(&self, page: &PageRequest) -> Result<PagedResponse<Comment>, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/me"), page.to_params())
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn get(&self, id: i64) -> Result<Comment, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/{id}"), QueryParams::new())
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the comment.
    pub async fn create(&self, comment: &CommentCreate) -> Result<MessageResponse, ClientError> {
        Ok(self.api.post(BASE_PATH, Some(comment)).await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the update.
    pub async fn update(
        &self,
        id: i64,
        comment: &CommentUpdate,
    ) -> Result<MessageResponse, ClientError> {
        Ok(self
            .api
            .put(&format!("{BASE_PATH}/{id}"), Some(comment))
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn delete(&self, id: i64) -> Result<MessageResponse, ClientError> {
        Ok(self.api.delete(&format!("{BASE_PATH}/{id}")).await?)
    }
}
