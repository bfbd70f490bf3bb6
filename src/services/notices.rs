use crate::error::ClientError;
use crate::models::{MessageResponse, Notice, NoticeCreate, NoticeUpdate};
use crate::paging::{PageRequest, PagedResponse};
use crate::transport::{ApiClient, QueryParams};

const BASE_PATH: &str = "/notices";

#[derive(Debug, Clone)]
pub struct NoticesService {
    api: ApiClient,
}

impl NoticesService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn list(&self, page: &PageRequest) -> Result<PagedResponse<Notice>, ClientError> {
        Ok(self.api.get(BASE_PATH, page.to_params()).await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn get(&self, id: i64) -> Result<Notice, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/{id}"), QueryParams::new())
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the notice.
    pub async fn create(&self, notice: &NoticeCreate) -> Result<MessageResponse, ClientError> {
        Ok(self.api.post(BASE_PATH, Some(notice)).await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the update.
    pub async fn update(
        &self,
        id: i64,
        notice: &NoticeUpdate,
    ) -> Result<MessageResponse, ClientError> {
        Ok(self
            .api
            .put(&format!("{BASE_PATH}/{id}"), Some(notice))
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn delete(&self, id: i64) -> Result<MessageResponse, ClientError> {
        Ok(self.api.delete(&format!("{BASE_PATH}/{id}")).await?)
    }
}
