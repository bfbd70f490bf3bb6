use tracing::{info, instrument};

use crate::error::ClientError;
use crate::models::{Fee, FeeCalculation, MessageResponse};
use crate::paging::{PageRequest, PagedResponse};
use crate::transport::{ApiClient, Method, QueryParams, RequestOptions};

const BASE_PATH: &str = "/fees";

/// Fee reads and payment. Amounts come from the backend only.
#[derive(Debug, Clone)]
pub struct FeesService {
    api: ApiClient,
}

impl FeesService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Backend estimate of the late fee for a borrow.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn calculate(&self, borrow_id: i64) -> Result<FeeCalculation, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/calculate/{borrow_id}"), QueryParams::new())
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn user_fees(&self, page: &PageRequest) -> Result<PagedResponse<Fee>, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/user"), page.to_params())
            .await?)
    }

    /// Admin: every fee.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn all(&self, page: &PageRequest) -> Result<PagedResponse<Fee>, ClientError> {
        Ok(self.api.get(BASE_PATH, page.to_params()).await?)
    }

    /// Admin: fees not yet paid.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn unpaid(&self, page: &PageRequest) -> Result<PagedResponse<Fee>, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/unpaid"), page.to_params())
            .await?)
    }

    /// Marks a fee as paid. Not retried.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend refuses the payment.
    #[instrument(skip(self))]
    pub async fn pay(&self, fee_id: i64) -> Result<MessageResponse, ClientError> {
        let response: MessageResponse = self
            .api
            .request(
                Method::Post,
                &format!("{BASE_PATH}/{fee_id}/pay"),
                RequestOptions::new(),
            )
            .await?;
        info!(fee_id, "Fee paid");
        Ok(response)
    }
}
