use crate::error::ClientError;
use crate::models::{BorrowingRule, BorrowingRuleCreate, BorrowingRuleUpdate, MessageResponse};
use crate::paging::{PageRequest, PagedResponse};
use crate::transport::{ApiClient, QueryParams, encode_segment};

const BASE_PATH: &str = "/borrowing-rules";

/// Loan policies (borrow period, renew limit, late fee rate).
#[derive(Debug, Clone)]
pub struct BorrowingRulesService {
    api: ApiClient,
}

impl BorrowingRulesService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<PagedResponse<BorrowingRule>, ClientError> {
        Ok(self.api.get(BASE_PATH, page.to_params()).await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn get(&self, id: i64) -> Result<BorrowingRule, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/{id}"), QueryParams::new())
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure or unknown name.
    pub async fn get_by_name(&self, name: &str) -> Result<BorrowingRule, ClientError> {
        let path = format!("{BASE_PATH}/name/{}", encode_segment(name));
        Ok(self.api.get(&path, QueryParams::new()).await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the rule.
    pub async fn create(&self, rule: &BorrowingRuleCreate) -> Result<MessageResponse, ClientError> {
        Ok(self.api.post(BASE_PATH, Some(rule)).await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the update.
    pub async fn update(
        &self,
        id: i64,
        rule: &BorrowingRuleUpdate,
    ) -> Result<MessageResponse, ClientError> {
        Ok(self
            .api
            .put(&format!("{BASE_PATH}/{id}"), Some(rule))
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn delete(&self, id: i64) -> Result<MessageResponse, ClientError> {
        Ok(self.api.delete(&format!("{BASE_PATH}/{id}")).await?)
    }
}
