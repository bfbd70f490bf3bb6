use serde_json::Value;

use crate::error::ClientError;
use crate::models::IndexCategory;
use crate::transport::{ApiClient, Method, QueryParams, RequestOptions, encode_segment};

const BASE_PATH: &str = "/categories";

/// Index categories, keyed by their index code.
#[derive(Debug, Clone)]
pub struct CategoriesService {
    api: ApiClient,
}

impl CategoriesService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn list(&self) -> Result<Vec<IndexCategory>, ClientError> {
        Ok(self.api.get(BASE_PATH, QueryParams::new()).await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure or unknown code.
    pub async fn get_by_index_code(&self, index_code: &str) -> Result<IndexCategory, ClientError> {
        let path = format!("{BASE_PATH}/{}", encode_segment(index_code));
        Ok(self.api.get(&path, QueryParams::new()).await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn exists(&self, index_code: &str) -> Result<bool, ClientError> {
        let path = format!("{BASE_PATH}/{}/exists", encode_segment(index_code));
        let value: Value = self.api.get(&path, QueryParams::new()).await?;
        Ok(truthy(&value))
    }

    /// `POST /categories?indexCode=...`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the code.
    pub async fn create(&self, index_code: &str) -> Result<IndexCategory, ClientError> {
        let params = QueryParams::new().with("indexCode", index_code);
        Ok(self
            .api
            .request(Method::Post, BASE_PATH, RequestOptions::new().params(params))
            .await?)
    }
}

/// Accepts a JSON boolean, or a text body of `true`/`false`.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => text.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}
