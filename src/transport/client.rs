//! HTTP client wrapper for the library REST API.
//!
//! [`ApiClient`] turns a logical `(method, path, params, body)` request into
//! an HTTP exchange: it joins the path onto the configured base URL, merges
//! query parameters, attaches the bearer header supplied by the session layer,
//! and normalizes both success bodies and failures.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::ApiError;
use super::urls::{QueryParams, apply_query, build_url};
use crate::config::ClientConfig;
use crate::user_agent;

/// Supplies the `Authorization` header value for outgoing requests.
///
/// Implemented by the session layer; the transport only reads through it and
/// never mutates session state.
pub trait AuthHeaderProvider: Send + Sync {
    /// Returns e.g. `Bearer <token>`, or `None` when anonymous.
    fn auth_header(&self) -> Option<String>;
}

/// Provider used for anonymous clients.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAuth;

impl AuthHeaderProvider for NoAuth {
    fn auth_header(&self) -> Option<String> {
        None
    }
}

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

/// Per-request options: query parameters, JSON body, and header overrides.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    params: QueryParams,
    body: Option<Value>,
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl RequestOptions {
    /// Empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets query parameters.
    #[must_use]
    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Sets a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] with status `0` when `body` cannot be represented as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::new(0, format!("failed to encode request body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Adds a header that overrides the defaults (`Content-Type`, `Authorization`).
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }
}

/// Decoded success body before it is mapped onto the caller's type.
#[derive(Debug, Clone, PartialEq)]
enum SuccessBody {
    Json(Value),
    NoContent,
    Text(String),
}

impl SuccessBody {
    fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::NoContent => Value::Object(serde_json::Map::new()),
            Self::Text(text) => Value::String(text),
        }
    }
}

/// Typed client over the library REST API.
///
/// Cheap to clone; clones share the connection pool and auth provider.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    auth: Arc<dyn AuthHeaderProvider>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Builds a client from `config`, reading auth headers from `auth`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] with status `0` when the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, auth: Arc<dyn AuthHeaderProvider>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.read_timeout_secs))
            .user_agent(user_agent::default_api_user_agent())
            .gzip(true)
            .build()
            .map_err(|e| ApiError::new(0, format!("HTTP client construction failed: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            auth,
        })
    }

    /// Builds an anonymous client (no `Authorization` header is ever sent).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the HTTP client cannot be constructed.
    pub fn anonymous(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(config, Arc::new(NoAuth))
    }

    /// Configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs one HTTP exchange and decodes the body as `T`.
    ///
    /// JSON responses decode as JSON, `204 No Content` decodes from `{}`, and
    /// any other body decodes from a JSON string holding the raw text.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for network failures, non-2xx responses, or bodies
    /// that do not match `T`.
    #[instrument(level = "debug", skip_all, fields(method = %method, path = %path))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let joined = build_url(&self.base_url, path);
        let url = apply_query(&joined, &options.params)
            .map_err(|e| ApiError::new(0, format!("invalid request URL '{joined}': {e}")))?;
        let url_text = url.to_string();

        let mut request = self
            .http
            .request(method.as_reqwest(), url)
            .headers(self.headers(options.headers));
        if let Some(body) = &options.body {
            request = request.body(body.to_string());
        }

        debug!(url = %url_text, "Sending API request");
        let response = request.send().await.map_err(|e| {
            let error = ApiError::network(&url_text, &e);
            warn!(url = %url_text, error = %error, "API request failed before a response");
            error
        })?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.to_ascii_lowercase().contains("application/json"));
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(&url_text, &e))?;

        if !status.is_success() {
            let error = ApiError::from_response(status.as_u16(), &bytes);
            warn!(
                url = %url_text,
                status = status.as_u16(),
                message = %error.message,
                "API request returned error status"
            );
            return Err(error);
        }

        debug!(url = %url_text, status = status.as_u16(), "API request succeeded");
        let body = decode_success(status, is_json, &bytes)
            .map_err(|detail| ApiError::decode(status.as_u16(), &url_text, &detail))?;
        serde_json::from_value(body.into_value())
            .map_err(|e| ApiError::decode(status.as_u16(), &url_text, &e.to_string()))
    }

    /// `GET path?params`.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: QueryParams,
    ) -> Result<T, ApiError> {
        self.request(Method::Get, path, RequestOptions::new().params(params))
            .await
    }

    /// `POST path` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn post<B, T>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::Post, path, with_body(body)?).await
    }

    /// `PUT path` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn put<B, T>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::Put, path, with_body(body)?).await
    }

    /// `PATCH path` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn patch<B, T>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::Patch, path, with_body(body)?).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::Delete, path, RequestOptions::new())
            .await
    }

    fn headers(&self, overrides: Vec<(HeaderName, HeaderValue)>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(value) = self.auth.auth_header() {
            match HeaderValue::from_str(&value) {
                Ok(mut header) => {
                    header.set_sensitive(true);
                    headers.insert(AUTHORIZATION, header);
                }
                Err(_) => warn!("Skipping Authorization header with invalid characters"),
            }
        }

        for (name, value) in overrides {
            headers.insert(name, value);
        }
        headers
    }
}

fn with_body<B: Serialize + ?Sized>(body: Option<&B>) -> Result<RequestOptions, ApiError> {
    match body {
        Some(body) => RequestOptions::new().json(body),
        None => Ok(RequestOptions::new()),
    }
}

fn decode_success(status: StatusCode, is_json: bool, bytes: &[u8]) -> Result<SuccessBody, String> {
    if is_json {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(SuccessBody::NoContent);
        }
        return serde_json::from_slice(bytes)
            .map(SuccessBody::Json)
            .map_err(|e| format!("invalid JSON body: {e}"));
    }
    if status == StatusCode::NO_CONTENT {
        return Ok(SuccessBody::NoContent);
    }
    Ok(SuccessBody::Text(String::from_utf8_lossy(bytes).into_owned()))
}
