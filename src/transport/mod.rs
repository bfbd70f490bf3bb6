//! Transport layer: URL construction, auth header attachment, and response
//! and error normalization for the library REST API.
//!
//! # Example
//!
//! ```no_run
//! use library_client::{ApiClient, ClientConfig, QueryParams};
//! use library_client::models::BookCopy;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::anonymous(&ClientConfig::default())?;
//! let copies: Vec<BookCopy> = client.get("/books/1/copies", QueryParams::new()).await?;
//! println!("{} copies", copies.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod urls;

pub use client::{ApiClient, AuthHeaderProvider, Method, NoAuth, RequestOptions};
pub use error::{ApiError, extract_error_message};
pub use urls::{QueryParams, apply_query, build_url, encode_segment, is_absolute_url};
