//! Library Client Core
//!
//! Typed client for the online library management REST API. The backend owns
//! every business rule (availability, fee accrual, overdue detection); this
//! crate owns the transport, the session lifecycle, and the reconciliation
//! logic that derives client-visible state from several backend reads.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`transport`] - URL construction, auth header attachment, response and error normalization
//! - [`session`] - Session context, persisted token storage, and the auth state machine
//! - [`services`] - One façade per backend resource, including borrow reconciliation
//! - [`models`] - Wire DTOs
//! - [`paging`] - Paged envelopes and client-side pagination emulation
//! - [`config`] - Client configuration and validation

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod models;
pub mod paging;
pub mod services;
pub mod session;
pub mod transport;
mod user_agent;

// Re-export commonly used types
pub use config::{BorrowEndpointMode, ClientConfig, ConfigError};
pub use error::ClientError;
pub use paging::{PageRequest, PagedResponse, paginate};
pub use services::{LibraryApi, RenewOutcome, ReturnOutcome, select_available_copy};
pub use session::{
    AuthService, FileSessionStore, MemorySessionStore, PersistedSession, SessionContext,
    SessionPhase, SessionStore, StorageError, hash_password,
};
pub use transport::{ApiClient, ApiError, AuthHeaderProvider, Method, QueryParams, RequestOptions};
