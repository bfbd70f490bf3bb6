//! Session layer: identity, token lifecycle, and persisted storage.
//!
//! A [`SessionContext`] is built explicitly and injected into the transport
//! as its [`AuthHeaderProvider`](crate::transport::AuthHeaderProvider).
//! [`AuthService`] drives every state change.

mod auth;
mod context;
mod password;
mod store;

pub use auth::AuthService;
pub use context::{SessionContext, SessionPhase};
pub use password::hash_password;
pub use store::{
    FileSessionStore, MemorySessionStore, PersistedSession, SessionStore, StorageError,
    default_config_dir, default_session_path,
};
