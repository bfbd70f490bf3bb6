//! Explicitly constructed session context.
//!
//! One [`SessionContext`] is created per client and shared (via `Arc`) between
//! the transport, which reads the auth header through it, and the
//! [`AuthService`](super::AuthService), which is the only writer.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use super::store::{MemorySessionStore, SessionStore};
use crate::models::UserIdentity;
use crate::transport::AuthHeaderProvider;

/// Authentication lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Uninitialized,
    Initializing,
    Authenticated,
    Anonymous,
}

impl SessionPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Authenticated => "authenticated",
            Self::Anonymous => "anonymous",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default)]
struct SessionState {
    phase: SessionPhase,
    identity: Option<UserIdentity>,
    token: Option<String>,
    initialized: bool,
}

/// Owns the signed-in identity, the in-memory token, and the persisted store.
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    state: RwLock<SessionState>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("SessionContext")
            .field("phase", &state.phase)
            .field("username", &state.identity.as_ref().map(|user| &user.username))
            .field("initialized", &state.initialized)
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Context backed by a fresh [`MemorySessionStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    #[must_use]
    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.read().phase
    }

    #[must_use]
    pub fn identity(&self) -> Option<UserIdentity> {
        self.read().identity.clone()
    }

    #[must_use]
    pub fn username(&self) -> Option<String> {
        self.read().identity.as_ref().map(|user| user.username.clone())
    }

    /// In-memory token only; see [`AuthHeaderProvider::auth_header`] for the
    /// persisted fallback.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    /// `true` exactly when a verified identity is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().identity.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.read()
            .identity
            .as_ref()
            .is_some_and(UserIdentity::is_admin)
    }

    /// Set once startup initialization has finished, whatever its outcome.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.read().initialized
    }

    pub(crate) fn begin_initializing(&self) {
        self.write().phase = SessionPhase::Initializing;
    }

    /// Holds `token` in memory without an identity (startup, before verification).
    pub(crate) fn set_tentative(&self, token: String) {
        let mut state = self.write();
        state.token = Some(token);
        state.identity = None;
        state.phase = SessionPhase::Initializing;
    }

    pub(crate) fn set_authenticated(&self, identity: UserIdentity, token: String) {
        let mut state = self.write();
        state.identity = Some(identity);
        state.token = Some(token);
        state.phase = SessionPhase::Authenticated;
    }

    /// Drops identity and token from memory. The persisted store is untouched.
    pub(crate) fn clear(&self) {
        let mut state = self.write();
        state.identity = None;
        state.token = None;
        state.phase = SessionPhase::Anonymous;
    }

    pub(crate) fn mark_initialized(&self) {
        self.write().initialized = true;
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AuthHeaderProvider for SessionContext {
    /// Prefers the in-memory token and falls back to the persisted store,
    /// which covers the window during login where the token is staged on
    /// disk before the identity is known.
    fn auth_header(&self) -> Option<String> {
        if let Some(token) = self.token() {
            return Some(format!("Bearer {token}"));
        }
        match self.store.load() {
            Ok(Some(persisted)) => Some(format!("Bearer {}", persisted.token)),
            Ok(None) => None,
            Err(error) => {
                warn!(error = %error, "Failed to read persisted session for auth header");
                None
            }
        }
    }
}
