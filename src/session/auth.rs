//! Authentication state machine.
//!
//! `Uninitialized -> Initializing -> {Authenticated | Anonymous}`, with
//! `Authenticated -> Anonymous` on logout or failed verification.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::context::{SessionContext, SessionPhase};
use super::password::hash_password;
use super::store::PersistedSession;
use crate::error::ClientError;
use crate::models::{LoginResult, MessageResponse, UserIdentity};
use crate::transport::{ApiClient, ApiError, Method, QueryParams, RequestOptions};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    username_or_email: &'a str,
    password: String,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: String,
}

/// Login, registration, startup verification, password change, and logout.
///
/// The only writer of the [`SessionContext`] and its persisted store.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
    session: Arc<SessionContext>,
}

impl AuthService {
    /// `api` must read its auth header from `session`.
    #[must_use]
    pub fn new(api: ApiClient, session: Arc<SessionContext>) -> Self {
        Self { api, session }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Exchanges credentials for a token, then fetches the canonical identity.
    ///
    /// The token is staged in the persisted store before `GET /users/me` so the
    /// identity call carries it. If that call fails the staged token is removed
    /// and the session stays anonymous.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingToken`] when the login response carries no
    /// token, [`ClientError::Api`] for transport failures, and
    /// [`ClientError::Storage`] when the token cannot be staged.
    #[instrument(skip_all, fields(identifier = %identifier))]
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<UserIdentity, ClientError> {
        let request = LoginRequest {
            username_or_email: identifier,
            password: hash_password(password),
        };
        let result: LoginResult = self.api.post("/auth/login", Some(&request)).await?;
        let Some(token) = result.token().map(str::to_string) else {
            warn!("Login response did not contain a token");
            return Err(ClientError::MissingToken);
        };

        // A previous in-memory token would shadow the staged one.
        self.session.clear();
        self.session
            .store()
            .save(&PersistedSession::new(token.clone(), identifier))?;

        let identity = match self.fetch_identity().await {
            Ok(identity) => identity,
            Err(error) => {
                warn!(
                    error = %error,
                    "Identity fetch after login failed; rolling back staged token"
                );
                self.discard_session();
                return Err(error.into());
            }
        };

        let canonical = PersistedSession::new(token.clone(), identity.username.clone());
        if let Err(error) = self.session.store().save(&canonical) {
            warn!(
                error = %error,
                "Persisting signed-in session failed; rolling back staged token"
            );
            self.discard_session();
            return Err(error.into());
        }
        self.session.set_authenticated(identity.clone(), token);
        info!(username = %identity.username, role = identity.role.as_str(), "Signed in");
        Ok(identity)
    }

    /// Creates an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the registration.
    #[instrument(skip_all, fields(username = %username))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<MessageResponse, ClientError> {
        let request = RegisterRequest {
            username,
            email,
            password: hash_password(password),
        };
        Ok(self.api.post("/auth/register", Some(&request)).await?)
    }

    /// Restores a persisted session at startup.
    ///
    /// Any failure (unreadable store, identity fetch, token verification)
    /// clears the session completely. The context is marked initialized on
    /// every path.
    #[instrument(skip_all)]
    pub async fn init_auth(&self) -> SessionPhase {
        self.session.begin_initializing();
        let phase = self.restore().await;
        self.session.mark_initialized();
        info!(phase = %phase, "Session initialized");
        phase
    }

    async fn restore(&self) -> SessionPhase {
        let persisted = match self.session.store().load() {
            Ok(Some(persisted)) => persisted,
            Ok(None) => {
                self.session.clear();
                return SessionPhase::Anonymous;
            }
            Err(error) => {
                warn!(error = %error, "Persisted session unreadable; clearing");
                self.logout();
                return SessionPhase::Anonymous;
            }
        };

        self.session.set_tentative(persisted.token.clone());

        let identity = match self.fetch_identity().await {
            Ok(identity) => identity,
            Err(error) => {
                warn!(error = %error, "Stored session rejected while fetching identity");
                self.logout();
                return SessionPhase::Anonymous;
            }
        };

        match self.verify_token().await {
            Ok(true) => {}
            Ok(false) => {
                warn!("Stored token failed verification");
                self.logout();
                return SessionPhase::Anonymous;
            }
            Err(error) => {
                warn!(error = %error, "Token verification failed");
                self.logout();
                return SessionPhase::Anonymous;
            }
        }

        self.session.set_authenticated(identity, persisted.token);
        SessionPhase::Authenticated
    }

    /// `GET /auth/verify`: `Ok(true)` on 2xx, `Ok(false)` on 401/403.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for any other failure.
    pub async fn verify_token(&self) -> Result<bool, ApiError> {
        match self.api.get::<Value>("/auth/verify", QueryParams::new()).await {
            Ok(_) => Ok(true),
            Err(error) if error.is_auth_failure() => Ok(false),
            Err(error) => Err(error),
        }
    }

    /// Changes the password. Both values are digested; the session token is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the change.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ClientError> {
        let params = QueryParams::new()
            .with("oldPassword", hash_password(old_password))
            .with("newPassword", hash_password(new_password));
        Ok(self
            .api
            .request(Method::Put, "/auth/password", RequestOptions::new().params(params))
            .await?)
    }

    /// Clears the persisted pair and the in-memory session.
    pub fn logout(&self) {
        self.discard_session();
        info!("Signed out");
    }

    /// Re-reads `GET /users/me` into the session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] when no token is held, or
    /// [`ClientError::Api`] when the fetch fails.
    pub async fn refresh_identity(&self) -> Result<UserIdentity, ClientError> {
        let Some(token) = self.session.token() else {
            return Err(ClientError::NotAuthenticated);
        };
        let identity = self.fetch_identity().await?;
        self.session.set_authenticated(identity.clone(), token);
        Ok(identity)
    }

    async fn fetch_identity(&self) -> Result<UserIdentity, ApiError> {
        self.api.get("/users/me", QueryParams::new()).await
    }

    fn discard_session(&self) {
        if let Err(error) = self.session.store().clear() {
            warn!(error = %error, "Failed to clear persisted session");
        }
        self.session.clear();
    }
}
