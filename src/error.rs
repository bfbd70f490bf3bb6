//! Crate-wide error type.
//!
//! Three families reach callers: transport failures ([`ApiError`]), local
//! domain-resolution failures raised before or after a transport call, and
//! session persistence failures.

use thiserror::Error;

use crate::config::ConfigError;
use crate::session::StorageError;
use crate::transport::ApiError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure, non-2xx response, or undecodable body.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Borrow-by-book found no copy with status `AVAILABLE`.
    #[error(
        "no available copy for book {book_id}\n  Suggestion: Reserve the book or try again once a copy is returned"
    )]
    NoAvailableCopy { book_id: i64 },

    /// The borrow is not among the caller's current loans (already returned or never existed).
    #[error(
        "active borrow record not found: id {borrow_id}\n  Suggestion: The loan may have been returned from another session; refresh your current loans"
    )]
    BorrowNotFound { borrow_id: i64 },

    /// The login response carried no usable token.
    #[error("login response did not contain a token")]
    MissingToken,

    /// The operation needs a signed-in user.
    #[error("not signed in\n  Suggestion: Run `library-client login` first")]
    NotAuthenticated,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// HTTP status when the error came from the backend, `None` for local errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(error) if error.status != 0 => Some(error.status),
            _ => None,
        }
    }

    /// Non-empty, single-line text suitable for showing to a person.
    #[must_use]
    pub fn user_message(&self) -> String {
        let full = match self {
            Self::Api(error) => error.message.clone(),
            other => other.to_string(),
        };
        let line = full.lines().next().unwrap_or_default().trim();
        if line.is_empty() {
            match self.status() {
                Some(status) => format!("HTTP error! status: {status}"),
                None => "unexpected client error".to_string(),
            }
        } else {
            line.to_string()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_strips_suggestion() {
        let error = ClientError::BorrowNotFound { borrow_id: 42 };
        assert_eq!(error.user_message(), "active borrow record not found: id 42");
        assert!(error.to_string().contains("Suggestion:"));
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_user_message_for_api_error() {
        let error = ClientError::from(ApiError::new(409, "Copy already borrowed"));
        assert_eq!(error.user_message(), "Copy already borrowed");
        assert_eq!(error.status(), Some(409));
    }

    #[test]
    fn test_user_message_never_empty() {
        let error = ClientError::from(ApiError::new(500, "   "));
        assert_eq!(error.user_message(), "HTTP error! status: 500");

        let error = ClientError::from(ApiError::new(0, ""));
        assert_eq!(error.user_message(), "unexpected client error");
    }

    #[test]
    fn test_network_error_has_no_status() {
        let error = ClientError::from(ApiError::new(0, "cannot connect"));
        assert_eq!(error.status(), None);
    }
}
