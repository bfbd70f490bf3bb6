use serde::{Deserialize, Serialize};

/// Acknowledgement body returned by most mutating endpoints.
///
/// Accepts `{"message": "..."}`, an empty object (204), or a bare text body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MessageBody")]
pub struct MessageResponse {
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MessageBody {
    Text(String),
    Object {
        #[serde(default)]
        message: Option<String>,
    },
}

impl From<MessageBody> for MessageResponse {
    fn from(body: MessageBody) -> Self {
        let message = match body {
            MessageBody::Text(text) => Some(text),
            MessageBody::Object { message } => message,
        };
        Self {
            message: message.filter(|text| !text.trim().is_empty()),
        }
    }
}

/// Login response, decoded once at the transport boundary.
///
/// Backends answer either with a bare token body or with a JSON object
/// carrying a `token` field. Anything else lands in `Unrecognized` and is
/// rejected by the session layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LoginResult {
    Token(String),
    TokenWithMessage {
        token: String,
        #[serde(default)]
        message: Option<String>,
    },
    Unrecognized(serde_json::Value),
}

impl LoginResult {
    /// The bearer token, if the response carried a non-empty one.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        let token = match self {
            Self::Token(token) | Self::TokenWithMessage { token, .. } => token.trim(),
            Self::Unrecognized(_) => return None,
        };
        (!token.is_empty()).then_some(token)
    }
}
