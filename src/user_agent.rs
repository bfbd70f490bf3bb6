//! Shared User-Agent string for API traffic.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/aaron212/online-library-management";

/// Default User-Agent for API requests (identifies the client and its version).
#[must_use]
pub(crate) fn default_api_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("library-client/{version} (+{PROJECT_UA_URL})")
}
