#![allow(dead_code)]

pub mod socket_guard;

use std::sync::Arc;

use library_client::{ClientConfig, LibraryApi, MemorySessionStore, PersistedSession};
use wiremock::MockServer;

/// Client against `server` with an empty in-memory session store.
pub fn anonymous_api(server: &MockServer) -> LibraryApi {
    LibraryApi::in_memory(ClientConfig::with_base_url(server.uri())).unwrap()
}

/// Client against `server` with a persisted `(token, username)` pair.
pub fn api_with_session(server: &MockServer, config: ClientConfig, token: &str) -> LibraryApi {
    let store = Arc::new(MemorySessionStore::with_session(PersistedSession::new(
        token, "alice",
    )));
    let config = ClientConfig {
        base_url: server.uri(),
        ..config
    };
    LibraryApi::new(config, store).unwrap()
}

pub fn alice_json() -> serde_json::Value {
    serde_json::json!({
        "id": 7,
        "username": "alice",
        "email": "alice@example.org",
        "role": "USER"
    })
}
