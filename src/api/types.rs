//! Shared types for the API layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::api::error::ApiError;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware: the database handle
/// plus the in-memory login session store.
///
/// The connection sits behind a `Mutex` and is only ever held for the
/// synchronous body of a handler, never across an await point.
#[derive(Clone)]
pub struct ApiContext {
    db: Arc<Mutex<Connection>>,
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl ApiContext {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            sessions: Arc::new(Mutex::new(SessionStore::new())),
        }
    }

    pub fn lock_db(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".into()))
    }
}

// ═══════════════════════════════════════════════════════════
// Login sessions — demo credential gate, not a security boundary
// ═══════════════════════════════════════════════════════════

/// Authenticated user context, injected into request extensions by the
/// auth middleware after token validation.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub email: String,
    pub name: String,
    pub token: String,
}

/// In-memory bearer-token session store. Sessions live until logout or
/// process restart; there is nothing to persist for a demo credential.
#[derive(Default)]
pub struct SessionStore {
    sessions: HashMap<String, (String, String)>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session and return its bearer token.
    pub fn create(&mut self, email: &str, name: &str) -> String {
        let token = generate_token();
        self.sessions
            .insert(token.clone(), (email.to_string(), name.to_string()));
        token
    }

    /// Look up a token, returning the (email, name) it was issued to.
    pub fn validate(&self, token: &str) -> Option<(String, String)> {
        self.sessions.get(token).cloned()
    }

    /// Remove a session. Returns whether the token existed.
    pub fn revoke(&mut self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_urlsafe() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn session_lifecycle() {
        let mut store = SessionStore::new();
        let token = store.create("demo@medwrangler.com", "Demo User");

        let (email, name) = store.validate(&token).unwrap();
        assert_eq!(email, "demo@medwrangler.com");
        assert_eq!(name, "Demo User");

        assert!(store.revoke(&token));
        assert!(store.validate(&token).is_none());
        assert!(!store.revoke(&token));
    }
}
