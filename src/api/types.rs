//! Shared types for the API layer.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::config::BusinessHours;
use crate::db::DatabaseError;

/// Shared context for all API routes and middleware: the database
/// handle, the slot grid, and the hashed admin bearer token.
#[derive(Clone)]
pub struct ApiContext {
    db: Arc<Mutex<Connection>>,
    pub hours: BusinessHours,
    admin_token_hash: [u8; 32],
}

impl ApiContext {
    pub fn new(conn: Connection, hours: BusinessHours, admin_token: &str) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            hours,
            admin_token_hash: hash_token(admin_token),
        }
    }

    /// Open the context against a database file, running migrations.
    pub fn open(path: &Path, hours: BusinessHours, admin_token: &str) -> Result<Self, DatabaseError> {
        let conn = crate::db::open_database(path)?;
        Ok(Self::new(conn, hours, admin_token))
    }

    /// Lock the shared connection. Poisoned lock means a handler
    /// panicked mid-write; surface it instead of limping on.
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".into()))
    }

    /// Constant-shape capability check for the admin surface.
    pub fn is_admin_token(&self, token: &str) -> bool {
        hash_token(token) == self.admin_token_hash
    }
}

/// Hash a bearer token string using SHA-256.
pub fn hash_token(token: &str) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
/// Used at startup when no admin token is configured.
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    #[test]
    fn hash_token_is_deterministic() {
        assert_eq!(hash_token("test"), hash_token("test"));
        assert_ne!(hash_token("token-a"), hash_token("token-b"));
    }

    #[test]
    fn generate_token_is_unique() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_ne!(t1, t2);
        assert!(!t1.is_empty());
    }

    #[test]
    fn admin_token_check() {
        let ctx = ApiContext::new(
            open_memory_database().unwrap(),
            BusinessHours::default(),
            "segredo",
        );
        assert!(ctx.is_admin_token("segredo"));
        assert!(!ctx.is_admin_token("palpite"));
        assert!(!ctx.is_admin_token(""));
    }
}
