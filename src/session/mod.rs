//! Admin session: where the bearer token lives and how to get back to login.

pub mod auth;
pub mod sqlite;

pub use auth::{Auth, AuthBackend, DEV_MODE_TOKEN};
pub use sqlite::SqliteSession;

use crate::error::Result;
use async_trait::async_trait;
use log::info;
use tokio::sync::Mutex;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn token(&self) -> Result<Option<String>>;
    async fn set_token(&self, token: &str) -> Result<()>;
    async fn clear_token(&self) -> Result<()>;
}

/// Called whenever the session is gone and the user has to log in again.
pub trait Navigator: Send + Sync {
    fn to_login(&self);
}

/// Token held for the life of the process only.
#[derive(Debug, Default)]
pub struct MemorySession {
    token: Mutex<Option<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySession {
    async fn token(&self) -> Result<Option<String>> {
        Ok(self.token.lock().await.clone())
    }

    async fn set_token(&self, token: &str) -> Result<()> {
        *self.token.lock().await = Some(token.to_string());
        Ok(())
    }

    async fn clear_token(&self) -> Result<()> {
        *self.token.lock().await = None;
        Ok(())
    }
}

/// Terminal stand-in for a redirect: tells the user how to log back in.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn to_login(&self) {
        info!("Session ended; run `yi-vote login <email> <password>` to sign in again");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_session_round_trip() {
        let session = MemorySession::new();
        assert_eq!(session.token().await.unwrap(), None);
        session.set_token("abc").await.unwrap();
        assert_eq!(session.token().await.unwrap().as_deref(), Some("abc"));
        session.clear_token().await.unwrap();
        assert_eq!(session.token().await.unwrap(), None);
    }
}
