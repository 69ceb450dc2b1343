use super::{Navigator, SessionStore};
use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{AdminProfile, Credentials, TokenResponse};
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

/// Token accepted without a backend round-trip when dev mode is on.
pub const DEV_MODE_TOKEN: &str = "dev-mode-token";

/// The two backend calls authentication needs.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse>;
    async fn me(&self) -> Result<AdminProfile>;
}

#[async_trait]
impl AuthBackend for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse> {
        ApiClient::login(self, credentials).await
    }

    async fn me(&self) -> Result<AdminProfile> {
        ApiClient::me(self).await
    }
}

pub struct Auth {
    backend: Arc<dyn AuthBackend>,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    dev_mode: bool,
}

impl Auth {
    pub fn new(
        backend: Arc<dyn AuthBackend>,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        dev_mode: bool,
    ) -> Self {
        Self {
            backend,
            session,
            navigator,
            dev_mode,
        }
    }

    /// Logs in and stores the access token. On failure returns the message to
    /// show under the login form.
    pub async fn login(&self, email: &str, password: &str) -> std::result::Result<AdminProfile, String> {
        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response = match self.backend.login(&credentials).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Login failed for {}: {}", credentials.email, e);
                return Err(e.user_message("Login failed"));
            }
        };

        if let Err(e) = self.session.set_token(&response.access_token).await {
            warn!("Logged in but could not persist token: {}", e);
            return Err(e.user_message("Login failed"));
        }
        info!("Admin {} logged in", response.admin.email);
        Ok(response.admin)
    }

    /// Resolves the admin behind the stored token, if any. An invalid token
    /// is dropped so the next check starts clean.
    pub async fn check(&self) -> Option<AdminProfile> {
        let token = match self.session.token().await {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read session token: {}", e);
                return None;
            }
        };

        if self.dev_mode && token == DEV_MODE_TOKEN {
            return Some(dev_admin());
        }

        match self.backend.me().await {
            Ok(admin) => Some(admin),
            Err(e) => {
                warn!("Stored session rejected: {}", e);
                if let Err(e) = self.session.clear_token().await {
                    warn!("Could not clear rejected token: {}", e);
                }
                None
            }
        }
    }

    pub async fn logout(&self) -> Result<()> {
        self.session.clear_token().await?;
        info!("Admin logged out");
        self.navigator.to_login();
        Ok(())
    }
}

fn dev_admin() -> AdminProfile {
    AdminProfile {
        id: 1,
        email: "admin@yivote.com".to_string(),
        username: Some("admin".to_string()),
        full_name: Some("Admin User (Dev Mode)".to_string()),
        role: Some("admin".to_string()),
    }
}
