//! Typed client for the Yi-Vote REST backend.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{
    AdminProfile, ApiContestant, CastVote, Contest, ContestUpdate, ContestantUpdate, Credentials,
    NewAdmin, NewContest, NewContestant, TokenResponse, VoteReceipt, VoteResults,
};
use crate::session::{Navigator, SessionStore};
use log::{debug, error, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &Config,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            session,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // --- contests ---

    pub async fn list_contests(&self) -> Result<Vec<Contest>> {
        self.get("/api/contests/").await
    }

    pub async fn active_contests(&self) -> Result<Vec<Contest>> {
        self.get("/api/contests/active/list").await
    }

    pub async fn get_contest(&self, contest_id: i64) -> Result<Contest> {
        self.get(&format!("/api/contests/{}", contest_id)).await
    }

    pub async fn create_contest(&self, contest: &NewContest) -> Result<Contest> {
        self.send_json(self.http.post(self.url("/api/contests/")).json(contest)).await
    }

    pub async fn update_contest(&self, contest_id: i64, update: &ContestUpdate) -> Result<Contest> {
        let url = self.url(&format!("/api/contests/{}", contest_id));
        self.send_json(self.http.put(url).json(update)).await
    }

    pub async fn delete_contest(&self, contest_id: i64) -> Result<()> {
        let url = self.url(&format!("/api/contests/{}", contest_id));
        self.send(self.http.delete(url)).await.map(|_| ())
    }

    // --- contestants ---

    pub async fn contestants_by_contest(&self, contest_id: i64) -> Result<Vec<ApiContestant>> {
        self.get(&format!("/api/contestants/contest/{}", contest_id)).await
    }

    pub async fn create_contestant(&self, contestant: &NewContestant) -> Result<ApiContestant> {
        self.send_json(self.http.post(self.url("/api/contestants/")).json(contestant)).await
    }

    pub async fn update_contestant(
        &self,
        contestant_id: i64,
        update: &ContestantUpdate,
    ) -> Result<ApiContestant> {
        let url = self.url(&format!("/api/contestants/{}", contestant_id));
        self.send_json(self.http.put(url).json(update)).await
    }

    pub async fn delete_contestant(&self, contestant_id: i64) -> Result<()> {
        let url = self.url(&format!("/api/contestants/{}", contestant_id));
        self.send(self.http.delete(url)).await.map(|_| ())
    }

    // --- votes ---

    pub async fn cast_vote(&self, vote: &CastVote) -> Result<VoteReceipt> {
        self.send_json(self.http.post(self.url("/api/votes/")).json(vote)).await
    }

    pub async fn vote_results(&self, contest_id: i64) -> Result<VoteResults> {
        self.get(&format!("/api/votes/results/{}", contest_id)).await
    }

    // --- admin ---

    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse> {
        self.send_json(self.http.post(self.url("/api/admin/login")).json(credentials)).await
    }

    pub async fn me(&self) -> Result<AdminProfile> {
        self.get("/api/admin/me").await
    }

    /// One-time bootstrap; the backend refuses it once any admin exists.
    pub async fn setup_first_admin(&self, admin: &NewAdmin) -> Result<AdminProfile> {
        let url = self.url("/api/admin/setup-first-admin");
        self.send_json(self.http.post(url).json(admin)).await
    }

    // --- plumbing ---

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json(self.http.get(self.url(path))).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// Attaches the bearer token, sends, and turns non-2xx into `Error`.
    /// A 401 also drops the stored token and routes to the login view.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match self.session.token().await {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(e) => {
                warn!("Could not read session token, sending anonymously: {}", e);
                request
            }
        };

        let response = request.send().await?;
        let status = response.status();
        debug!("{} {}", status, response.url());
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(&body);

        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.session.clear_token().await {
                error!("Failed to clear session token after 401: {}", e);
            }
            self.navigator.to_login();
            return Err(Error::Unauthorized { detail });
        }

        Err(Error::Api {
            status: status.as_u16(),
            detail,
        })
    }
}

/// Pulls the human-readable message out of an error body. The backend sends
/// `{"detail": "..."}` for most failures and `{"detail": [...]}` for
/// validation errors.
pub fn error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(message)) => message.clone(),
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect::<Vec<_>>()
                .join("; "),
            Some(other) => other.to_string(),
            None => body.trim().to_string(),
        },
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_from_string_payload() {
        assert_eq!(
            error_detail(r#"{"detail":"Contest has ended"}"#),
            "Contest has ended"
        );
    }

    #[test]
    fn detail_from_validation_payload() {
        let body = r#"{"detail":[{"loc":["body","voter_identifier"],"msg":"String should have at least 5 characters","type":"string_too_short"}]}"#;
        assert_eq!(error_detail(body), "String should have at least 5 characters");
    }

    #[test]
    fn detail_from_plain_text() {
        assert_eq!(error_detail("Internal Server Error\n"), "Internal Server Error");
        assert_eq!(error_detail(""), "");
    }
}
