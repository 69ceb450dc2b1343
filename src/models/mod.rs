pub mod records;

pub use records::{Contestant, ContestantField, ContestantStatus, VoteField, VoteMethod, VoteRecord};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Draft,
    Active,
    Closed,
}

impl ContestStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "draft" => Some(ContestStatus::Draft),
            "active" => Some(ContestStatus::Active),
            "closed" => Some(ContestStatus::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub client_name: Option<String>,
    pub status: ContestStatus,
    pub created_at: NaiveDateTime,
}

impl Contest {
    /// Open for voting: marked active and `now` inside the voting window.
    pub fn is_open(&self, now: NaiveDateTime) -> bool {
        self.status == ContestStatus::Active && self.start_date <= now && now <= self.end_date
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewContest {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub client_name: Option<String>,
}

// Partial update; absent fields are left alone by the backend
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContestStatus>,
}

/// Contestant as the backend returns it, with its live vote count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiContestant {
    pub id: i64,
    pub contest_id: i64,
    pub name: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub region: Option<String>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub vote_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewContestant {
    pub contest_id: i64,
    pub name: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContestantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CastVote {
    pub contest_id: i64,
    pub contestant_id: i64,
    pub voter_identifier: String,
    pub vote_method: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoteReceipt {
    pub id: i64,
    pub contest_id: i64,
    pub contestant_id: i64,
    pub vote_hash: String,
    pub timestamp: NaiveDateTime,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteResultItem {
    pub contestant_id: i64,
    pub contestant_name: String,
    pub vote_count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteResults {
    pub contest_id: i64,
    pub contest_name: String,
    pub total_votes: u64,
    pub results: Vec<VoteResultItem>,
}

impl VoteResults {
    /// Front-runner; `None` until someone has voted.
    pub fn leader(&self) -> Option<&VoteResultItem> {
        if self.total_votes == 0 {
            return None;
        }
        self.results.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Account created by the one-time first-admin setup.
#[derive(Debug, Clone, Serialize)]
pub struct NewAdmin {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub admin: AdminProfile,
}
