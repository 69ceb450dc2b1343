use super::{ApiContestant, Contest, ContestStatus};
use crate::listview::{FieldValue, Record};
use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestantStatus {
    Active,
    Inactive,
    Pending,
}

impl ContestantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContestantStatus::Active => "active",
            ContestantStatus::Inactive => "inactive",
            ContestantStatus::Pending => "pending",
        }
    }
}

impl From<ContestStatus> for ContestantStatus {
    fn from(status: ContestStatus) -> Self {
        match status {
            ContestStatus::Active => ContestantStatus::Active,
            ContestStatus::Draft => ContestantStatus::Pending,
            ContestStatus::Closed => ContestantStatus::Inactive,
        }
    }
}

impl fmt::Display for ContestantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of the contestant management table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contestant {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub contest: String,
    pub votes: u64,
    pub status: ContestantStatus,
    pub joined: NaiveDate,
}

impl Contestant {
    pub fn from_api(api: &ApiContestant, contest: &Contest) -> Self {
        Self {
            id: api.id,
            name: api.name.clone(),
            email: None,
            contest: contest.name.clone(),
            votes: api.vote_count.unwrap_or(0),
            status: contest.status.into(),
            joined: api.created_at.date(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContestantField {
    Id,
    Name,
    Email,
    Contest,
    Votes,
    Status,
    Joined,
}

impl ContestantField {
    /// Column key as typed on the command line or sent by a sort header.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "id" => Some(ContestantField::Id),
            "name" => Some(ContestantField::Name),
            "email" => Some(ContestantField::Email),
            "contest" => Some(ContestantField::Contest),
            "votes" => Some(ContestantField::Votes),
            "status" => Some(ContestantField::Status),
            "joined" | "joineddate" | "joined_date" => Some(ContestantField::Joined),
            _ => None,
        }
    }
}

impl Record for Contestant {
    type Id = i64;
    type Field = ContestantField;

    fn id(&self) -> i64 {
        self.id
    }

    fn value(&self, field: ContestantField) -> FieldValue<'_> {
        match field {
            ContestantField::Id => self.id.into(),
            ContestantField::Name => self.name.as_str().into(),
            ContestantField::Email => self.email.as_deref().unwrap_or("").into(),
            ContestantField::Contest => self.contest.as_str().into(),
            ContestantField::Votes => self.votes.into(),
            ContestantField::Status => self.status.as_str().into(),
            ContestantField::Joined => self.joined.format("%Y-%m-%d").to_string().into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteMethod {
    Web,
    #[serde(rename = "SMS")]
    Sms,
}

impl VoteMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteMethod::Web => "Web",
            VoteMethod::Sms => "SMS",
        }
    }

    /// Accepts the backend's lowercase `vote_method` as well as display labels.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "web" => Some(VoteMethod::Web),
            "sms" => Some(VoteMethod::Sms),
            _ => None,
        }
    }
}

impl fmt::Display for VoteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of the vote management table. `voter` is always stored masked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub id: String,
    pub contestant: String,
    pub voter: String,
    pub method: VoteMethod,
    pub timestamp: NaiveDateTime,
    pub contest: String,
}

impl VoteRecord {
    pub fn new(
        id: impl Into<String>,
        contestant: impl Into<String>,
        voter_identifier: &str,
        method: VoteMethod,
        timestamp: NaiveDateTime,
        contest: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            contestant: contestant.into(),
            voter: mask_voter(voter_identifier),
            method,
            timestamp,
            contest: contest.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteField {
    Id,
    Contestant,
    Voter,
    Method,
    Timestamp,
    Contest,
}

impl VoteField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "id" => Some(VoteField::Id),
            "contestant" => Some(VoteField::Contestant),
            "voter" => Some(VoteField::Voter),
            "method" => Some(VoteField::Method),
            "timestamp" | "time" => Some(VoteField::Timestamp),
            "contest" => Some(VoteField::Contest),
            _ => None,
        }
    }
}

impl Record for VoteRecord {
    type Id = String;
    type Field = VoteField;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn value(&self, field: VoteField) -> FieldValue<'_> {
        match field {
            VoteField::Id => self.id.as_str().into(),
            VoteField::Contestant => self.contestant.as_str().into(),
            VoteField::Voter => self.voter.as_str().into(),
            VoteField::Method => self.method.as_str().into(),
            VoteField::Timestamp => self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().into(),
            VoteField::Contest => self.contest.as_str().into(),
        }
    }
}

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^([^@\s]+)@[^@\s]+(\.[A-Za-z]{2,})$").unwrap();
    static ref PHONE: Regex = Regex::new(r"^(.+?)\d{3}([\s-]?\d{4})$").unwrap();
}

/// Hides the middle of a voter identifier: `user@example.com` becomes
/// `user@***.com`, `+1-555-123-4567` becomes `+1-555-***-4567`.
/// Already-masked identifiers come back unchanged.
pub fn mask_voter(identifier: &str) -> String {
    let identifier = identifier.trim();
    if EMAIL.is_match(identifier) {
        return EMAIL.replace(identifier, "$1@***$2").into_owned();
    }
    if PHONE.is_match(identifier) {
        return PHONE.replace(identifier, "$1***$2").into_owned();
    }
    identifier.to_string()
}
