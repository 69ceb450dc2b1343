use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{ApiContestant, CastVote, Contest, VoteReceipt};
use async_trait::async_trait;
use log::{error, info, warn};
use std::sync::Arc;

/// Backend calls the public voting page makes.
#[async_trait]
pub trait VoteBackend: Send + Sync {
    async fn contest(&self, contest_id: i64) -> Result<Contest>;
    async fn contestants(&self, contest_id: i64) -> Result<Vec<ApiContestant>>;
    async fn cast(&self, vote: &CastVote) -> Result<VoteReceipt>;
}

#[async_trait]
impl VoteBackend for ApiClient {
    async fn contest(&self, contest_id: i64) -> Result<Contest> {
        self.get_contest(contest_id).await
    }

    async fn contestants(&self, contest_id: i64) -> Result<Vec<ApiContestant>> {
        self.contestants_by_contest(contest_id).await
    }

    async fn cast(&self, vote: &CastVote) -> Result<VoteReceipt> {
        self.cast_vote(vote).await
    }
}

/// State behind the public "cast your vote" page for one contest.
pub struct VotePage {
    backend: Arc<dyn VoteBackend>,
    contest_id: i64,
    contest: Option<Contest>,
    contestants: Vec<ApiContestant>,
    message: Option<String>,
}

impl VotePage {
    pub fn new(backend: Arc<dyn VoteBackend>, contest_id: i64) -> Self {
        Self {
            backend,
            contest_id,
            contest: None,
            contestants: Vec::new(),
            message: None,
        }
    }

    /// Loads the contest and its contestants. Failures are logged and leave
    /// whatever was loaded before.
    pub async fn load(&mut self) -> bool {
        let contest = self.backend.contest(self.contest_id).await;
        let contestants = self.backend.contestants(self.contest_id).await;
        match (contest, contestants) {
            (Ok(contest), Ok(contestants)) => {
                self.contest = Some(contest);
                self.contestants = contestants;
                true
            }
            (Err(e), _) | (_, Err(e)) => {
                error!("Error loading contest {}: {}", self.contest_id, e);
                false
            }
        }
    }

    pub fn contest(&self) -> Option<&Contest> {
        self.contest.as_ref()
    }

    pub fn contestants(&self) -> &[ApiContestant] {
        &self.contestants
    }

    /// Outcome of the last vote attempt, ready to show.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Casts a web vote. Returns true when the backend recorded it; either
    /// way `message()` describes what happened.
    pub async fn cast_vote(&mut self, contestant_id: i64, voter_identifier: &str) -> bool {
        let voter_identifier = voter_identifier.trim();
        if voter_identifier.is_empty() {
            self.message = Some("Please enter your phone number".to_string());
            return false;
        }

        let name = self
            .contestants
            .iter()
            .find(|c| c.id == contestant_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("contestant #{}", contestant_id));

        let request = CastVote {
            contest_id: self.contest_id,
            contestant_id,
            voter_identifier: voter_identifier.to_string(),
            vote_method: "web".to_string(),
        };

        match self.backend.cast(&request).await {
            Ok(receipt) => {
                info!("Vote {} recorded for contestant {}", receipt.id, contestant_id);
                self.message = Some(format!("Successfully voted for {}!", name));
                // counts changed; a failed reload keeps the old list
                match self.backend.contestants(self.contest_id).await {
                    Ok(contestants) => self.contestants = contestants,
                    Err(e) => warn!("Vote recorded but refreshing contestants failed: {}", e),
                }
                true
            }
            Err(e) => {
                warn!("Vote for contestant {} rejected: {}", contestant_id, e);
                self.message = Some(e.user_message("Voting failed"));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::ContestStatus;
    use chrono::NaiveDateTime;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    fn at(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    struct FakeBackend {
        counts: Mutex<Vec<u64>>,
        casts: AtomicUsize,
        reject_with: Option<String>,
    }

    impl FakeBackend {
        fn new(reject_with: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                counts: Mutex::new(vec![3, 5]),
                casts: AtomicUsize::new(0),
                reject_with: reject_with.map(str::to_string),
            })
        }
    }

    #[async_trait]
    impl VoteBackend for FakeBackend {
        async fn contest(&self, contest_id: i64) -> Result<Contest> {
            Ok(Contest {
                id: contest_id,
                name: "Talent Show 2024".into(),
                description: None,
                start_date: at("2024-01-01 00:00:00"),
                end_date: at("2024-12-31 00:00:00"),
                client_name: None,
                status: ContestStatus::Active,
                created_at: at("2024-01-01 00:00:00"),
            })
        }

        async fn contestants(&self, contest_id: i64) -> Result<Vec<ApiContestant>> {
            let counts = self.counts.lock().await;
            Ok(["Alice Johnson", "Bob Williams"]
                .iter()
                .zip(counts.iter())
                .enumerate()
                .map(|(i, (name, &votes))| ApiContestant {
                    id: i as i64 + 1,
                    contest_id,
                    name: name.to_string(),
                    bio: None,
                    photo_url: None,
                    region: None,
                    created_at: at("2024-01-02 00:00:00"),
                    vote_count: Some(votes),
                })
                .collect())
        }

        async fn cast(&self, vote: &CastVote) -> Result<VoteReceipt> {
            self.casts.fetch_add(1, Ordering::SeqCst);
            if let Some(detail) = &self.reject_with {
                return Err(Error::Api { status: 400, detail: detail.clone() });
            }
            self.counts.lock().await[(vote.contestant_id - 1) as usize] += 1;
            Ok(VoteReceipt {
                id: 42,
                contest_id: vote.contest_id,
                contestant_id: vote.contestant_id,
                vote_hash: "abc".into(),
                timestamp: at("2024-06-01 10:00:00"),
                message: "Vote recorded successfully!".into(),
            })
        }
    }

    #[tokio::test]
    async fn empty_identifier_never_reaches_backend() {
        let backend = FakeBackend::new(None);
        let mut page = VotePage::new(backend.clone(), 1);
        assert!(page.load().await);
        assert!(!page.cast_vote(1, "   ").await);
        assert_eq!(page.message(), Some("Please enter your phone number"));
        assert_eq!(backend.casts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_vote_refreshes_counts() {
        let backend = FakeBackend::new(None);
        let mut page = VotePage::new(backend.clone(), 1);
        page.load().await;
        assert!(page.cast_vote(2, "+1-555-123-4567").await);
        assert_eq!(page.message(), Some("Successfully voted for Bob Williams!"));
        assert_eq!(page.contestants()[1].vote_count, Some(6));
    }

    #[tokio::test]
    async fn rejection_shows_backend_detail() {
        let backend = FakeBackend::new(Some("You have already voted in this contest"));
        let mut page = VotePage::new(backend.clone(), 1);
        page.load().await;
        assert!(!page.cast_vote(1, "+1-555-123-4567").await);
        assert_eq!(page.message(), Some("You have already voted in this contest"));
        assert_eq!(page.contestants()[0].vote_count, Some(3));
    }
}
