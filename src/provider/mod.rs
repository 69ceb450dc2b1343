//! Where a management screen's records come from and where its edits go.

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::listview::Record;
use crate::models::{Contestant, ContestantUpdate, NewContestant};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

#[async_trait]
pub trait RecordProvider<R: Record>: Send + Sync {
    /// The full record set; callers replace their store with it wholesale.
    async fn fetch(&self) -> Result<Vec<R>>;

    /// Stores a new record and returns it as persisted, which may carry a
    /// backend-assigned id.
    async fn create(&self, record: &R) -> Result<R>;

    /// Writes back an edited record and returns the persisted version.
    async fn update(&self, record: &R) -> Result<R>;

    async fn delete(&self, id: &R::Id) -> Result<()>;
}

/// In-memory provider seeded up front. Edits really change the records, so a
/// refetch reflects them.
pub struct FixtureProvider<R> {
    records: Mutex<Vec<R>>,
}

impl<R: Record + Clone> FixtureProvider<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl<R: Record + Clone> RecordProvider<R> for FixtureProvider<R> {
    async fn fetch(&self) -> Result<Vec<R>> {
        Ok(self.records.lock().await.clone())
    }

    async fn create(&self, record: &R) -> Result<R> {
        let mut records = self.records.lock().await;
        let id = record.id();
        if records.iter().any(|r| r.id() == id) {
            return Err(Error::Api {
                status: 409,
                detail: format!("Record {:?} already exists", id),
            });
        }
        records.push(record.clone());
        Ok(record.clone())
    }

    async fn update(&self, record: &R) -> Result<R> {
        let mut records = self.records.lock().await;
        let id = record.id();
        match records.iter_mut().find(|r| r.id() == id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record.clone())
            }
            None => Err(Error::Api {
                status: 404,
                detail: format!("Record {:?} not found", id),
            }),
        }
    }

    async fn delete(&self, id: &R::Id) -> Result<()> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|r| r.id() != *id);
        if records.len() == before {
            return Err(Error::Api {
                status: 404,
                detail: format!("Record {:?} not found", id),
            });
        }
        Ok(())
    }
}

/// Contestants of one contest, straight from the backend.
pub struct HttpContestants {
    api: Arc<ApiClient>,
    contest_id: i64,
}

impl HttpContestants {
    pub fn new(api: Arc<ApiClient>, contest_id: i64) -> Self {
        Self { api, contest_id }
    }
}

#[async_trait]
impl RecordProvider<Contestant> for HttpContestants {
    async fn fetch(&self) -> Result<Vec<Contestant>> {
        let contest = self.api.get_contest(self.contest_id).await?;
        let contestants = self.api.contestants_by_contest(self.contest_id).await?;
        info!(
            "Fetched {} contestants for contest {} ({})",
            contestants.len(),
            contest.id,
            contest.name
        );
        Ok(contestants
            .iter()
            .map(|c| Contestant::from_api(c, &contest))
            .collect())
    }

    // The backend assigns the id; the one on `record` is ignored.
    async fn create(&self, record: &Contestant) -> Result<Contestant> {
        let new = NewContestant {
            contest_id: self.contest_id,
            name: record.name.clone(),
            bio: None,
            photo_url: None,
            region: None,
        };
        let created = self.api.create_contestant(&new).await?;
        let contest = self.api.get_contest(self.contest_id).await?;
        info!("Created contestant {} in contest {}", created.id, contest.id);
        Ok(Contestant::from_api(&created, &contest))
    }

    async fn update(&self, record: &Contestant) -> Result<Contestant> {
        let update = ContestantUpdate {
            name: Some(record.name.clone()),
            ..Default::default()
        };
        let updated = self.api.update_contestant(record.id, &update).await?;
        let contest = self.api.get_contest(self.contest_id).await?;
        Ok(Contestant::from_api(&updated, &contest))
    }

    async fn delete(&self, id: &i64) -> Result<()> {
        self.api.delete_contestant(*id).await
    }
}
