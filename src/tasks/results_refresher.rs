use crate::api::ApiClient;
use crate::error::Result;
use crate::models::VoteResults;
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

#[async_trait]
pub trait ResultsSource: Send + Sync {
    async fn results(&self, contest_id: i64) -> Result<VoteResults>;
}

#[async_trait]
impl ResultsSource for ApiClient {
    async fn results(&self, contest_id: i64) -> Result<VoteResults> {
        self.vote_results(contest_id).await
    }
}

/// Owner of a running refresher. Dropping it stops the polling task, so a
/// results view that goes away never leaves a timer behind.
pub struct RefreshHandle {
    receiver: watch::Receiver<Option<VoteResults>>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Most recent successful fetch, if any has completed yet.
    pub fn latest(&self) -> Option<VoteResults> {
        self.receiver.borrow().clone()
    }

    /// Waits for the next published result. Returns `None` once the task is gone.
    pub async fn changed(&mut self) -> Option<VoteResults> {
        self.receiver.changed().await.ok()?;
        self.receiver.borrow_and_update().clone()
    }

    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Fetches results immediately and then every `period`. A failed fetch is
/// logged and the last good value stays published.
pub fn spawn_results_refresher(
    source: Arc<dyn ResultsSource>,
    contest_id: i64,
    period: Duration,
) -> RefreshHandle {
    let (sender, receiver) = watch::channel(None);

    let task = tokio::spawn(async move {
        info!("Refreshing results for contest {} every {:?}", contest_id, period);
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await; // first tick completes immediately
            debug!("Fetching results for contest {} at {}", contest_id, Utc::now().to_rfc3339());

            match source.results(contest_id).await {
                Ok(results) => {
                    if sender.send(Some(results)).is_err() {
                        // every receiver is gone
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to refresh results for contest {}: {}", contest_id, e);
                }
            }
        }
    });

    RefreshHandle { receiver, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::VoteResultItem;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Each call reports one more vote than the last. Calls listed in
    /// `failing` error out instead.
    struct CountingSource {
        calls: AtomicU64,
        failing: Vec<u64>,
    }

    impl CountingSource {
        fn new(failing: Vec<u64>) -> Arc<Self> {
            Arc::new(Self { calls: AtomicU64::new(0), failing })
        }
    }

    #[async_trait]
    impl ResultsSource for CountingSource {
        async fn results(&self, contest_id: i64) -> Result<VoteResults> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.failing.contains(&call) {
                return Err(Error::Api { status: 500, detail: "boom".into() });
            }
            Ok(VoteResults {
                contest_id,
                contest_name: "Talent Show 2024".into(),
                total_votes: call,
                results: vec![VoteResultItem {
                    contestant_id: 1,
                    contestant_name: "Alice".into(),
                    vote_count: call,
                    percentage: 100.0,
                }],
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_on_every_tick() {
        let source = CountingSource::new(Vec::new());
        let mut handle = spawn_results_refresher(source.clone(), 7, Duration::from_secs(10));

        let first = handle.changed().await.unwrap();
        assert_eq!(first.total_votes, 1);
        assert_eq!(first.contest_id, 7);

        let second = handle.changed().await.unwrap();
        assert_eq!(second.total_votes, 2);
        assert_eq!(handle.latest().map(|r| r.total_votes), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetch_keeps_last_value() {
        let source = CountingSource::new(vec![2]);
        let mut handle = spawn_results_refresher(source.clone(), 1, Duration::from_secs(10));

        assert_eq!(handle.changed().await.unwrap().total_votes, 1);
        // the second call fails, so the next publish is the third
        assert_eq!(handle.changed().await.unwrap().total_votes, 3);
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_polling() {
        let source = CountingSource::new(Vec::new());
        let mut handle = spawn_results_refresher(source.clone(), 1, Duration::from_secs(10));
        handle.changed().await.unwrap();
        drop(handle);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_ends_the_task() {
        let source = CountingSource::new(Vec::new());
        let mut handle = spawn_results_refresher(source, 1, Duration::from_secs(10));
        handle.changed().await.unwrap();
        handle.stop();
        assert!(handle.changed().await.is_none());
        assert!(!handle.is_running());
    }
}
