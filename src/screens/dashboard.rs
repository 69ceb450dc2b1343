use crate::models::{Contest, ContestStatus};
use chrono::NaiveDateTime;

/// Headline numbers for the admin overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardSummary {
    pub total_contests: usize,
    /// Active and inside the voting window at `now`.
    pub open_contests: usize,
    pub upcoming_contests: usize,
    pub drafts: usize,
    pub closed: usize,
}

impl DashboardSummary {
    pub fn of(contests: &[Contest], now: NaiveDateTime) -> Self {
        let mut summary = DashboardSummary {
            total_contests: contests.len(),
            ..Default::default()
        };
        for contest in contests {
            match contest.status {
                ContestStatus::Draft => summary.drafts += 1,
                ContestStatus::Closed => summary.closed += 1,
                ContestStatus::Active if contest.is_open(now) => summary.open_contests += 1,
                ContestStatus::Active if now < contest.start_date => summary.upcoming_contests += 1,
                // active but already past its end date; the backend closes these lazily
                ContestStatus::Active => summary.closed += 1,
            }
        }
        summary
    }
}
