pub mod cast;

pub use cast::{VoteBackend, VotePage};

use crate::models::{ApiContestant, Contest, VoteResultItem, VoteResults};

/// Builds contest results from contestant vote counts, the same shape the
/// backend's results endpoint returns.
pub fn tally(contest: &Contest, contestants: &[ApiContestant]) -> VoteResults {
    let total_votes: u64 = contestants.iter().map(|c| c.vote_count.unwrap_or(0)).sum();

    let mut results: Vec<VoteResultItem> = contestants
        .iter()
        .map(|c| {
            let vote_count = c.vote_count.unwrap_or(0);
            VoteResultItem {
                contestant_id: c.id,
                contestant_name: c.name.clone(),
                vote_count,
                percentage: percentage(vote_count, total_votes),
            }
        })
        .collect();

    // Stable: equal counts keep contestant order
    results.sort_by(|a, b| b.vote_count.cmp(&a.vote_count));

    VoteResults {
        contest_id: contest.id,
        contest_name: contest.name.clone(),
        total_votes,
        results,
    }
}

/// Share of `total` in percent, rounded to two decimals. Zero when nobody voted.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 100.0 / total as f64 * 100.0).round() / 100.0
}

/// Plain-text standings, leader first and marked with `*`.
pub fn summary(results: &VoteResults) -> String {
    if results.total_votes == 0 {
        return format!("{}: no votes have been cast yet.", results.contest_name);
    }

    let mut summary = format!("{} - {} votes\n", results.contest_name, results.total_votes);
    for (rank, item) in results.results.iter().enumerate() {
        let marker = if rank == 0 { "*" } else { " " };
        summary.push_str(&format!(
            "{} {}. {}: {} votes ({:.2}%)\n",
            marker,
            rank + 1,
            item.contestant_name,
            item.vote_count,
            item.percentage
        ));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContestStatus;
    use chrono::NaiveDateTime;

    fn at(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn contest() -> Contest {
        Contest {
            id: 1,
            name: "Talent Show 2024".into(),
            description: None,
            start_date: at("2024-01-01 00:00:00"),
            end_date: at("2024-12-31 00:00:00"),
            client_name: None,
            status: ContestStatus::Active,
            created_at: at("2024-01-01 00:00:00"),
        }
    }

    fn contestant(id: i64, name: &str, votes: u64) -> ApiContestant {
        ApiContestant {
            id,
            contest_id: 1,
            name: name.into(),
            bio: None,
            photo_url: None,
            region: None,
            created_at: at("2024-01-02 00:00:00"),
            vote_count: Some(votes),
        }
    }

    #[test]
    fn tally_orders_and_rounds() {
        let results = tally(
            &contest(),
            &[contestant(1, "Alice", 1), contestant(2, "Bob", 2), contestant(3, "Cara", 0)],
        );
        assert_eq!(results.total_votes, 3);
        let ranked: Vec<(&str, f64)> = results
            .results
            .iter()
            .map(|r| (r.contestant_name.as_str(), r.percentage))
            .collect();
        assert_eq!(ranked, vec![("Bob", 66.67), ("Alice", 33.33), ("Cara", 0.0)]);
        assert_eq!(results.leader().map(|l| l.contestant_id), Some(2));
    }

    #[test]
    fn tally_without_votes() {
        let results = tally(&contest(), &[contestant(1, "Alice", 0), contestant(2, "Bob", 0)]);
        assert_eq!(results.total_votes, 0);
        assert!(results.results.iter().all(|r| r.percentage == 0.0));
        assert!(results.leader().is_none());
        assert_eq!(summary(&results), "Talent Show 2024: no votes have been cast yet.");
    }

    #[test]
    fn ties_keep_contestant_order() {
        let results = tally(&contest(), &[contestant(1, "Alice", 4), contestant(2, "Bob", 4)]);
        let ids: Vec<i64> = results.results.iter().map(|r| r.contestant_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn summary_marks_leader() {
        let results = tally(&contest(), &[contestant(1, "Alice", 1), contestant(2, "Bob", 3)]);
        let text = summary(&results);
        assert!(text.starts_with("Talent Show 2024 - 4 votes\n* 1. Bob: 3 votes (75.00%)\n"));
        assert!(text.contains("  2. Alice: 1 votes (25.00%)"));
    }
}
