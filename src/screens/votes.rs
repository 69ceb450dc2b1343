use super::ManagementScreen;
use crate::listview::export::Column;
use crate::listview::{ListConfig, ListView};
use crate::models::{VoteField, VoteMethod, VoteRecord};
use crate::ports::Confirm;
use crate::provider::RecordProvider;
use chrono::{Duration, NaiveDateTime};

pub const PAGE_SIZE: usize = 10;

pub type VoteScreen = ManagementScreen<VoteRecord>;

pub fn columns() -> Vec<Column<VoteField>> {
    vec![
        Column::new("Vote ID", VoteField::Id),
        Column::new("Contestant", VoteField::Contestant),
        Column::new("Voter", VoteField::Voter),
        Column::new("Method", VoteField::Method),
        Column::new("Timestamp", VoteField::Timestamp),
        Column::new("Contest", VoteField::Contest),
    ]
}

// Votes keep their feed order (newest first) until a header is clicked.
pub fn list_config() -> ListConfig<VoteField> {
    ListConfig {
        searchable: vec![VoteField::Id, VoteField::Contestant, VoteField::Voter],
        page_size: PAGE_SIZE,
        default_sort: None,
    }
}

pub fn screen(provider: Box<dyn RecordProvider<VoteRecord>>, confirm: Box<dyn Confirm>) -> VoteScreen {
    ManagementScreen::new("votes", "vote", columns(), ListView::new(list_config()), provider, confirm)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteStats {
    pub total: usize,
    pub web: usize,
    pub sms: usize,
    /// Cast within the 24 hours before `now`.
    pub recent: usize,
}

impl VoteStats {
    pub fn of(view: &ListView<VoteRecord>, now: NaiveDateTime) -> Self {
        let cutoff = now - Duration::hours(24);
        view.filtered().fold(VoteStats::default(), |mut stats, vote| {
            stats.total += 1;
            match vote.method {
                VoteMethod::Web => stats.web += 1,
                VoteMethod::Sms => stats.sms += 1,
            }
            if vote.timestamp > cutoff {
                stats.recent += 1;
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_votes;
    use crate::listview::filter::CategoryFilter;

    fn at(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn stats_count_methods_and_recent_votes() {
        let view = ListView::with_records(list_config(), sample_votes());
        let stats = VoteStats::of(&view, at("2023-10-28 14:28:00"));
        assert_eq!(stats.total, 8);
        assert_eq!(stats.web, 5);
        assert_eq!(stats.sms, 3);
        // 14:28:10 onwards is inside the window
        assert_eq!(stats.recent, 5);
    }

    #[test]
    fn method_filter_narrows_stats() {
        let mut view = ListView::with_records(list_config(), sample_votes());
        view.set_category(VoteField::Method, CategoryFilter::parse("SMS"));
        let stats = VoteStats::of(&view, at("2030-01-01 00:00:00"));
        assert_eq!(stats, VoteStats { total: 3, web: 0, sms: 3, recent: 0 });
    }

    #[test]
    fn search_matches_vote_id_and_voter() {
        let mut view = ListView::with_records(list_config(), sample_votes());
        view.set_search("yv-7c");
        assert_eq!(view.selected_count(), 0);
        assert_eq!(view.filtered().map(|v| v.id.as_str()).collect::<Vec<_>>(), vec!["YV-7C2F6G"]);

        view.set_search("555");
        assert_eq!(view.filtered_len(), 3);
    }

    #[test]
    fn export_uses_vote_headers() {
        let mut view = ListView::with_records(list_config(), sample_votes());
        view.set_category(VoteField::Contest, CategoryFilter::Only("Design Awards".into()));
        let csv = view.export_csv(&columns()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Vote ID,Contestant,Voter,Method,Timestamp,Contest");
        assert_eq!(lines[1], "YV-7C2F6G,Charlie Brown,charlie@***.com,Web,2023-10-27 14:29:41,Design Awards");
        assert_eq!(lines.len(), 4);
    }
}
