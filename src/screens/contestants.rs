use super::ManagementScreen;
use crate::listview::export::Column;
use crate::listview::sort::SortState;
use crate::listview::{ListConfig, ListView};
use crate::models::{Contestant, ContestantField, ContestantStatus};
use crate::ports::Confirm;
use crate::provider::RecordProvider;

pub const PAGE_SIZE: usize = 5;

pub type ContestantScreen = ManagementScreen<Contestant>;

/// Export columns, in the order spreadsheets downstream expect.
pub fn columns() -> Vec<Column<ContestantField>> {
    vec![
        Column::new("Name", ContestantField::Name),
        Column::new("Email", ContestantField::Email),
        Column::new("Contest", ContestantField::Contest),
        Column::new("Status", ContestantField::Status),
        Column::new("Votes", ContestantField::Votes),
        Column::new("Joined Date", ContestantField::Joined),
    ]
}

/// On-screen table: the export columns led by the id rows are selected by.
pub fn table_columns() -> Vec<Column<ContestantField>> {
    let mut columns = columns();
    columns.insert(0, Column::new("ID", ContestantField::Id));
    columns
}

pub fn list_config() -> ListConfig<ContestantField> {
    ListConfig {
        searchable: vec![ContestantField::Name, ContestantField::Email],
        page_size: PAGE_SIZE,
        default_sort: Some(SortState::ascending(ContestantField::Name)),
    }
}

pub fn screen(provider: Box<dyn RecordProvider<Contestant>>, confirm: Box<dyn Confirm>) -> ContestantScreen {
    ManagementScreen::new(
        "contestants",
        "contestant",
        columns(),
        ListView::new(list_config()),
        provider,
        confirm,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContestantStats {
    pub total: usize,
    pub active: usize,
    pub total_votes: u64,
    pub average_votes: u64,
}

impl ContestantStats {
    /// Reductions over the filtered sequence. The average is rounded to the
    /// nearest whole vote and is 0 for an empty table.
    pub fn of(view: &ListView<Contestant>) -> Self {
        let mut stats = ContestantStats::default();
        for contestant in view.filtered() {
            stats.total += 1;
            if contestant.status == ContestantStatus::Active {
                stats.active += 1;
            }
            stats.total_votes += contestant.votes;
        }
        if stats.total > 0 {
            stats.average_votes = (stats.total_votes as f64 / stats.total as f64).round() as u64;
        }
        stats
    }
}
