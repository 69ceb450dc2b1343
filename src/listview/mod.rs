//! Client-side list pipeline shared by the admin management screens:
//! filter, then sort, then paginate, with selection and CSV export over the
//! filtered sequence.

pub mod export;
pub mod filter;
pub mod paginate;
pub mod selection;
pub mod sort;

use crate::error::Result;
use export::Column;
use filter::{CategoryFilter, FilterState};
use log::{debug, info};
use paginate::{PageSpan, Pager};
use selection::Selection;
use sort::SortState;
use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::Hash;

/// A single attribute value as seen by filtering, sorting and export.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Counts and ids, kept exact at any magnitude.
    Integer(i128),
    Number(f64),
    Text(Cow<'a, str>),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(t) => f.write_str(t),
        }
    }
}

impl From<u64> for FieldValue<'_> {
    fn from(n: u64) -> Self {
        FieldValue::Integer(n.into())
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n.into())
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(s: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(s))
    }
}

impl From<String> for FieldValue<'_> {
    fn from(s: String) -> Self {
        FieldValue::Text(Cow::Owned(s))
    }
}

/// A row in a management table.
pub trait Record: Send + Sync + 'static {
    /// Unique and stable for the lifetime of a record store.
    type Id: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;
    /// The attributes a table can search, filter, sort or export by.
    type Field: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
    fn value(&self, field: Self::Field) -> FieldValue<'_>;
}

#[derive(Debug, Clone)]
pub struct ListConfig<F> {
    pub searchable: Vec<F>,
    pub page_size: usize,
    pub default_sort: Option<SortState<F>>,
}

/// Owns one table's records and all of its interactive state.
///
/// Every mutation recomputes filter -> sort -> page synchronously before
/// returning, so a caller never observes a half-updated view.
#[derive(Debug)]
pub struct ListView<R: Record> {
    records: Vec<R>,
    config: ListConfig<R::Field>,
    filter: FilterState<R::Field>,
    sort: Option<SortState<R::Field>>,
    pager: Pager,
    selection: Selection<R::Id>,
    // positions into `records`, filtered then sorted
    order: Vec<usize>,
}

impl<R: Record> ListView<R> {
    pub fn new(config: ListConfig<R::Field>) -> Self {
        let mut view = Self {
            records: Vec::new(),
            pager: Pager::new(config.page_size),
            sort: config.default_sort,
            config,
            filter: FilterState::new(),
            selection: Selection::new(),
            order: Vec::new(),
        };
        view.recompute();
        view
    }

    pub fn with_records(config: ListConfig<R::Field>, records: Vec<R>) -> Self {
        let mut view = Self::new(config);
        view.replace_records(records);
        view
    }

    /// Swaps in a freshly fetched store and resets all interactive state.
    pub fn replace_records(&mut self, records: Vec<R>) {
        info!("Replacing record store ({} -> {} records)", self.records.len(), records.len());
        self.records = records;
        self.filter.clear();
        self.sort = self.config.default_sort;
        self.pager.reset();
        self.selection.clear();
        self.recompute();
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn find(&self, id: &R::Id) -> Option<&R> {
        self.records.iter().find(|r| r.id() == *id)
    }

    /// Appends a record the backend just created. Filters stay as they are.
    pub fn push_record(&mut self, record: R) {
        self.records.push(record);
        self.recompute();
        self.prune_selection();
    }

    /// Replaces the record with the same id. Returns false if it is unknown.
    pub fn update_record(&mut self, record: R) -> bool {
        let id = record.id();
        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(slot) => {
                *slot = record;
                self.recompute();
                // the edit may have moved the row out of the filter
                self.prune_selection();
                true
            }
            None => false,
        }
    }

    // --- filtering ---

    pub fn filter_state(&self) -> &FilterState<R::Field> {
        &self.filter
    }

    pub fn set_search(&mut self, text: &str) {
        if self.filter.set_search(text) {
            self.filters_changed();
        }
    }

    pub fn set_category(&mut self, field: R::Field, filter: CategoryFilter) {
        if self.filter.set_category(field, filter) {
            self.filters_changed();
        }
    }

    pub fn clear_filters(&mut self) {
        if self.filter.clear() {
            self.filters_changed();
        }
    }

    /// Distinct values of `field` across the whole store, for dropdown options.
    pub fn distinct_values(&self, field: R::Field) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.value(field).to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    // --- sorting ---

    pub fn sort_state(&self) -> Option<SortState<R::Field>> {
        self.sort
    }

    /// Column-header click.
    pub fn sort_by(&mut self, field: R::Field) {
        self.sort = Some(SortState::clicked(self.sort, field));
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: Option<SortState<R::Field>>) {
        self.sort = sort;
        self.recompute();
    }

    // --- paging ---

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn page_size(&self) -> usize {
        self.pager.page_size()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.order.len())
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.pager.go_to(page, self.order.len());
    }

    pub fn next_page(&mut self) {
        self.pager.next(self.order.len());
    }

    pub fn prev_page(&mut self) {
        self.pager.prev(self.order.len());
    }

    pub fn page_buttons(&self, window: usize) -> Vec<usize> {
        paginate::page_window(self.page(), self.total_pages(), window)
    }

    pub fn span(&self) -> PageSpan {
        self.pager.span(self.order.len())
    }

    // --- derived sequences ---

    /// Every record passing the filters, in sort order.
    pub fn filtered(&self) -> impl Iterator<Item = &R> + '_ {
        self.order.iter().map(move |&pos| &self.records[pos])
    }

    pub fn filtered_len(&self) -> usize {
        self.order.len()
    }

    /// The current page's slice of the filtered sequence.
    pub fn visible(&self) -> Vec<&R> {
        self.order[self.pager.range(self.order.len())]
            .iter()
            .map(|&pos| &self.records[pos])
            .collect()
    }

    pub fn visible_ids(&self) -> Vec<R::Id> {
        self.visible().into_iter().map(Record::id).collect()
    }

    // --- selection ---

    /// Flips one row's checkbox. Ids outside the filtered sequence are
    /// ignored and report false.
    pub fn toggle(&mut self, id: R::Id) -> bool {
        if !self.filtered().any(|r| r.id() == id) {
            return false;
        }
        self.selection.toggle(id)
    }

    pub fn toggle_page(&mut self) {
        let ids = self.visible_ids();
        self.selection.select_all_on_page(&ids);
    }

    pub fn is_page_selected(&self) -> bool {
        self.selection.is_page_selected(&self.visible_ids())
    }

    pub fn is_selected(&self, id: &R::Id) -> bool {
        self.selection.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected records in the order the table currently shows them.
    pub fn selected(&self) -> impl Iterator<Item = &R> + '_ {
        self.filtered().filter(move |r| self.selection.contains(&r.id()))
    }

    pub fn selected_ids(&self) -> Vec<R::Id> {
        self.selected().map(Record::id).collect()
    }

    // --- destructive actions ---

    /// Removes `ids` from the store and the selection together and returns
    /// the removed records. Unknown ids are ignored.
    pub fn remove_ids(&mut self, ids: &HashSet<R::Id>) -> Vec<R> {
        if ids.is_empty() {
            return Vec::new();
        }
        let (removed, kept): (Vec<R>, Vec<R>) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|r| ids.contains(&r.id()));
        self.records = kept;
        for id in ids {
            self.selection.remove(id);
        }
        self.recompute();
        self.prune_selection();
        removed
    }

    // --- export ---

    /// CSV of every filtered record, regardless of the current page.
    pub fn export_csv(&self, columns: &[Column<R::Field>]) -> Result<String> {
        export::to_csv(self.filtered(), columns)
    }

    pub fn export_selected_csv(&self, columns: &[Column<R::Field>]) -> Result<String> {
        export::to_csv(self.selected(), columns)
    }

    // --- internals ---

    fn filters_changed(&mut self) {
        self.recompute();
        self.pager.reset();
        self.prune_selection();
    }

    /// Selection never outlives the filter that hid its records.
    fn prune_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let visible: HashSet<R::Id> = self.filtered().map(Record::id).collect();
        self.selection.retain(|id| visible.contains(id));
    }

    fn recompute(&mut self) {
        let filtered = filter::apply(&self.records, &self.filter, &self.config.searchable);
        self.order = match &self.sort {
            Some(sort) => sort::order(&self.records, &filtered, sort),
            None => filtered,
        };
        self.pager.clamp(self.order.len());
        debug!(
            "Recomputed view: {} of {} records, page {}/{}",
            self.order.len(),
            self.records.len(),
            self.pager.page(),
            self.total_pages()
        );
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{FieldValue, Record};

    #[derive(Debug, Clone, PartialEq)]
    pub struct Row {
        pub id: u32,
        pub name: String,
        pub group: String,
        pub score: i64,
    }

    impl Row {
        pub fn new(id: u32, name: &str, group: &str, score: i64) -> Self {
            Self {
                id,
                name: name.to_string(),
                group: group.to_string(),
                score,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum RowField {
        Name,
        Group,
        Score,
    }

    impl Record for Row {
        type Id = u32;
        type Field = RowField;

        fn id(&self) -> u32 {
            self.id
        }

        fn value(&self, field: RowField) -> FieldValue<'_> {
            match field {
                RowField::Name => self.name.as_str().into(),
                RowField::Group => self.group.as_str().into(),
                RowField::Score => self.score.into(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Row, RowField};
    use super::*;

    fn contestants() -> Vec<Row> {
        vec![
            Row::new(1, "Olivia Chen", "Singing", 1402),
            Row::new(2, "Liam Rodriguez", "Bake-Off", 986),
            Row::new(3, "Ava Patel", "Art", 754),
            Row::new(4, "Noah Kim", "Singing", 1120),
            Row::new(5, "Emma Watson", "Design", 892),
            Row::new(6, "James Miller", "Singing", 1567),
        ]
    }

    fn view() -> ListView<Row> {
        ListView::with_records(
            ListConfig {
                searchable: vec![RowField::Name],
                page_size: 5,
                default_sort: Some(SortState::ascending(RowField::Name)),
            },
            contestants(),
        )
    }

    fn scores(rows: &[&Row]) -> Vec<i64> {
        rows.iter().map(|r| r.score).collect()
    }

    #[test]
    fn sorted_by_votes_descending_across_two_pages() {
        let mut view = view();
        view.sort_by(RowField::Score);
        view.sort_by(RowField::Score);
        assert_eq!(scores(&view.visible()), vec![1567, 1402, 1120, 986, 892]);
        assert_eq!(view.total_pages(), 2);
        view.next_page();
        assert_eq!(scores(&view.visible()), vec![754]);
    }

    #[test]
    fn filter_change_resets_to_first_page() {
        let mut view = view();
        view.go_to_page(2);
        assert_eq!(view.page(), 2);
        view.set_category(RowField::Group, CategoryFilter::Only("Singing".into()));
        assert_eq!(view.page(), 1);
        assert_eq!(view.filtered_len(), 3);
        assert_eq!(view.total_pages(), 1);
    }

    #[test]
    fn empty_result_still_has_page_one() {
        let mut view = view();
        view.set_search("zzz");
        assert_eq!(view.page(), 1);
        assert_eq!(view.total_pages(), 1);
        assert!(view.visible().is_empty());
        assert!(!view.is_page_selected());
    }

    #[test]
    fn selection_survives_paging_but_not_filtering_out() {
        let mut view = view();
        view.toggle(1);
        view.toggle(6);
        view.next_page();
        assert_eq!(view.selected_count(), 2);
        view.set_search("olivia");
        assert_eq!(view.selected_ids(), vec![1]);
    }

    #[test]
    fn toggle_page_selects_only_visible_rows() {
        let mut view = view();
        view.toggle_page();
        assert!(view.is_page_selected());
        assert_eq!(view.selected_count(), 5);
        view.next_page();
        assert!(!view.is_page_selected());
        view.prev_page();
        view.toggle_page();
        assert_eq!(view.selected_count(), 0);
    }

    #[test]
    fn remove_ids_drops_from_store_and_selection_together() {
        let mut view = view();
        view.toggle(2);
        view.toggle(3);
        view.toggle(4);
        let ids = HashSet::from([2, 3, 99]);
        let mut removed: Vec<u32> = view.remove_ids(&ids).into_iter().map(|r| r.id).collect();
        removed.sort();
        assert_eq!(removed, vec![2, 3]);
        assert_eq!(view.records().len(), 4);
        assert_eq!(view.selected_ids(), vec![4]);
        assert!(view.find(&1).is_some());
    }

    #[test]
    fn deleting_last_page_pulls_page_back() {
        let mut view = view();
        view.go_to_page(2);
        let last = view.visible_ids();
        view.remove_ids(&last.into_iter().collect());
        assert_eq!(view.page(), 1);
        assert_eq!(view.visible().len(), 5);
    }

    #[test]
    fn export_covers_all_filtered_records_not_just_page() {
        let view = view();
        let csv = view
            .export_csv(&[Column::new("Name", RowField::Name), Column::new("Votes", RowField::Score)])
            .unwrap();
        assert_eq!(csv.lines().count(), 7);
        assert!(csv.starts_with("Name,Votes\nAva Patel,754"));
    }

    #[test]
    fn replace_resets_state() {
        let mut view = view();
        view.set_search("a");
        view.sort_by(RowField::Score);
        view.toggle(1);
        view.replace_records(contestants());
        assert_eq!(view.filter_state().search(), "");
        assert_eq!(view.sort_state(), Some(SortState::ascending(RowField::Name)));
        assert_eq!(view.selected_count(), 0);
        assert_eq!(view.filtered_len(), 6);
    }

    #[test]
    fn update_and_push_keep_view_consistent() {
        let mut view = view();
        assert!(view.update_record(Row::new(3, "Ava Patel", "Art", 2000)));
        assert!(!view.update_record(Row::new(42, "Ghost", "Art", 1)));
        view.push_record(Row::new(7, "Aaron Best", "Art", 5));
        assert_eq!(view.visible()[0].name, "Aaron Best");
        assert_eq!(view.find(&3).map(|r| r.score), Some(2000));
    }

    #[test]
    fn selection_only_holds_filtered_rows() {
        let mut view = view();
        view.set_category(RowField::Group, CategoryFilter::Only("Singing".into()));
        assert!(!view.toggle(3));
        assert!(!view.toggle(999));
        assert!(view.toggle(1));
        assert!(view.toggle(4));

        // regrouping row 4 takes it out of the filter and the selection
        assert!(view.update_record(Row::new(4, "Noah Kim", "Art", 1120)));
        assert_eq!(view.selected_count(), 1);
        assert_eq!(view.selected_ids(), vec![1]);

        view.push_record(Row::new(7, "Aaron Best", "Art", 5));
        assert_eq!(view.selected_count(), view.selected_ids().len());
    }

    #[test]
    fn distinct_values_for_dropdowns() {
        let view = view();
        assert_eq!(
            view.distinct_values(RowField::Group),
            vec!["Art", "Bake-Off", "Design", "Singing"]
        );
    }
}
