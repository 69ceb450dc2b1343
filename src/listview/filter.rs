use super::{FieldValue, Record};
use std::collections::HashMap;
use std::hash::Hash;

/// Selected value of a categorical dropdown. `All` imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Dropdown input: `"all"` (any case) and the empty string mean no constraint.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(trimmed.to_string())
        }
    }

    pub fn admits(&self, value: &FieldValue<'_>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => value.to_string() == *wanted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState<F: Eq + Hash> {
    search: String,
    categories: HashMap<F, CategoryFilter>,
}

impl<F: Copy + Eq + Hash> Default for FilterState<F> {
    fn default() -> Self {
        Self {
            search: String::new(),
            categories: HashMap::new(),
        }
    }
}

impl<F: Copy + Eq + Hash> FilterState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns true when the stored text actually changed.
    pub fn set_search(&mut self, text: &str) -> bool {
        if self.search == text {
            return false;
        }
        self.search = text.to_string();
        true
    }

    pub fn category(&self, field: F) -> &CategoryFilter {
        static ALL: CategoryFilter = CategoryFilter::All;
        self.categories.get(&field).unwrap_or(&ALL)
    }

    /// Returns true when the effective constraint on `field` changed.
    pub fn set_category(&mut self, field: F, filter: CategoryFilter) -> bool {
        let previous = match filter {
            CategoryFilter::All => self.categories.remove(&field),
            CategoryFilter::Only(_) => self.categories.insert(field, filter.clone()),
        };
        previous.unwrap_or_default() != filter
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.categories.is_empty()
    }

    pub fn clear(&mut self) -> bool {
        let was_empty = self.is_empty();
        self.search.clear();
        self.categories.clear();
        !was_empty
    }

    /// True if `record` satisfies the search predicate and every categorical one.
    pub fn matches<R>(&self, record: &R, searchable: &[F]) -> bool
    where
        R: Record<Field = F>,
    {
        self.admits(record, &self.search.to_lowercase(), searchable)
    }

    fn admits<R>(&self, record: &R, needle: &str, searchable: &[F]) -> bool
    where
        R: Record<Field = F>,
    {
        matches_search(record, needle, searchable)
            && self
                .categories
                .iter()
                .all(|(field, filter)| filter.admits(&record.value(*field)))
    }
}

fn matches_search<R: Record>(record: &R, needle: &str, searchable: &[R::Field]) -> bool {
    if needle.is_empty() {
        return true;
    }
    searchable
        .iter()
        .any(|field| record.value(*field).to_string().to_lowercase().contains(needle))
}

/// Positions (into `records`) of every record passing `state`, in store order.
pub fn apply<R: Record>(records: &[R], state: &FilterState<R::Field>, searchable: &[R::Field]) -> Vec<usize> {
    let needle = state.search.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| state.admits(*record, &needle, searchable))
        .map(|(pos, _)| pos)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listview::testing::{Row, RowField};

    fn names(records: &[Row], positions: &[usize]) -> Vec<String> {
        positions.iter().map(|&p| records[p].name.clone()).collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let rows = vec![
            Row::new(1, "Olivia Chen", "Singing", 10),
            Row::new(2, "Liam Rodriguez", "Bake-Off", 20),
            Row::new(3, "Ava Patel", "Art", 30),
        ];
        let mut state = FilterState::new();
        state.set_search("ava");
        let hits = apply(&rows, &state, &[RowField::Name]);
        assert_eq!(names(&rows, &hits), vec!["Ava Patel"]);
    }

    #[test]
    fn empty_search_admits_everything() {
        let rows = vec![Row::new(1, "A", "x", 1), Row::new(2, "B", "y", 2)];
        let state = FilterState::new();
        assert_eq!(apply(&rows, &state, &[RowField::Name]), vec![0, 1]);
    }

    #[test]
    fn search_only_looks_at_designated_fields() {
        let rows = vec![Row::new(1, "Noah", "Singing", 1)];
        let mut state = FilterState::new();
        state.set_search("sing");
        assert!(apply(&rows, &state, &[RowField::Name]).is_empty());
        assert_eq!(apply(&rows, &state, &[RowField::Name, RowField::Group]), vec![0]);
    }

    #[test]
    fn categories_and_search_are_conjoined() {
        let rows = vec![
            Row::new(1, "Noah Kim", "Singing", 1),
            Row::new(2, "Nora Lee", "Art", 2),
            Row::new(3, "Emma", "Singing", 3),
        ];
        let mut state = FilterState::new();
        state.set_search("no");
        state.set_category(RowField::Group, CategoryFilter::Only("Singing".into()));
        assert_eq!(names(&rows, &apply(&rows, &state, &[RowField::Name])), vec!["Noah Kim"]);
    }

    #[test]
    fn all_never_compares() {
        let rows = vec![Row::new(1, "all", "all", 1), Row::new(2, "B", "y", 2)];
        let mut state = FilterState::new();
        state.set_category(RowField::Group, CategoryFilter::parse("ALL"));
        assert_eq!(apply(&rows, &state, &[]), vec![0, 1]);
        assert!(state.is_empty());
    }

    #[test]
    fn numeric_categories_compare_rendered_form() {
        let rows = vec![Row::new(1, "A", "x", 5), Row::new(2, "B", "x", 7)];
        let mut state = FilterState::new();
        state.set_category(RowField::Score, CategoryFilter::Only("7".into()));
        assert_eq!(apply(&rows, &state, &[]), vec![1]);
    }

    #[test]
    fn setters_report_changes() {
        let mut state: FilterState<RowField> = FilterState::new();
        assert!(state.set_search("x"));
        assert!(!state.set_search("x"));
        assert!(state.set_category(RowField::Group, CategoryFilter::Only("a".into())));
        assert!(!state.set_category(RowField::Group, CategoryFilter::Only("a".into())));
        assert!(state.set_category(RowField::Group, CategoryFilter::All));
        assert!(!state.set_category(RowField::Group, CategoryFilter::All));
        assert!(state.clear());
        assert!(!state.clear());
    }
}
