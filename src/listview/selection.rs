use std::collections::HashSet;
use std::hash::Hash;

/// Record ids marked for a bulk action. Membership is global, not per page.
#[derive(Debug, Clone)]
pub struct Selection<Id: Eq + Hash> {
    ids: HashSet<Id>,
}

impl<Id: Eq + Hash> Default for Selection<Id> {
    fn default() -> Self {
        Self { ids: HashSet::new() }
    }
}

impl<Id: Clone + Eq + Hash> Selection<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` if absent, removes it if present. Returns the new membership.
    pub fn toggle(&mut self, id: Id) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Select-all checkbox: deselects the page if it is fully selected,
    /// otherwise selects every id on it.
    pub fn select_all_on_page(&mut self, page_ids: &[Id]) {
        if self.is_page_selected(page_ids) {
            for id in page_ids {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(page_ids.iter().cloned());
        }
    }

    /// Checked state of the select-all box. An empty page is never "selected".
    pub fn is_page_selected(&self, page_ids: &[Id]) -> bool {
        !page_ids.is_empty() && page_ids.iter().all(|id| self.ids.contains(id))
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Id) -> bool,
    {
        self.ids.retain(keep);
    }

    pub fn remove(&mut self, id: &Id) -> bool {
        self.ids.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.ids.iter()
    }
}
