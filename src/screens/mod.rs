//! Admin management screens: a `ListView` wired to its record provider,
//! confirmation gate and export target.

pub mod contestants;
pub mod dashboard;
pub mod votes;

pub use contestants::{ContestantScreen, ContestantStats};
pub use dashboard::DashboardSummary;
pub use votes::{VoteScreen, VoteStats};

use crate::error::{Error, Result};
use crate::listview::export::{self, Column, FileSink};
use crate::listview::{ListView, Record};
use crate::ports::Confirm;
use crate::provider::RecordProvider;
use chrono::NaiveDate;
use log::{error, info, warn};
use std::collections::HashSet;

pub struct ManagementScreen<R: Record> {
    entity: &'static str,
    noun: &'static str,
    columns: Vec<Column<R::Field>>,
    view: ListView<R>,
    provider: Box<dyn RecordProvider<R>>,
    confirm: Box<dyn Confirm>,
}

impl<R: Record> ManagementScreen<R> {
    pub fn new(
        entity: &'static str,
        noun: &'static str,
        columns: Vec<Column<R::Field>>,
        view: ListView<R>,
        provider: Box<dyn RecordProvider<R>>,
        confirm: Box<dyn Confirm>,
    ) -> Self {
        Self {
            entity,
            noun,
            columns,
            view,
            provider,
            confirm,
        }
    }

    pub fn view(&self) -> &ListView<R> {
        &self.view
    }

    /// Handlers for search, filters, sorting, paging and row selection all
    /// live on the view itself.
    pub fn view_mut(&mut self) -> &mut ListView<R> {
        &mut self.view
    }

    pub fn columns(&self) -> &[Column<R::Field>] {
        &self.columns
    }

    /// Reloads the store from the provider. On failure the last-known records
    /// stay in place and `false` is returned.
    pub async fn refresh(&mut self) -> bool {
        match self.provider.fetch().await {
            Ok(records) => {
                info!("Loaded {} {}", records.len(), self.entity);
                self.view.replace_records(records);
                true
            }
            Err(e) => {
                error!("Failed to load {}: {}", self.entity, e);
                false
            }
        }
    }

    /// Sends a new record to the provider and adds the persisted version to
    /// the store. A rejected create leaves the store untouched.
    pub async fn create(&mut self, record: R) -> Result<R::Id> {
        match self.provider.create(&record).await {
            Ok(stored) => {
                let id = stored.id();
                info!("Created {} {:?}", self.noun, id);
                self.view.push_record(stored);
                Ok(id)
            }
            Err(e) => {
                error!("Failed to create {}: {}", self.noun, e);
                Err(e)
            }
        }
    }

    /// Writes an edited record back; the store only changes once the provider
    /// accepted it.
    pub async fn update(&mut self, record: R) -> Result<()> {
        let id = record.id();
        if self.view.find(&id).is_none() {
            warn!("Update requested for unknown {} {:?}", self.noun, id);
            return Err(Error::Validation(format!("Unknown {} {:?}", self.noun, id)));
        }
        match self.provider.update(&record).await {
            Ok(stored) => {
                self.view.update_record(stored);
                Ok(())
            }
            Err(e) => {
                error!("Failed to update {} {:?}: {}", self.noun, id, e);
                Err(e)
            }
        }
    }

    /// Deletes the selected records after confirmation. Each id is removed
    /// locally only once the provider accepted its delete; failures stay
    /// selected so the user can retry them. Returns the ids that were deleted.
    pub async fn bulk_delete(&mut self) -> Vec<R::Id> {
        let ids = self.view.selected_ids();
        if ids.is_empty() {
            return Vec::new();
        }
        let prompt = format!("Are you sure you want to delete {} {}(s)?", ids.len(), self.noun);
        if !self.confirm.confirm(&prompt) {
            return Vec::new();
        }
        self.write_back_deletes(ids).await
    }

    pub async fn delete_one(&mut self, id: R::Id) -> bool {
        if self.view.find(&id).is_none() {
            warn!("Delete requested for unknown {} {:?}", self.noun, id);
            return false;
        }
        let prompt = format!("Are you sure you want to delete this {}?", self.noun);
        if !self.confirm.confirm(&prompt) {
            return false;
        }
        !self.write_back_deletes(vec![id]).await.is_empty()
    }

    async fn write_back_deletes(&mut self, ids: Vec<R::Id>) -> Vec<R::Id> {
        let mut deleted = Vec::with_capacity(ids.len());
        for id in ids {
            match self.provider.delete(&id).await {
                Ok(()) => deleted.push(id),
                Err(e) => error!("Failed to delete {} {:?}: {}", self.noun, id, e),
            }
        }
        let applied: HashSet<R::Id> = deleted.iter().cloned().collect();
        self.view.remove_ids(&applied);
        info!("Deleted {} {}", deleted.len(), self.entity);
        deleted
    }

    /// Exports every filtered record and hands the file to `sink`.
    /// Returns the file name used.
    pub fn export(&self, sink: &mut dyn FileSink, today: NaiveDate) -> Result<String> {
        let csv = self.view.export_csv(&self.columns)?;
        let filename = export::export_filename(self.entity, today);
        sink.save(&filename, &csv)?;
        Ok(filename)
    }

    /// Bulk export of just the selected records.
    pub fn export_selected(&self, sink: &mut dyn FileSink, today: NaiveDate) -> Result<Option<String>> {
        if self.view.selected_count() == 0 {
            return Ok(None);
        }
        let csv = self.view.export_selected_csv(&self.columns)?;
        let filename = export::export_filename(&format!("{}-selected", self.entity), today);
        sink.save(&filename, &csv)?;
        Ok(Some(filename))
    }
}
