pub mod checkin;
pub mod store;
pub mod tasks;
pub mod types;
pub mod views;

pub use checkin::{
    CheckinFileInfo, CheckinManager, CurrentCheckin, FieldUpdate, FinalizeOutcome, ResetOutcome,
    SaveOutcome,
};
pub use store::{Collection, JsonStore};
pub use tasks::{TaskBatch, TaskCompleted, TaskManager};
pub use types::{
    CheckinDraft, CheckinField, CheckinMeta, CheckinSnapshot, CheckinStatus, HistoryEntry, Task,
};
pub use views::MoodSummary;

use crate::error::{JournalError, StorageError};
use std::path::Path;

/// Everything the tools operate on, built once at startup and shared.
#[derive(Debug)]
pub struct Journal {
    store: JsonStore,
    checkins: CheckinManager,
    tasks: TaskManager,
}

impl Journal {
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let store = JsonStore::open(root.as_ref())?;
        Ok(Self {
            checkins: CheckinManager::new(store.clone()),
            tasks: TaskManager::new(store.clone()),
            store,
        })
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    pub fn checkins(&self) -> &CheckinManager {
        &self.checkins
    }

    pub fn tasks(&self) -> &TaskManager {
        &self.tasks
    }

    pub fn last_entry(&self) -> Result<HistoryEntry, JournalError> {
        views::last_entry(&self.store)
    }

    pub fn history(&self, limit: Option<i64>) -> Vec<HistoryEntry> {
        views::history(&self.store, limit)
    }

    pub fn summary(&self, days: i64) -> MoodSummary {
        views::summary(&self.store, days)
    }

    pub fn create_tasks_from_objectives(&self) -> Result<TaskBatch, JournalError> {
        self.tasks.create_from_objectives(&self.checkins.current())
    }
}
