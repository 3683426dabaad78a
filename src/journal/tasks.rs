use super::checkin::CurrentCheckin;
use super::store::{Collection, JsonStore, StoredRecord};
use super::types::{Task, now_timestamp};
use crate::error::JournalError;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TaskBatch {
    Created { created: Vec<Task>, count: usize },
    NoObjectives { info: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskCompleted {
    pub success: bool,
    pub task: Task,
}

/// CRUD over `tasks.json`.
#[derive(Debug, Clone)]
pub struct TaskManager {
    store: JsonStore,
}

impl TaskManager {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// One task per objective of the *current* draft, written in a single rewrite.
    pub fn create_from_objectives(
        &self,
        current: &CurrentCheckin,
    ) -> Result<TaskBatch, JournalError> {
        let objectives = &current.checkin.objectives;
        if objectives.is_empty() {
            return Ok(TaskBatch::NoObjectives {
                info: "no_objectives",
            });
        }

        let created_at = now_timestamp();
        let created: Vec<Task> = objectives
            .iter()
            .map(|objective| Task::from_objective(objective, current.meta.checkin_id, &created_at))
            .collect();

        self.store.extend(Collection::Tasks, created.iter().cloned())?;

        info!(count = created.len(), "tasks created from objectives");
        Ok(TaskBatch::Created {
            count: created.len(),
            created,
        })
    }

    pub fn list(&self) -> Vec<Task> {
        self.store.read(Collection::Tasks)
    }

    pub fn mark_done(&self, task_id: &str) -> Result<TaskCompleted, JournalError> {
        let mut records: Vec<StoredRecord<Task>> = self.store.read_records(Collection::Tasks);
        let Some(task) = records
            .iter_mut()
            .filter_map(StoredRecord::valid_mut)
            .find(|task| task.id.to_string() == task_id.trim())
        else {
            return Err(JournalError::TaskNotFound(task_id.to_string()));
        };

        task.done = true;
        let task = task.clone();
        self.store.replace(Collection::Tasks, &records)?;

        info!(task_id = %task.id, "task marked done");
        Ok(TaskCompleted {
            success: true,
            task,
        })
    }
}
