use crate::calendar::today;
use crate::errors::StorageError;
use crate::models::{DailyRecord, Task, TaskId, TaskType};
use crate::storage::{load_tasks, TaskStorage};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Owns the task list and mirrors it to a storage slot after every mutation.
#[derive(Debug)]
pub struct TaskStore<S> {
    storage: S,
    tasks: Vec<Task>,
}

impl<S: TaskStorage> TaskStore<S> {
    pub async fn open(storage: S) -> Self {
        let tasks = load_tasks(&storage).await;
        info!(count = tasks.len(), "loaded tasks");
        Self { storage, tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub async fn add_task(
        &mut self,
        content: impl Into<String>,
        task_type: TaskType,
        date: Option<NaiveDate>,
    ) -> Result<Task, StorageError> {
        let mut id = TaskId::generate();
        while self.task(&id).is_some() {
            id = TaskId::generate();
        }

        let task = Task {
            id,
            content: content.into(),
            is_completed: false,
            created_at: date.unwrap_or_else(today),
            task_type,
        };
        self.tasks.push(task.clone());
        self.persist().await?;

        info!(id = %task.id, date = %task.created_at, kind = task.task_type.as_str(), "added task");
        Ok(task)
    }

    /// Returns the updated task, or `None` when no task has this id.
    pub async fn toggle_task(&mut self, id: &TaskId) -> Result<Option<Task>, StorageError> {
        let Some(task) = self.tasks.iter_mut().find(|task| &task.id == id) else {
            debug!(%id, "toggle ignored, unknown task");
            return Ok(None);
        };
        task.is_completed = !task.is_completed;
        let updated = task.clone();
        self.persist().await?;

        info!(%id, completed = updated.is_completed, "toggled task");
        Ok(Some(updated))
    }

    /// Returns whether a task was removed.
    pub async fn delete_task(&mut self, id: &TaskId) -> Result<bool, StorageError> {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        if self.tasks.len() == before {
            debug!(%id, "delete ignored, unknown task");
            return Ok(false);
        }
        self.persist().await?;

        info!(%id, "deleted task");
        Ok(true)
    }

    /// One record per date that has at least one main task, ascending by date.
    pub fn daily_records(&self) -> impl Iterator<Item = DailyRecord> {
        let mut counts: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();
        for task in self.tasks.iter().filter(|task| task.task_type == TaskType::Main) {
            let entry = counts.entry(task.created_at).or_default();
            if task.is_completed {
                entry.0 = entry.0.saturating_add(1);
            }
            entry.1 = entry.1.saturating_add(1);
        }

        counts.into_iter().map(|(date, (completed, total))| DailyRecord {
            date,
            main_todos_completed: completed,
            total_main_todos: total,
        })
    }

    async fn persist(&self) -> Result<(), StorageError> {
        self.storage.save(&self.tasks).await
    }
}
