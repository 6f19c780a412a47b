use crate::errors::TaskError;
use crate::models::{Task, TaskId, TaskType};
use crate::storage::TaskStorage;
use crate::store::TaskStore;
use chrono::NaiveDate;
use tracing::warn;

/// Tasks created on one day, split by type in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTasks {
    pub date: NaiveDate,
    pub main: Vec<Task>,
    pub extra: Vec<Task>,
}

pub fn tasks_for_day(tasks: &[Task], date: NaiveDate) -> DayTasks {
    let (main, extra) = tasks
        .iter()
        .filter(|task| task.created_at == date)
        .cloned()
        .partition(|task| task.task_type == TaskType::Main);
    DayTasks { date, main, extra }
}

pub fn is_future(date: NaiveDate, today: NaiveDate) -> bool {
    date > today
}

/// Toggles a task unless it is dated after `today`. Unknown ids are a no-op.
pub async fn toggle_task_at<S: TaskStorage>(
    store: &mut TaskStore<S>,
    id: &TaskId,
    today: NaiveDate,
) -> Result<Option<Task>, TaskError> {
    if let Some(task) = store.task(id) {
        if is_future(task.created_at, today) {
            warn!(%id, date = %task.created_at, "rejected toggle of future task");
            return Err(TaskError::FutureTask {
                date: task.created_at,
            });
        }
    }
    Ok(store.toggle_task(id).await?)
}
