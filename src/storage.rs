use crate::errors::StorageError;
use crate::models::Task;
use std::{
    future::Future,
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tokio::fs;
use tracing::{debug, error};

/// Key of the single slot holding the task snapshot.
pub const STORAGE_KEY: &str = "todos";

/// Load/save of the full task snapshot. There is no delta persistence: every
/// save replaces whatever the slot held before.
pub trait TaskStorage {
    /// `Ok(None)` when the slot has never been written.
    fn load(&self) -> impl Future<Output = Result<Option<Vec<Task>>, StorageError>> + Send;

    fn save(&self, tasks: &[Task]) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Reads the snapshot, falling back to an empty list on any failure.
pub async fn load_tasks(storage: &impl TaskStorage) -> Vec<Task> {
    match storage.load().await {
        Ok(Some(tasks)) => tasks,
        Ok(None) => Vec::new(),
        Err(err) => {
            error!("{err}; starting from an empty task list");
            Vec::new()
        }
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskStorage for JsonFileStorage {
    async fn load(&self) -> Result<Option<Vec<Task>>, StorageError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StorageError::Read(err)),
        };
        let tasks = serde_json::from_slice(&bytes).map_err(StorageError::Decode)?;
        Ok(Some(tasks))
    }

    async fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let payload = serde_json::to_vec_pretty(tasks).map_err(StorageError::Encode)?;
        fs::write(&self.path, payload)
            .await
            .map_err(StorageError::Write)?;
        debug!(path = %self.path.display(), count = tasks.len(), "persisted tasks");
        Ok(())
    }
}

/// In-process slot holding the encoded snapshot. Clones share the slot, so a
/// test can keep a handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// Current slot contents; `None` if never written or poisoned.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().map(|slot| slot.clone()).unwrap_or_default()
    }
}

impl TaskStorage for MemoryStorage {
    async fn load(&self) -> Result<Option<Vec<Task>>, StorageError> {
        let raw = self
            .slot
            .lock()
            .map_err(|_| StorageError::Poisoned)?
            .clone();
        match raw {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(StorageError::Decode),
            None => Ok(None),
        }
    }

    async fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(tasks).map_err(StorageError::Encode)?;
        let mut slot = self.slot.lock().map_err(|_| StorageError::Poisoned)?;
        *slot = Some(payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskId, TaskType};
    use chrono::NaiveDate;

    fn unique_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("easy_todo_{name}_{}_{nanos}.json", std::process::id()));
        path
    }

    fn sample(count: usize) -> Vec<Task> {
        let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        (0..count)
            .map(|i| Task {
                id: TaskId::generate(),
                content: format!("task {i}"),
                is_completed: i % 2 == 0,
                created_at: day + chrono::Duration::days(i as i64),
                task_type: if i % 3 == 0 { TaskType::Extra } else { TaskType::Main },
            })
            .collect()
    }

    #[tokio::test]
    async fn file_round_trip_preserves_tasks() {
        for count in [0, 1, 7] {
            let storage = JsonFileStorage::new(unique_path("round_trip"));
            let tasks = sample(count);
            storage.save(&tasks).await.unwrap();
            assert_eq!(storage.load().await.unwrap(), Some(tasks));
            let _ = fs::remove_file(storage.path()).await;
        }
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let storage = JsonFileStorage::new(unique_path("missing"));
        assert!(storage.load().await.unwrap().is_none());
        assert!(load_tasks(&storage).await.is_empty());
    }

    #[tokio::test]
    async fn unparsable_file_loads_as_empty() {
        let storage = JsonFileStorage::new(unique_path("garbage"));
        fs::write(storage.path(), b"{\"days\": {}}").await.unwrap();
        assert!(matches!(storage.load().await, Err(StorageError::Decode(_))));
        assert!(load_tasks(&storage).await.is_empty());
        let _ = fs::remove_file(storage.path()).await;
    }

    #[tokio::test]
    async fn memory_storage_reads_legacy_ids() {
        let storage = MemoryStorage::with_raw(
            r#"[{"id":"1735689600000","content":"stretch","isCompleted":false,"createdAt":"2025-01-01","type":"main"}]"#,
        );
        let tasks = load_tasks(&storage).await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id.as_str(), "1735689600000");
        assert_eq!(tasks[0].task_type, TaskType::Main);
    }

    #[tokio::test]
    async fn poisoned_memory_slot_fails_save() {
        let storage = MemoryStorage::new();
        let slot = Arc::clone(&storage.slot);
        let _ = std::thread::spawn(move || {
            let _guard = slot.lock().unwrap();
            panic!("writer crashed while holding the slot");
        })
        .join();

        assert!(matches!(storage.save(&sample(1)).await, Err(StorageError::Poisoned)));
        assert!(matches!(storage.load().await, Err(StorageError::Poisoned)));
    }
}
