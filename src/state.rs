use crate::storage::JsonFileStorage;
use crate::store::TaskStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<TaskStore<JsonFileStorage>>>,
}

impl AppState {
    pub fn new(store: TaskStore<JsonFileStorage>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}
