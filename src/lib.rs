pub mod app;
pub mod calendar;
pub mod config;
pub mod daily;
pub mod errors;
pub mod handlers;
pub mod heatmap;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{JsonFileStorage, MemoryStorage, TaskStorage};
pub use store::TaskStore;
