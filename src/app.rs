use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/tasks", post(handlers::form_add))
        .route("/tasks/:id/toggle", post(handlers::form_toggle))
        .route("/tasks/:id/delete", post(handlers::form_delete))
        .route("/api/tasks", get(handlers::list_tasks).post(handlers::add_task))
        .route("/api/tasks/:id", delete(handlers::delete_task))
        .route("/api/tasks/:id/toggle", post(handlers::toggle_task))
        .route("/api/days/:date", get(handlers::get_day))
        .route("/api/records", get(handlers::get_records))
        .route("/api/heatmap", get(handlers::get_heatmap))
        .with_state(state)
}
