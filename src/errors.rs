use axum::http::StatusCode;
use chrono::NaiveDate;
use thiserror::Error;

/// Failures of the task snapshot slot.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read task snapshot: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write task snapshot: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to encode task snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode task snapshot: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("task snapshot slot is poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("cannot toggle a task dated {date}, which is in the future")]
    FutureTask { date: NaiveDate },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::internal(err)
    }
}

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::FutureTask { .. } => Self::unprocessable(err.to_string()),
            TaskError::Storage(err) => Self::internal(err),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn future_task_maps_to_unprocessable() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let err = AppError::from(TaskError::FutureTask { date });
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.message.contains("2026-03-02"));
    }

    #[test]
    fn storage_fault_maps_to_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AppError::from(TaskError::Storage(StorageError::Write(io)));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.contains("denied"));
    }
}
