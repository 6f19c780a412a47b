use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Main,
    Extra,
}

impl TaskType {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::Main => "main",
            TaskType::Extra => "extra",
        }
    }
}

/// A single to-do item. Field names on the wire match the stored snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub content: String,
    pub is_completed: bool,
    pub created_at: NaiveDate,
    #[serde(rename = "type")]
    pub task_type: TaskType,
}

/// Per-date aggregate of main-task completion. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub main_todos_completed: u32,
    pub total_main_todos: u32,
}

#[derive(Debug, Deserialize)]
pub struct NewTaskRequest {
    pub content: String,
    #[serde(rename = "type", default)]
    pub task_type: TaskType,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct NewTaskForm {
    pub content: String,
    #[serde(rename = "type", default)]
    pub task_type: TaskType,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub day: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub week: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DayForm {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub day: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub week: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Default)]
pub struct IndexQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub day: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub week: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub year: Option<i32>,
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct HeatmapQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub days: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub year: Option<i32>,
}

/// Form and query fields arrive as empty strings when a browser input is
/// cleared; those read as absent.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub id: TaskId,
    pub found: bool,
    pub task: Option<Task>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: TaskId,
    pub removed: bool,
}

#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<NaiveDate>,
    pub prev_start: NaiveDate,
    pub next_start: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: NaiveDate,
    pub is_future: bool,
    pub week: WeekResponse,
    pub main: Vec<Task>,
    pub extra: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serializes_with_snapshot_field_names() {
        let task = Task {
            id: TaskId::from("1735689600000"),
            content: "read".into(),
            is_completed: true,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            task_type: TaskType::Extra,
        };

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "1735689600000",
                "content": "read",
                "isCompleted": true,
                "createdAt": "2025-01-01",
                "type": "extra",
            })
        );
    }

    #[test]
    fn new_task_request_defaults_to_main() {
        let request: NewTaskRequest = serde_json::from_str(r#"{"content":"walk"}"#).unwrap();
        assert_eq!(request.task_type, TaskType::Main);
        assert!(request.date.is_none());
    }

    fn query<T: serde::de::DeserializeOwned>(uri: &str) -> T {
        let uri: axum::http::Uri = uri.parse().unwrap();
        axum::extract::Query::<T>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn cleared_date_inputs_read_as_absent() {
        let index: IndexQuery = query("/?day=&week=&year=");
        assert!(index.day.is_none());
        assert!(index.week.is_none());
        assert!(index.year.is_none());

        let form: DayForm = query("/?day=&week=2026-10-19");
        assert!(form.day.is_none());
        assert_eq!(form.week, NaiveDate::from_ymd_opt(2026, 10, 19));

        let form: NewTaskForm = query("/?content=walk&day=");
        assert!(form.day.is_none());
        assert_eq!(form.task_type, TaskType::Main);
    }

    #[test]
    fn malformed_dates_are_still_rejected() {
        let uri: axum::http::Uri = "/?day=2026-13-40".parse().unwrap();
        assert!(axum::extract::Query::<IndexQuery>::try_from_uri(&uri).is_err());
    }
}
