use crate::calendar::{today, DaySelection, Week};
use crate::daily::{is_future, tasks_for_day, toggle_task_at};
use crate::errors::{AppError, TaskError};
use crate::heatmap::{build_heatmap, Heatmap, HeatmapRange, DEFAULT_TRAILING_DAYS, MAX_TRAILING_DAYS};
use crate::models::{
    DailyRecord, DayForm, DayResponse, DeleteResponse, HeatmapQuery, IndexQuery, NewTaskForm,
    NewTaskRequest, Task, TaskId, ToggleResponse, WeekResponse,
};
use crate::state::AppState;
use crate::ui::{render_index, IndexPage, FUTURE_TASK_NOTICE};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::NaiveDate;

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, AppError> {
    let today = today();
    let selection = DaySelection::restore(query.day, query.week, today);
    let range = query.year.map(HeatmapRange::Year).unwrap_or_default();

    let store = state.store.lock().await;
    let heatmap = heatmap_for(store.daily_records(), range, today)?;
    let page = IndexPage {
        today,
        selection,
        day: tasks_for_day(store.tasks(), selection.day()),
        heatmap,
        notice: query.notice.as_deref() == Some(FUTURE_TASK_NOTICE),
    };
    Ok(Html(render_index(&page)))
}

pub async fn form_add(
    State(state): State<AppState>,
    Form(form): Form<NewTaskForm>,
) -> Result<Redirect, AppError> {
    let day = form.day.unwrap_or_else(today);
    let content = form.content.trim();
    if !content.is_empty() {
        let mut store = state.store.lock().await;
        store.add_task(content, form.task_type, Some(day)).await?;
    }
    Ok(Redirect::to(&page_location(day, form.week, None)))
}

pub async fn form_toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DayForm>,
) -> Result<Redirect, AppError> {
    let day = form.day.unwrap_or_else(today);
    let mut store = state.store.lock().await;
    let notice = match toggle_task_at(&mut *store, &TaskId::from(id), today()).await {
        Ok(_) => None,
        Err(TaskError::FutureTask { .. }) => Some(FUTURE_TASK_NOTICE),
        Err(err) => return Err(err.into()),
    };
    Ok(Redirect::to(&page_location(day, form.week, notice)))
}

pub async fn form_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DayForm>,
) -> Result<Redirect, AppError> {
    let day = form.day.unwrap_or_else(today);
    let mut store = state.store.lock().await;
    store.delete_task(&TaskId::from(id)).await?;
    Ok(Redirect::to(&page_location(day, form.week, None)))
}

pub async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    let store = state.store.lock().await;
    Json(store.tasks().to_vec())
}

pub async fn add_task(
    State(state): State<AppState>,
    Json(payload): Json<NewTaskRequest>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let content = payload.content.trim();
    if content.is_empty() {
        return Err(AppError::bad_request("content must not be empty"));
    }

    let mut store = state.store.lock().await;
    let task = store.add_task(content, payload.task_type, payload.date).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, AppError> {
    let id = TaskId::from(id);
    let mut store = state.store.lock().await;
    let task = toggle_task_at(&mut *store, &id, today()).await?;
    Ok(Json(ToggleResponse {
        found: task.is_some(),
        id,
        task,
    }))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = TaskId::from(id);
    let mut store = state.store.lock().await;
    let removed = store.delete_task(&id).await?;
    Ok(Json(DeleteResponse { id, removed }))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Json<DayResponse> {
    let store = state.store.lock().await;
    let day = tasks_for_day(store.tasks(), date);
    Json(DayResponse {
        date,
        is_future: is_future(date, today()),
        week: week_response(Week::containing(date)),
        main: day.main,
        extra: day.extra,
    })
}

pub async fn get_records(State(state): State<AppState>) -> Json<Vec<DailyRecord>> {
    let store = state.store.lock().await;
    Json(store.daily_records().collect())
}

pub async fn get_heatmap(
    State(state): State<AppState>,
    Query(query): Query<HeatmapQuery>,
) -> Result<Json<Heatmap>, AppError> {
    let range = match (query.year, query.days) {
        (Some(year), _) => HeatmapRange::Year(year),
        (None, Some(days)) if days == 0 || days > MAX_TRAILING_DAYS => {
            return Err(AppError::bad_request(format!(
                "days must be between 1 and {MAX_TRAILING_DAYS}"
            )));
        }
        (None, days) => HeatmapRange::Trailing {
            days: days.unwrap_or(DEFAULT_TRAILING_DAYS),
        },
    };

    let store = state.store.lock().await;
    Ok(Json(heatmap_for(store.daily_records(), range, today())?))
}

fn heatmap_for(
    records: impl IntoIterator<Item = DailyRecord>,
    range: HeatmapRange,
    today: NaiveDate,
) -> Result<Heatmap, AppError> {
    build_heatmap(records, range, today).ok_or_else(|| AppError::bad_request("year is out of range"))
}

fn week_response(week: Week) -> WeekResponse {
    WeekResponse {
        start_date: week.start(),
        end_date: week.end(),
        days: week.days().to_vec(),
        prev_start: week.prev().start(),
        next_start: week.next().start(),
    }
}

fn page_location(day: NaiveDate, week: Option<NaiveDate>, notice: Option<&str>) -> String {
    let mut location = format!("/?day={day}");
    if let Some(week) = week {
        location.push_str(&format!("&week={week}"));
    }
    if let Some(notice) = notice {
        location.push_str(&format!("&notice={notice}"));
    }
    location
}
