use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use uuid::Uuid;

use super::dto::{CreateTask, DeleteTask, ListTasks, UpdateTask};
use super::gate;
use super::model::Task;
use super::store::{NewTask, TaskPatch};
use crate::error::ApiError;
use crate::state::AppState;

/// The token travels as a raw `token` header, not a Bearer scheme.
fn token(headers: &HeaderMap) -> Option<&str> {
    headers.get("token").and_then(|v| v.to_str().ok())
}

pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ListTasks>, JsonRejection>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let query = gate::shape(body)?;

    gate::authorize(state.verifier.as_ref(), &query.user_id, token(&headers)).await?;
    gate::require_window(query.initial_date, query.final_date)?;

    let mut tasks = state
        .store
        .find_in_range(&query.user_id, query.initial_date, query.final_date)
        .await?;

    tasks.sort_by_key(|t| t.initial_date);

    Ok(Json(tasks))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateTask>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let payload = gate::shape(body)?;

    gate::authorize(state.verifier.as_ref(), &payload.user_id, token(&headers)).await?;
    gate::require_same_day_window(payload.initial_date, payload.final_date)?;

    let task = state
        .store
        .create(NewTask {
            user_id: payload.user_id,
            name: payload.name,
            initial_date: payload.initial_date,
            final_date: payload.final_date,
            description: payload.description,
            checked: payload.checked.unwrap_or(false),
        })
        .await?;

    Ok(Json(task))
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateTask>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = gate::path_id(id)?;
    let payload = gate::shape(body)?;

    gate::authorize(state.verifier.as_ref(), &payload.user_id, token(&headers)).await?;
    gate::load_owned(state.store.as_ref(), id, &payload.user_id).await?;

    let task = state
        .store
        .update(
            id,
            TaskPatch {
                user_id: payload.user_id,
                name: payload.name,
                initial_date: payload.initial_date,
                final_date: payload.final_date,
                description: payload.description,
                checked: payload.checked,
            },
        )
        .await?;

    Ok(Json(task))
}

pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<DeleteTask>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = gate::path_id(id)?;
    let payload = gate::shape(body)?;

    gate::authorize(state.verifier.as_ref(), &payload.user_id, token(&headers)).await?;
    gate::load_owned(state.store.as_ref(), id, &payload.user_id).await?;

    // A concurrent delete between the ownership check and here leaves
    // nothing to remove; that race is surfaced, not absorbed.
    let deleted = state.store.remove(id).await?.ok_or_else(|| {
        ApiError::from(anyhow::anyhow!("task {id} vanished before removal"))
    })?;

    Ok(Json(deleted))
}
