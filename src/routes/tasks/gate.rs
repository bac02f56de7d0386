//! The ordered request pipeline shared by all four task handlers:
//! shape validation, then the token gate, then business rules and the
//! ownership check. Later stages rely on this ordering (ownership assumes
//! a validated body and a confirmed-live token), so handlers must compose
//! these in the order they appear here.

use anyhow::anyhow;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;
use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use super::dto::Validate;
use super::model::Task;
use super::store::TaskStore;
use crate::error::{ApiError, DATE_ORDER, DAY_OVERRUN};
use crate::token::TokenVerifier;

/// Stage 1: body parse + required-field check. A rejected body (malformed
/// JSON, missing field, unparseable date) reports as a 400 validation
/// error, same as a failed field check.
pub fn shape<T: Validate>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let Json(dto) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    dto.validate()?;
    Ok(dto)
}

/// Path-id half of stage 1: a malformed id reports as a 400 validation
/// error with the contract's `{"error": …}` body, same as a rejected
/// request body, instead of axum's plain-text rejection.
pub fn path_id(id: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::Validation(e.body_text()))?;
    Ok(id)
}

/// Stage 2: the token gate. Missing header is a local 400; a denial from
/// the verifier passes its status and message through verbatim.
pub async fn authorize(
    verifier: &dyn TokenVerifier,
    user_id: &str,
    token: Option<&str>,
) -> Result<(), ApiError> {
    let token = token.ok_or(ApiError::MissingToken)?;

    let decision = verifier.check(user_id, token).await?;

    if !decision.access {
        return Err(ApiError::Denied {
            status: decision.status,
            message: decision.message,
        });
    }

    Ok(())
}

/// List-path window check. Compares day-of-month numbers only, not the
/// full timestamps. Known quirk carried over from the original contract:
/// a window like Jan 31 -> Feb 1 is rejected even though it is
/// chronologically forward.
pub fn require_window(
    initial_date: DateTime<Utc>,
    final_date: DateTime<Utc>,
) -> Result<(), ApiError> {
    if initial_date.day() > final_date.day() {
        return Err(ApiError::Rule(DATE_ORDER));
    }
    Ok(())
}

/// Create-path rules: true timestamp ordering, then the same-day
/// constraint (day-of-month equality, matching the window check above).
pub fn require_same_day_window(
    initial_date: DateTime<Utc>,
    final_date: DateTime<Utc>,
) -> Result<(), ApiError> {
    if initial_date > final_date {
        return Err(ApiError::Rule(DATE_ORDER));
    }
    if initial_date.day() != final_date.day() {
        return Err(ApiError::Rule(DAY_OVERRUN));
    }
    Ok(())
}

/// Stage 3 for mutations: confirm the id is live, load the row, and check
/// ownership. The existence probe and the load are two separate reads with
/// no transaction; a concurrent delete between them surfaces as a 500.
pub async fn load_owned(
    store: &dyn TaskStore,
    id: Uuid,
    user_id: &str,
) -> Result<Task, ApiError> {
    if !store.exists(id).await? {
        return Err(ApiError::NotFound);
    }

    let task = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::from(anyhow!("task {id} vanished after existence check")))?;

    if task.user_id != user_id {
        return Err(ApiError::Forbidden);
    }

    Ok(task)
}
