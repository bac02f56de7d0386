use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use thiserror::Error;

/// Every failure a task handler can surface, mapped to the HTTP contract.
///
/// `NotFound` deliberately answers 400 rather than 404, and `Forbidden`
/// keeps the historical "Aceess denied" spelling; both are part of the
/// external contract clients already depend on.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Token is missing")]
    MissingToken,

    /// The token service refused access; its status and message pass
    /// through verbatim.
    #[error("{message}")]
    Denied { status: u16, message: String },

    #[error("{0}")]
    Rule(&'static str),

    #[error("Task does not exist")]
    NotFound,

    #[error("Aceess denied")]
    Forbidden,

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub const DATE_ORDER: &str = "Final date must be greater than start date";
pub const DAY_OVERRUN: &str = "The task overcomming the day";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_)
            | ApiError::MissingToken
            | ApiError::Rule(_)
            | ApiError::NotFound => StatusCode::BAD_REQUEST,
            ApiError::Denied { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Unexpected(e) => {
                tracing::error!("unexpected handler error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_400_not_404() {
        let resp = ApiError::NotFound.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn denied_uses_checker_supplied_status() {
        let resp = ApiError::Denied {
            status: 401,
            message: "expired".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn denied_with_bogus_status_falls_back_to_500() {
        let resp = ApiError::Denied {
            status: 42,
            message: "weird".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
