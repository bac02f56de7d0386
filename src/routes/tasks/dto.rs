use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::ApiError;

/// Required-field check run before any business logic. Date parsing has
/// already happened at deserialization, so this only guards the fields
/// serde cannot (non-empty strings).
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

/// Range query, read from the request body per the external contract
/// (yes, on a GET).
#[derive(Debug, Deserialize)]
pub struct ListTasks {
    pub user_id: String,
    #[serde(rename = "initialDate")]
    pub initial_date: DateTime<Utc>,
    #[serde(rename = "finalDate")]
    pub final_date: DateTime<Utc>,
}

impl Validate for ListTasks {
    fn validate(&self) -> Result<(), ApiError> {
        require(&self.user_id, "user_id")
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub user_id: String,
    pub name: String,
    #[serde(rename = "initialDate")]
    pub initial_date: DateTime<Utc>,
    #[serde(rename = "finalDate")]
    pub final_date: DateTime<Utc>,
    pub description: Option<String>,
    pub checked: Option<bool>,
}

impl Validate for CreateTask {
    fn validate(&self) -> Result<(), ApiError> {
        require(&self.user_id, "user_id")?;
        require(&self.name, "name")
    }
}

/// Partial update. Dates use `empty_as_none` so an explicitly falsy value
/// (empty string) behaves exactly like omission: the stored value wins.
#[derive(Debug, Deserialize)]
pub struct UpdateTask {
    pub user_id: String,
    pub name: Option<String>,
    #[serde(rename = "initialDate", default, deserialize_with = "empty_as_none")]
    pub initial_date: Option<DateTime<Utc>>,
    #[serde(rename = "finalDate", default, deserialize_with = "empty_as_none")]
    pub final_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub checked: Option<bool>,
}

impl Validate for UpdateTask {
    fn validate(&self) -> Result<(), ApiError> {
        require(&self.user_id, "user_id")
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteTask {
    pub user_id: String,
}

impl Validate for DeleteTask {
    fn validate(&self) -> Result<(), ApiError> {
        require(&self.user_id, "user_id")
    }
}

fn require(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<DateTime<Utc>>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_treats_empty_string_date_as_absent() {
        let dto: UpdateTask = serde_json::from_value(serde_json::json!({
            "user_id": "u1",
            "initialDate": "",
            "finalDate": "2024-01-05T10:00:00Z",
        }))
        .unwrap();
        assert!(dto.initial_date.is_none());
        assert!(dto.final_date.is_some());
    }

    #[test]
    fn update_rejects_garbage_date() {
        let res = serde_json::from_value::<UpdateTask>(serde_json::json!({
            "user_id": "u1",
            "initialDate": "not-a-date",
        }));
        assert!(res.is_err());
    }

    #[test]
    fn blank_user_id_fails_validation() {
        let dto = DeleteTask {
            user_id: "   ".into(),
        };
        assert!(dto.validate().is_err());
    }
}
