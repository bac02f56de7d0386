use chrono::DateTime;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-owned, time-windowed to-do item. `user_id` is an opaque owner
/// reference (the identity service owns user records); ownership is only
/// ever checked by equality at mutation time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "initialDate")]
    pub initial_date: DateTime<Utc>,
    #[serde(rename = "finalDate")]
    pub final_date: DateTime<Utc>,
    pub description: Option<String>,
    pub checked: bool,
}
