use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::model::Task;

/// Fields for a new row; the id is generated at insert time.
#[derive(Debug)]
pub struct NewTask {
    pub user_id: String,
    pub name: String,
    pub initial_date: DateTime<Utc>,
    pub final_date: DateTime<Utc>,
    pub description: Option<String>,
    pub checked: bool,
}

/// Partial overwrite for an existing row. `None` keeps the stored value;
/// `user_id` is always rewritten (to the value the ownership check already
/// matched, so it never actually changes).
#[derive(Debug)]
pub struct TaskPatch {
    pub user_id: String,
    pub name: Option<String>,
    pub initial_date: Option<DateTime<Utc>>,
    pub final_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub checked: Option<bool>,
}

/// Narrow persistence capability the handlers are written against.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Tasks owned by `user_id` whose `initial_date` falls in `[from, to)`.
    /// No ordering guarantee; the caller sorts.
    async fn find_in_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Task>>;

    async fn exists(&self, id: Uuid) -> Result<bool>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>>;

    async fn create(&self, task: NewTask) -> Result<Task>;

    /// Applies the patch and returns the updated row.
    async fn update(&self, id: Uuid, patch: TaskPatch) -> Result<Task>;

    /// Hard delete. Returns the removed row's snapshot, `None` if the id
    /// was already gone.
    async fn remove(&self, id: Uuid) -> Result<Option<Task>>;
}

pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn find_in_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT * FROM tasks
            WHERE user_id = $1 AND initial_date >= $2 AND initial_date < $3
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let found = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM tasks WHERE id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(found)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT * FROM tasks WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn create(&self, task: NewTask) -> Result<Task> {
        let rec = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (id, user_id, name, initial_date, final_date, description, checked)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&task.user_id)
        .bind(&task.name)
        .bind(task.initial_date)
        .bind(task.final_date)
        .bind(&task.description)
        .bind(task.checked)
        .fetch_one(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn update(&self, id: Uuid, patch: TaskPatch) -> Result<Task> {
        let rec = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET
                user_id = $2,
                name = COALESCE($3, name),
                initial_date = COALESCE($4, initial_date),
                final_date = COALESCE($5, final_date),
                description = COALESCE($6, description),
                checked = COALESCE($7, checked)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.user_id)
        .bind(&patch.name)
        .bind(patch.initial_date)
        .bind(patch.final_date)
        .bind(&patch.description)
        .bind(patch.checked)
        .fetch_one(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn remove(&self, id: Uuid) -> Result<Option<Task>> {
        let rec = sqlx::query_as::<_, Task>(
            r#"
            DELETE FROM tasks WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rec)
    }
}
