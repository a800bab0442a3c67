/// Task model and database operations
///
/// Tasks are the core entity: a unit of work owned by exactly one user and
/// classified under exactly one category. There is no status machine beyond
/// the `completed` flag.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title TEXT NOT NULL,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     category_id UUID NOT NULL REFERENCES categories(id) ON DELETE RESTRICT,
///     description TEXT,
///     due_date TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::task::{Task, CreateTask};
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example(user_id: Uuid, category_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     title: "Buy milk".to_string(),
///     user_id,
///     category_id,
///     description: None,
///     due_date: None,
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task id (UUID v4)
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Completion flag (defaults to false on creation)
    pub completed: bool,

    /// Owning user (cascade-deleted with the user)
    pub user_id: Uuid,

    /// Category (deletion restricted while referenced)
    pub category_id: Uuid,

    /// Optional free-form description
    pub description: Option<String>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// The category name has already been resolved to an id by the caller.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Input for partially updating a task
///
/// Only `Some` fields are written. The nested options distinguish
/// "leave unchanged" (`None`) from "set to NULL" (`Some(None)`).
/// Ownership is deliberately absent: a task cannot be reassigned.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New completion flag
    pub completed: Option<bool>,

    /// New category id (resolved from a name by the caller)
    pub category_id: Option<Uuid>,

    /// New description (`Some(None)` clears it)
    pub description: Option<Option<String>>,

    /// New due date (`Some(None)` clears it)
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateTask {
    /// True when no field would be written
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.completed.is_none()
            && self.category_id.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
    }
}

const TASK_COLUMNS: &str =
    "id, title, completed, user_id, category_id, description, due_date, created_at, updated_at";

impl Task {
    /// Creates a new task
    ///
    /// `completed` starts false; id and timestamps are server-assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced user or category no longer exists
    /// (foreign-key violation) or the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (title, user_id, category_id, description, due_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(data.title)
        .bind(data.user_id)
        .bind(data.category_id)
        .bind(data.description)
        .bind(data.due_date)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks, oldest first
    ///
    /// No filtering or pagination; the whole board is one list.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at ASC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Applies a partial update to a task
    ///
    /// Only fields present in `data` are written; `updated_at` is always
    /// refreshed. An empty update still bumps `updated_at` and returns the
    /// current row.
    ///
    /// # Returns
    ///
    /// The updated task, or None if no row matched the id.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the SET clause dynamically from the supplied fields
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.completed.is_some() {
            bind_count += 1;
            query.push_str(&format!(", completed = ${}", bind_count));
        }
        if data.category_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", category_id = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {TASK_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(completed) = data.completed {
            q = q.bind(completed);
        }
        if let Some(category_id) = data.category_id {
            q = q.bind(category_id);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task by id
    ///
    /// # Returns
    ///
    /// True if a task was deleted, false if none matched.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_task_default_is_empty() {
        let update = UpdateTask::default();
        assert!(update.is_empty());
    }

    #[test]
    fn test_update_task_with_field_is_not_empty() {
        let update = UpdateTask {
            completed: Some(true),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task {
            id: Uuid::new_v4(),
            title: "Buy milk".to_string(),
            completed: false,
            user_id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            description: None,
            due_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("categoryId").is_some());
        assert!(json.get("dueDate").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("category_id").is_none());
        assert_eq!(json["completed"], serde_json::Value::Bool(false));
    }

    // Integration tests for database operations are in taskdeck-api/tests/.
}
