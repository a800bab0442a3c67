/// Task CRUD endpoints
///
/// All endpoints require bearer authentication; the owning user for created
/// tasks is always the authenticated caller. Clients reference categories by
/// name; handlers resolve the name to an id before writing (an unknown name
/// is a 400 and nothing is written).
///
/// # Endpoints
///
/// - `GET    /api/tasks` - List all tasks
/// - `POST   /api/tasks` - Create a task
/// - `GET    /api/tasks/:id` - Fetch one task
/// - `PATCH  /api/tasks/:id` - Partial update
/// - `DELETE /api/tasks/:id` - Delete
///
/// # Patch semantics
///
/// Only fields present in the body are changed. `description` and `dueDate`
/// given as null or an empty string are stored as NULL. The body has no
/// owner field, so ownership cannot be reassigned.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use taskdeck_shared::auth::middleware::AuthContext;
use taskdeck_shared::models::{
    category::Category,
    task::{CreateTask, Task, UpdateTask},
};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Create task request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,

    /// Category name (resolved to an id server-side)
    #[validate(custom(function = "not_blank", message = "Category is required"))]
    pub category: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional due date (RFC 3339)
    pub due_date: Option<String>,
}

/// Patch task request
///
/// Every field is optional; `description` and `due_date` use a nested option
/// so an explicit null can be told apart from an absent field.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchTaskRequest {
    /// New title (must be non-empty if supplied)
    pub title: Option<String>,

    /// New completion flag
    pub completed: Option<bool>,

    /// New category name (re-resolved to an id)
    pub category: Option<String>,

    /// New description; null or "" clears it
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    /// New due date (RFC 3339); null or "" clears it
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
}

/// Delete task response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// Rejects empty and whitespace-only strings
///
/// Plain `length(min = 1)` lets "   " through, and a title that renders as
/// blank is not a usable title.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Deserializes a field so that an explicit null becomes `Some(None)` while
/// an absent field stays `None` (via `#[serde(default)]`).
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Treats empty or whitespace-only strings as absent
fn normalize_text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Parses an RFC 3339 due date, mapping failures to a validation error
fn parse_due_date(raw: &str) -> ApiResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            ApiError::ValidationError(vec![ValidationErrorDetail {
                field: "dueDate".to_string(),
                message: "Due date must be an RFC 3339 timestamp".to_string(),
            }])
        })
}

/// Resolves a category name to its row, or fails with a 400
///
/// Per the API contract an unknown category on a write is a client error,
/// not a missing resource.
async fn resolve_category(state: &AppState, name: &str) -> ApiResult<Category> {
    Category::find_by_name(&state.db, name)
        .await?
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown category: {}", name)))
}

/// List all tasks
///
/// ```text
/// GET /api/tasks
/// ```
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list_all(&state.db).await?;
    Ok(Json(tasks))
}

/// Fetch a single task by id
///
/// ```text
/// GET /api/tasks/:id
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no task with this id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Create a task
///
/// ```text
/// POST /api/tasks
/// Content-Type: application/json
///
/// {"title": "Buy milk", "category": "shopping"}
/// ```
///
/// The owner is the authenticated caller. `completed` starts false.
///
/// # Errors
///
/// - `400 Bad Request`: missing title/category, unknown category name,
///   or malformed due date; nothing is inserted
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    let category = resolve_category(&state, &req.category).await?;

    let due_date = match normalize_text(req.due_date) {
        Some(raw) => Some(parse_due_date(&raw)?),
        None => None,
    };

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            user_id: auth.user_id,
            category_id: category.id,
            description: normalize_text(req.description),
            due_date,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Partially update a task
///
/// ```text
/// PATCH /api/tasks/:id
/// Content-Type: application/json
///
/// {"completed": true}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: empty title, unknown category name, or malformed
///   due date; the row is left unchanged
/// - `404 Not Found`: no task with this id
pub async fn patch_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PatchTaskRequest>,
) -> ApiResult<Json<Task>> {
    let mut update = UpdateTask::default();

    if let Some(title) = req.title {
        if title.trim().is_empty() {
            return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
                field: "title".to_string(),
                message: "Title must not be empty".to_string(),
            }]));
        }
        update.title = Some(title);
    }

    update.completed = req.completed;

    // Re-resolve a supplied category name; the raw name never reaches the
    // database. An unknown name fails here, before any write.
    if let Some(name) = req.category {
        let category = resolve_category(&state, &name).await?;
        update.category_id = Some(category.id);
    }

    if let Some(description) = req.description {
        update.description = Some(normalize_text(description));
    }

    if let Some(due_date) = req.due_date {
        update.due_date = Some(match normalize_text(due_date) {
            Some(raw) => Some(parse_due_date(&raw)?),
            None => None,
        });
    }

    let task = Task::update(&state.db, id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Delete a task
///
/// ```text
/// DELETE /api/tasks/:id
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no task with this id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    let deleted = Task::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(DeleteResponse {
        message: format!("Task {} deleted", id),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text(None), None);
        assert_eq!(normalize_text(Some("".to_string())), None);
        assert_eq!(normalize_text(Some("   ".to_string())), None);
        assert_eq!(
            normalize_text(Some("milk".to_string())),
            Some("milk".to_string())
        );
    }

    #[test]
    fn test_parse_due_date() {
        assert!(parse_due_date("2023-12-31T23:59:59.999Z").is_ok());
        assert!(parse_due_date("not-a-date").is_err());
        assert!(parse_due_date("2023-12-31").is_err());
    }

    #[test]
    fn test_patch_request_distinguishes_null_from_absent() {
        let req: PatchTaskRequest = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(req.description, Some(None));
        assert_eq!(req.due_date, None);

        let req: PatchTaskRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(req.description, None);

        let req: PatchTaskRequest =
            serde_json::from_str(r#"{"description": "notes"}"#).unwrap();
        assert_eq!(req.description, Some(Some("notes".to_string())));
    }

    #[test]
    fn test_patch_request_has_no_owner_field() {
        // userId in the body is simply ignored; ownership cannot move.
        let req: PatchTaskRequest = serde_json::from_str(
            r#"{"completed": true, "userId": "7b37ed00-61b4-4a34-a616-6a140ae5772e"}"#,
        )
        .unwrap();
        assert_eq!(req.completed, Some(true));
    }

    #[test]
    fn test_create_request_requires_title_and_category() {
        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"title": "", "category": "shopping"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"title": "Buy milk", "category": ""}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"title": "Buy milk", "category": "shopping"}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_blank_title_and_category() {
        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"title": "   ", "category": "shopping"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"title": "Buy milk", "category": "  \t "}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
