/// Category CRUD endpoints
///
/// Categories are referenced by name from clients; this module provides the
/// listing the client filter needs plus create/delete for administration.
/// All endpoints require bearer authentication.
///
/// # Endpoints
///
/// - `GET    /api/categories` - List all categories
/// - `POST   /api/categories` - Create a category
/// - `DELETE /api/categories/:id` - Delete (fails 409 while referenced)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskdeck_shared::models::category::{Category, CreateCategory};
use uuid::Uuid;
use validator::Validate;

/// Create category request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Unique category name
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    /// Optional description
    pub description: Option<String>,
}

/// List all categories
///
/// ```text
/// GET /api/categories
/// ```
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    let categories = Category::list_all(&state.db).await?;
    Ok(Json(categories))
}

/// Create a category
///
/// ```text
/// POST /api/categories
/// Content-Type: application/json
///
/// {"name": "shopping", "description": "Errands"}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `409 Conflict`: name already exists
pub async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    req.validate()?;

    let category = Category::create(
        &state.db,
        CreateCategory {
            name: req.name,
            description: req.description.filter(|s| !s.trim().is_empty()),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Delete a category
///
/// ```text
/// DELETE /api/categories/:id
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no category with this id
/// - `409 Conflict`: tasks still reference this category (restrict FK)
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    // The restrict FK on tasks rejects the delete while tasks still point at
    // this category. Only this call site expects that violation, so it is
    // translated here rather than in the blanket sqlx conversion.
    let deleted = match Category::delete(&state.db, id).await {
        Ok(deleted) => deleted,
        Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
            return Err(ApiError::Conflict(
                "Category is still referenced by tasks".to_string(),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    if !deleted {
        return Err(ApiError::NotFound("Category not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_category_request_requires_name() {
        let req: CreateCategoryRequest = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CreateCategoryRequest =
            serde_json::from_str(r#"{"name": "shopping"}"#).unwrap();
        assert!(req.validate().is_ok());
    }
}
