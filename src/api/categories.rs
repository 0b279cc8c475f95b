//! REST handlers for `/api/categories`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::todos::CategoryBody;
use crate::api::{ApiError, AppState};
use crate::constants::DEFAULT_CATEGORY_COLOR;
use crate::entities::category;
use crate::repositories::CategoryRepository;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// `GET /api/categories`
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryBody>>, ApiError> {
    let categories = CategoryRepository::get_all(&state.storage.conn).await?;
    Ok(Json(categories.into_iter().map(CategoryBody::from).collect()))
}

/// `POST /api/categories`
pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CreateCategory>,
) -> Result<(StatusCode, Json<CategoryBody>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name cannot be empty"));
    }

    let model = category::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(body.name),
        color: Set(body.color.unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string())),
        created_at: Set(Utc::now()),
    };

    let created = CategoryRepository::insert(&state.storage.conn, model).await?;
    Ok((StatusCode::CREATED, Json(CategoryBody::from(created))))
}

/// `PUT /api/categories/:id`
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCategory>,
) -> Result<Json<CategoryBody>, ApiError> {
    let conn = &state.storage.conn;
    let existing = CategoryRepository::get_by_id(conn, &id)
        .await?
        .ok_or(ApiError::NotFound("Category"))?;

    let mut model: category::ActiveModel = existing.into();
    if let Some(name) = body.name {
        if name.trim().is_empty() {
            return Err(ApiError::BadRequest("name cannot be empty"));
        }
        model.name = Set(name);
    }
    if let Some(color) = body.color {
        model.color = Set(color);
    }

    let updated = CategoryRepository::update(conn, model).await?;
    Ok(Json(CategoryBody::from(updated)))
}

/// `DELETE /api/categories/:id`
///
/// Detaches referencing todos rather than deleting them.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let conn = &state.storage.conn;
    let existing = CategoryRepository::get_by_id(conn, &id)
        .await?
        .ok_or(ApiError::NotFound("Category"))?;

    let detached = CategoryRepository::delete_detaching(conn, existing).await?;
    Ok(Json(json!({
        "message": "Category deleted successfully",
        "detachedTodos": detached,
    })))
}
