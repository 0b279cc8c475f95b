//! REST handlers for `/api/todos`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::{ApiError, AppState};
use crate::entities::todo::{self, Priority};
use crate::entities::category;
use crate::filters::{self, DueFilter, StatusFilter, TodoFilters};
use crate::repositories::TodoRepository;
use crate::search;
use crate::utils::datetime;

/// Category as embedded in todo responses and `/api/categories` bodies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBody {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl From<category::Model> for CategoryBody {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            color: model.color,
            created_at: model.created_at,
        }
    }
}

/// Todo response body with its category embedded and tags decoded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoBody {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
    pub category: Option<CategoryBody>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoBody {
    pub fn from_model(todo: todo::Model, category: Option<category::Model>) -> Self {
        let tags = todo.tag_list();
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
            priority: todo.priority,
            due_date: todo.due_date,
            category_id: todo.category_id,
            category: category.map(CategoryBody::from),
            tags,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Update payload. Omitted `title`/`description`/`completed`/`priority`/
/// `categoryId` leave the stored value unchanged; `dueDate` and `tags` are
/// always taken from the payload, so omitting them clears the field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Query parameters of `GET /api/todos`, mapped onto [`TodoFilters`].
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<StatusFilter>,
    pub priority: Option<Priority>,
    pub category: Option<Uuid>,
    /// Comma-separated tag names
    pub tags: Option<String>,
    pub search: Option<String>,
    pub due: Option<DueFilter>,
    /// Advanced search string, parsed on top of the explicit parameters
    pub q: Option<String>,
}

impl ListQuery {
    pub fn into_filters(self) -> TodoFilters {
        let mut filters = TodoFilters {
            status: self.status.unwrap_or_default(),
            priority: self.priority,
            category: self.category,
            tags: self
                .tags
                .map(|tags| {
                    tags.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            search: self.search.filter(|s| !s.trim().is_empty()),
            due: self.due.unwrap_or_default(),
        };

        if let Some(query) = self.q.as_deref().filter(|q| !q.trim().is_empty()) {
            filters = search::parse_query(query, &filters);
        }

        filters
    }
}

/// `GET /api/todos`
pub async fn list_todos(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<TodoBody>>, ApiError> {
    let filters = query.into_filters();
    let today = datetime::today();

    let mut rows = TodoRepository::get_all_with_categories(&state.storage.conn).await?;

    if !filters.is_empty() {
        rows.retain(|(todo, _)| filters.matches(todo, today));
        rows.sort_by(|(a, _), (b, _)| filters::compare_todos(a, b, today));
    }

    let todos = rows
        .into_iter()
        .map(|(todo, category)| TodoBody::from_model(todo, category))
        .collect();
    Ok(Json(todos))
}

/// `POST /api/todos`
pub async fn create_todo(
    State(state): State<AppState>,
    Json(body): Json<CreateTodo>,
) -> Result<(StatusCode, Json<TodoBody>), ApiError> {
    if body.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title cannot be empty"));
    }

    let now = Utc::now();
    let model = todo::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(body.title),
        description: Set(body.description),
        completed: Set(false),
        priority: Set(body.priority),
        due_date: Set(body.due_date),
        category_id: Set(body.category_id),
        tags: Set(todo::encode_tags(&body.tags)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = TodoRepository::insert(&state.storage.conn, model).await?;
    let (created, category) =
        TodoRepository::get_by_id_with_category(&state.storage.conn, &created.id)
            .await?
            .ok_or(ApiError::NotFound("Todo"))?;

    Ok((StatusCode::CREATED, Json(TodoBody::from_model(created, category))))
}

/// `PUT /api/todos/:id`
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTodo>,
) -> Result<Json<TodoBody>, ApiError> {
    let conn = &state.storage.conn;
    let existing = TodoRepository::get_by_id(conn, &id)
        .await?
        .ok_or(ApiError::NotFound("Todo"))?;

    let mut model: todo::ActiveModel = existing.into();

    if let Some(title) = body.title {
        if title.trim().is_empty() {
            return Err(ApiError::BadRequest("title cannot be empty"));
        }
        model.title = Set(title);
    }
    if let Some(description) = body.description {
        model.description = Set(Some(description));
    }
    if let Some(completed) = body.completed {
        model.completed = Set(completed);
    }
    if let Some(priority) = body.priority {
        model.priority = Set(priority);
    }
    if let Some(category_id) = body.category_id {
        model.category_id = Set(Some(category_id));
    }
    model.due_date = Set(body.due_date);
    model.tags = Set(todo::encode_tags(&body.tags.unwrap_or_default()));
    model.updated_at = Set(Utc::now());

    TodoRepository::update(conn, model).await?;
    let (updated, category) = TodoRepository::get_by_id_with_category(conn, &id)
        .await?
        .ok_or(ApiError::NotFound("Todo"))?;

    Ok(Json(TodoBody::from_model(updated, category)))
}

/// `DELETE /api/todos/:id`
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let conn = &state.storage.conn;
    let existing = TodoRepository::get_by_id(conn, &id)
        .await?
        .ok_or(ApiError::NotFound("Todo"))?;

    TodoRepository::delete(conn, existing).await?;
    Ok(Json(json!({ "message": "Todo deleted successfully" })))
}
