//! Server-rendered browser page.
//!
//! A single HTML page listing todos with plain-form add/toggle/delete
//! actions. Filters come from the query string and reuse the same
//! [`ListQuery`] as the REST listing.

use axum::extract::{Form, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use sea_orm::Set;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::api::todos::ListQuery;
use crate::api::{ApiError, AppState};
use crate::entities::todo::Priority;
use crate::entities::{category, todo};
use crate::filters::{self, StatusFilter};
use crate::repositories::{CategoryRepository, TodoRepository};
use crate::utils::datetime;

#[derive(Deserialize)]
pub struct AddForm {
    title: String,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    category_id: Option<Uuid>,
    /// Due date as YYYY-MM-DD, empty when the date input is left blank
    #[serde(default)]
    due_date: Option<String>,
}

/// The "no category" option submits an empty string.
fn empty_string_as_none<'de, D>(de: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => Uuid::parse_str(s).map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Deserialize)]
pub struct IdForm {
    id: Uuid,
}

/// `GET /` - the todo list page.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, ApiError> {
    let filters = query.into_filters();
    let today = datetime::today();
    let conn = &state.storage.conn;

    let mut rows = TodoRepository::get_all_with_categories(conn).await?;
    rows.retain(|(todo, _)| filters.matches(todo, today));
    rows.sort_by(|(a, _), (b, _)| filters::compare_todos(a, b, today));

    let categories = CategoryRepository::get_all(conn).await?;

    let mut body = String::new();
    body.push_str(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>taskdeck</title>
  <style>
    :root { font-family: system-ui, sans-serif; background: #f4f5f7; }
    body { margin: 0; padding: 32px; display: flex; justify-content: center; }
    .app { width: min(720px, 100%); background: #fff; border-radius: 12px; padding: 28px;
           box-shadow: 0 12px 32px rgba(15, 23, 42, 0.08); }
    h1 { margin: 0 0 4px 0; }
    .subtitle { color: #64748b; margin-bottom: 20px; }
    form.add { display: flex; gap: 8px; margin-bottom: 20px; }
    form.add input[type="text"] { flex: 1; padding: 10px; border: 1px solid #e2e8f0; border-radius: 8px; }
    button { border: none; border-radius: 8px; padding: 10px 14px; background: #111827; color: #fff; cursor: pointer; }
    .filters { margin-bottom: 16px; }
    .filters a { margin-right: 12px; color: #2563eb; text-decoration: none; }
    .todo { display: flex; align-items: center; justify-content: space-between; gap: 12px;
            padding: 10px 12px; border: 1px solid #e2e8f0; border-radius: 8px; margin-bottom: 8px; }
    .todo.done .title { text-decoration: line-through; color: #94a3b8; }
    .meta { font-size: 12px; color: #64748b; }
    .dot { display: inline-block; width: 10px; height: 10px; border-radius: 999px; margin-right: 4px; }
    .actions { display: flex; gap: 6px; }
    .actions button.delete { background: #fee2e2; color: #991b1b; }
  </style>
</head>
<body>
  <div class="app">
    <h1>taskdeck</h1>
    <div class="subtitle">Personal task tracking</div>
"#,
    );

    // Add form
    body.push_str(
        r#"    <form class="add" method="post" action="/add">
      <input type="text" name="title" placeholder="New todo" required />
      <input type="date" name="due_date" />
      <select name="priority">
        <option value="low">low</option>
        <option value="medium" selected>medium</option>
        <option value="high">high</option>
      </select>
      <select name="category_id">
        <option value="">no category</option>
"#,
    );
    for cat in &categories {
        body.push_str(&format!(
            "        <option value=\"{}\">{}</option>\n",
            cat.id,
            html_escape(&cat.name)
        ));
    }
    body.push_str(
        r#"      </select>
      <button type="submit">Add</button>
    </form>
    <div class="filters">
      <a href="/">All</a>
      <a href="/?status=active">Active</a>
      <a href="/?status=completed">Completed</a>
    </div>
"#,
    );

    if rows.is_empty() {
        let hint = match filters.status {
            StatusFilter::All => "No todos yet.",
            StatusFilter::Active => "No active todos.",
            StatusFilter::Completed => "No completed todos.",
        };
        body.push_str(&format!("    <div class=\"subtitle\">{hint}</div>\n"));
    }

    for (item, cat) in &rows {
        body.push_str(&render_todo(item, cat.as_ref(), today));
    }

    body.push_str("  </div>\n</body>\n</html>");
    Ok(Html(body))
}

fn render_todo(item: &todo::Model, cat: Option<&category::Model>, today: chrono::NaiveDate) -> String {
    let done_class = if item.completed { " done" } else { "" };
    let mut meta = Vec::new();
    if let Some(cat) = cat {
        meta.push(format!(
            "<span class=\"dot\" style=\"background:{}\"></span>{}",
            html_escape(&cat.color),
            html_escape(&cat.name)
        ));
    }
    meta.push(item.priority.as_str().to_string());
    if let Some(due) = item.due_date {
        meta.push(format!(
            "<span title=\"{}\">due {}</span>",
            datetime::format_ymd(due.date_naive()),
            datetime::format_relative(due.date_naive(), today)
        ));
    }
    let tags = item.tag_list();
    if !tags.is_empty() {
        meta.push(html_escape(&tags.join(", ")));
    }

    let toggle_label = if item.completed { "Reopen" } else { "Done" };

    format!(
        r#"    <div class="todo{done_class}">
      <div>
        <div class="title">{title}</div>
        <div class="meta">{meta}</div>
      </div>
      <div class="actions">
        <form method="post" action="/toggle">
          <input type="hidden" name="id" value="{id}" />
          <button type="submit">{toggle_label}</button>
        </form>
        <form method="post" action="/delete">
          <input type="hidden" name="id" value="{id}" />
          <button class="delete" type="submit">Delete</button>
        </form>
      </div>
    </div>
"#,
        done_class = done_class,
        title = html_escape(&item.title),
        meta = meta.join(" &middot; "),
        id = item.id,
        toggle_label = toggle_label,
    )
}

/// `POST /add` - create a todo from the page form.
pub async fn add_todo(
    State(state): State<AppState>,
    Form(form): Form<AddForm>,
) -> Result<Response, ApiError> {
    if form.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title cannot be empty"));
    }

    let due_date = match form.due_date.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            datetime::parse_date(raw)
                .map_err(|_| ApiError::BadRequest("due date must be YYYY-MM-DD"))?
                .and_time(chrono::NaiveTime::MIN)
                .and_utc(),
        ),
        None => None,
    };

    let now = chrono::Utc::now();
    let model = todo::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(form.title.trim().to_string()),
        description: Set(None),
        completed: Set(false),
        priority: Set(form.priority.unwrap_or_default()),
        due_date: Set(due_date),
        category_id: Set(form.category_id),
        tags: Set(todo::encode_tags(&[])),
        created_at: Set(now),
        updated_at: Set(now),
    };
    TodoRepository::insert(&state.storage.conn, model).await?;

    Ok(redirect_home())
}

/// `POST /toggle` - flip a todo's completion flag.
pub async fn toggle_todo(
    State(state): State<AppState>,
    Form(form): Form<IdForm>,
) -> Result<Response, ApiError> {
    let conn = &state.storage.conn;
    let existing = TodoRepository::get_by_id(conn, &form.id)
        .await?
        .ok_or(ApiError::NotFound("Todo"))?;

    let completed = existing.completed;
    let mut model: todo::ActiveModel = existing.into();
    model.completed = Set(!completed);
    model.updated_at = Set(chrono::Utc::now());
    TodoRepository::update(conn, model).await?;

    Ok(redirect_home())
}

/// `POST /delete` - delete a todo.
pub async fn delete_todo(
    State(state): State<AppState>,
    Form(form): Form<IdForm>,
) -> Result<Response, ApiError> {
    let conn = &state.storage.conn;
    let existing = TodoRepository::get_by_id(conn, &form.id)
        .await?
        .ok_or(ApiError::NotFound("Todo"))?;
    TodoRepository::delete(conn, existing).await?;

    Ok(redirect_home())
}

fn redirect_home() -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, "/")]).into_response()
}

fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
