//! Advanced search query parsing.
//!
//! A query is a whitespace-separated token list. `title:`, `tag:`,
//! `priority:`, and `status:` tokens assign the corresponding filter (keys
//! are case-insensitive, `tag:` may repeat); everything else is free text and
//! becomes the substring search unless a `title:` token already set one.
//! Example: `title:meeting tag:urgent priority:high`.

use crate::entities::todo::Priority;
use crate::filters::{StatusFilter, TodoFilters};

/// Parse an advanced search query on top of existing filters.
pub fn parse_query(query: &str, base: &TodoFilters) -> TodoFilters {
    let mut filters = base.clone();
    let mut title: Option<String> = None;
    let mut tags: Vec<String> = Vec::new();
    let mut free_text: Vec<&str> = Vec::new();

    for token in query.split_whitespace() {
        if !apply_token(&mut filters, &mut title, &mut tags, token) {
            free_text.push(token);
        }
    }

    if !tags.is_empty() {
        filters.tags = tags;
    }
    if let Some(title) = title {
        filters.search = Some(title);
    } else if !free_text.is_empty() {
        filters.search = Some(free_text.join(" "));
    }

    filters
}

/// Try to consume a `key:value` token; false means the token is free text.
fn apply_token(
    filters: &mut TodoFilters,
    title: &mut Option<String>,
    tags: &mut Vec<String>,
    token: &str,
) -> bool {
    let Some((key, value)) = token.split_once(':') else {
        return false;
    };
    if value.is_empty() {
        return false;
    }

    match key.to_ascii_lowercase().as_str() {
        "title" => {
            *title = Some(value.to_string());
            true
        }
        "tag" => {
            tags.push(value.to_string());
            true
        }
        "priority" => match Priority::from_name(value) {
            Some(priority) => {
                filters.priority = Some(priority);
                true
            }
            None => false,
        },
        "status" => match StatusFilter::from_name(value) {
            Some(status) => {
                filters.status = status;
                true
            }
            None => false,
        },
        _ => false,
    }
}
