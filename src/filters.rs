//! Filter predicate and sort comparator for todo lists.
//!
//! Both run over an in-memory list after it has been fetched from storage:
//! [`TodoFilters::matches`] is a linear-scan predicate and [`compare_todos`]
//! is a fixed multi-key comparator. The due-date window is computed on local
//! date granularity so results do not shift with the time of day.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::todo::{self, Priority};

/// Completion-state filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    /// Parse a status filter from its wire name, case-insensitively.
    pub fn from_name(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Due-date window filter, named after the buckets the UI shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DueFilter {
    #[default]
    All,
    Overdue,
    Today,
    Tomorrow,
    ThisWeek,
    ThisMonth,
    Future,
    NoDueDate,
}

/// Bucket a due date falls into, relative to a reference date
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DueBucket {
    Overdue,
    Today,
    Tomorrow,
    ThisWeek,
    ThisMonth,
    Future,
}

/// Classify a due date into its bucket. `None` when there is no due date.
pub fn due_bucket(due_date: Option<chrono::DateTime<chrono::Utc>>, today: NaiveDate) -> Option<DueBucket> {
    let due = due_date?.date_naive();
    let days = (due - today).num_days();

    let bucket = match days {
        d if d < 0 => DueBucket::Overdue,
        0 => DueBucket::Today,
        1 => DueBucket::Tomorrow,
        2..=7 => DueBucket::ThisWeek,
        8..=30 => DueBucket::ThisMonth,
        _ => DueBucket::Future,
    };
    Some(bucket)
}

/// Client-specified predicate narrowing the displayed todo list.
///
/// All fields combine conjunctively; the default value matches everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TodoFilters {
    pub status: StatusFilter,
    pub priority: Option<Priority>,
    pub category: Option<Uuid>,
    /// Matches todos carrying any of these tags (exact tag names)
    pub tags: Vec<String>,
    /// Case-insensitive substring over title, description, and tags
    pub search: Option<String>,
    pub due: DueFilter,
}

impl TodoFilters {
    /// Whether any narrowing is active at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the predicate to a single todo.
    pub fn matches(&self, todo: &todo::Model, today: NaiveDate) -> bool {
        match self.status {
            StatusFilter::All => {}
            StatusFilter::Active => {
                if todo.completed {
                    return false;
                }
            }
            StatusFilter::Completed => {
                if !todo.completed {
                    return false;
                }
            }
        }

        if let Some(priority) = self.priority {
            if todo.priority != priority {
                return false;
            }
        }

        if let Some(category) = self.category {
            if todo.category_id != Some(category) {
                return false;
            }
        }

        if !self.tags.is_empty() {
            let todo_tags = todo.tag_list();
            if !self.tags.iter().any(|tag| todo_tags.contains(tag)) {
                return false;
            }
        }

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let in_title = todo.title.to_lowercase().contains(&needle);
            let in_description = todo
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            let in_tags = todo
                .tag_list()
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle));
            if !in_title && !in_description && !in_tags {
                return false;
            }
        }

        match self.due {
            DueFilter::All => true,
            DueFilter::NoDueDate => due_bucket(todo.due_date, today).is_none(),
            other => due_bucket(todo.due_date, today) == due_filter_bucket(other),
        }
    }
}

fn due_filter_bucket(filter: DueFilter) -> Option<DueBucket> {
    match filter {
        DueFilter::Overdue => Some(DueBucket::Overdue),
        DueFilter::Today => Some(DueBucket::Today),
        DueFilter::Tomorrow => Some(DueBucket::Tomorrow),
        DueFilter::ThisWeek => Some(DueBucket::ThisWeek),
        DueFilter::ThisMonth => Some(DueBucket::ThisMonth),
        DueFilter::Future => Some(DueBucket::Future),
        DueFilter::All | DueFilter::NoDueDate => None,
    }
}

/// Fixed multi-key comparator for the todo list:
/// 1. completion ascending (incomplete first),
/// 2. urgency descending (overdue or due today first),
/// 3. priority descending,
/// 4. due date ascending, dated todos before undated ones,
/// 5. creation date descending.
pub fn compare_todos(a: &todo::Model, b: &todo::Model, today: NaiveDate) -> Ordering {
    let is_urgent = |t: &todo::Model| {
        matches!(
            due_bucket(t.due_date, today),
            Some(DueBucket::Overdue | DueBucket::Today)
        )
    };

    a.completed
        .cmp(&b.completed)
        .then_with(|| is_urgent(b).cmp(&is_urgent(a)))
        .then_with(|| b.priority.cmp(&a.priority))
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Sort a todo list in place with [`compare_todos`].
pub fn sort_todos(todos: &mut [todo::Model], today: NaiveDate) {
    todos.sort_by(|a, b| compare_todos(a, b, today));
}
