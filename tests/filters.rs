use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use taskdeck::entities::todo::{self, encode_tags, Priority};
use taskdeck::filters::{
    compare_todos, due_bucket, sort_todos, DueBucket, DueFilter, StatusFilter, TodoFilters,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn noon(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
}

fn due_in(days: i64) -> Option<DateTime<Utc>> {
    Some(noon(today() + Duration::days(days)))
}

fn make_todo(title: &str) -> todo::Model {
    todo::Model {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        completed: false,
        priority: Priority::Medium,
        due_date: None,
        category_id: None,
        tags: encode_tags(&[]),
        created_at: noon(today()),
        updated_at: noon(today()),
    }
}

#[test]
fn test_default_filters_match_everything() {
    let filters = TodoFilters::default();
    assert!(filters.is_empty());

    let mut item = make_todo("anything");
    assert!(filters.matches(&item, today()));

    item.completed = true;
    item.priority = Priority::High;
    item.due_date = due_in(-3);
    assert!(filters.matches(&item, today()));
}

#[test]
fn test_status_filter() {
    let mut item = make_todo("write report");

    let active = TodoFilters {
        status: StatusFilter::Active,
        ..Default::default()
    };
    let completed = TodoFilters {
        status: StatusFilter::Completed,
        ..Default::default()
    };

    assert!(active.matches(&item, today()));
    assert!(!completed.matches(&item, today()));

    item.completed = true;
    assert!(!active.matches(&item, today()));
    assert!(completed.matches(&item, today()));
}

#[test]
fn test_priority_filter() {
    let mut item = make_todo("ship release");
    item.priority = Priority::High;

    let high = TodoFilters {
        priority: Some(Priority::High),
        ..Default::default()
    };
    let low = TodoFilters {
        priority: Some(Priority::Low),
        ..Default::default()
    };

    assert!(high.matches(&item, today()));
    assert!(!low.matches(&item, today()));
}

#[test]
fn test_category_filter() {
    let category_id = Uuid::new_v4();
    let mut item = make_todo("buy groceries");
    item.category_id = Some(category_id);

    let same = TodoFilters {
        category: Some(category_id),
        ..Default::default()
    };
    let other = TodoFilters {
        category: Some(Uuid::new_v4()),
        ..Default::default()
    };

    assert!(same.matches(&item, today()));
    assert!(!other.matches(&item, today()));

    item.category_id = None;
    assert!(!same.matches(&item, today()));
}

#[test]
fn test_tag_filter_matches_any_listed_tag() {
    let mut item = make_todo("plan trip");
    item.tags = encode_tags(&["travel".to_string(), "summer".to_string()]);

    let filters = TodoFilters {
        tags: vec!["summer".to_string(), "winter".to_string()],
        ..Default::default()
    };
    assert!(filters.matches(&item, today()));

    let filters = TodoFilters {
        tags: vec!["winter".to_string()],
        ..Default::default()
    };
    assert!(!filters.matches(&item, today()));
}

#[test]
fn test_search_covers_title_description_and_tags() {
    let mut item = make_todo("Quarterly Review");
    item.description = Some("prepare slides".to_string());
    item.tags = encode_tags(&["finance".to_string()]);

    let matches = |needle: &str| {
        let filters = TodoFilters {
            search: Some(needle.to_string()),
            ..Default::default()
        };
        filters.matches(&item, today())
    };

    // case-insensitive substring over all three fields
    assert!(matches("quarterly"));
    assert!(matches("SLIDES"));
    assert!(matches("finan"));
    assert!(!matches("marketing"));
}

#[test]
fn test_due_bucket_boundaries() {
    let today = today();
    let bucket = |days: i64| due_bucket(due_in(days), today);

    assert_eq!(bucket(-10), Some(DueBucket::Overdue));
    assert_eq!(bucket(-1), Some(DueBucket::Overdue));
    assert_eq!(bucket(0), Some(DueBucket::Today));
    assert_eq!(bucket(1), Some(DueBucket::Tomorrow));
    assert_eq!(bucket(2), Some(DueBucket::ThisWeek));
    assert_eq!(bucket(7), Some(DueBucket::ThisWeek));
    assert_eq!(bucket(8), Some(DueBucket::ThisMonth));
    assert_eq!(bucket(30), Some(DueBucket::ThisMonth));
    assert_eq!(bucket(31), Some(DueBucket::Future));
    assert_eq!(due_bucket(None, today), None);
}

#[test]
fn test_due_filter() {
    let mut item = make_todo("renew passport");
    item.due_date = due_in(-2);

    let overdue = TodoFilters {
        due: DueFilter::Overdue,
        ..Default::default()
    };
    let this_week = TodoFilters {
        due: DueFilter::ThisWeek,
        ..Default::default()
    };
    let undated = TodoFilters {
        due: DueFilter::NoDueDate,
        ..Default::default()
    };

    assert!(overdue.matches(&item, today()));
    assert!(!this_week.matches(&item, today()));
    assert!(!undated.matches(&item, today()));

    item.due_date = None;
    assert!(undated.matches(&item, today()));
    assert!(!overdue.matches(&item, today()));
}

#[test]
fn test_sort_incomplete_before_completed() {
    let mut done = make_todo("done");
    done.completed = true;
    done.priority = Priority::High;
    let open = make_todo("open");

    assert_eq!(
        compare_todos(&open, &done, today()),
        std::cmp::Ordering::Less
    );
}

#[test]
fn test_sort_urgent_beats_priority() {
    // due today at low priority outranks high priority due next month
    let mut urgent = make_todo("urgent");
    urgent.priority = Priority::Low;
    urgent.due_date = due_in(0);

    let mut important = make_todo("important");
    important.priority = Priority::High;
    important.due_date = due_in(20);

    assert_eq!(
        compare_todos(&urgent, &important, today()),
        std::cmp::Ordering::Less
    );
}

#[test]
fn test_sort_priority_descending() {
    let mut high = make_todo("high");
    high.priority = Priority::High;
    let mut low = make_todo("low");
    low.priority = Priority::Low;

    assert_eq!(compare_todos(&high, &low, today()), std::cmp::Ordering::Less);
}

#[test]
fn test_sort_earlier_due_date_first_and_dated_before_undated() {
    let mut soon = make_todo("soon");
    soon.due_date = due_in(3);
    let mut later = make_todo("later");
    later.due_date = due_in(6);
    let undated = make_todo("undated");

    assert_eq!(compare_todos(&soon, &later, today()), std::cmp::Ordering::Less);
    assert_eq!(
        compare_todos(&later, &undated, today()),
        std::cmp::Ordering::Less
    );
}

#[test]
fn test_sort_newest_created_breaks_ties() {
    let mut older = make_todo("older");
    older.created_at = noon(today()) - Duration::hours(5);
    let newer = make_todo("newer");

    assert_eq!(
        compare_todos(&newer, &older, today()),
        std::cmp::Ordering::Less
    );
}

#[test]
fn test_sort_todos_full_ordering() {
    let mut completed = make_todo("completed");
    completed.completed = true;

    let mut overdue = make_todo("overdue");
    overdue.due_date = due_in(-1);

    let mut high = make_todo("high");
    high.priority = Priority::High;
    high.due_date = due_in(5);

    let mut medium = make_todo("medium");
    medium.due_date = due_in(5);

    let mut todos = vec![completed, medium, high, overdue];
    sort_todos(&mut todos, today());

    let titles: Vec<&str> = todos.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["overdue", "high", "medium", "completed"]);
}
