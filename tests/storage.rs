use chrono::Utc;
use sea_orm::Set;
use uuid::Uuid;

use taskdeck::constants::DEFAULT_CATEGORIES;
use taskdeck::entities::todo::{encode_tags, Priority};
use taskdeck::entities::{category, todo};
use taskdeck::repositories::{CategoryRepository, TodoRepository};
use taskdeck::storage::Storage;

fn new_todo(title: &str, category_id: Option<Uuid>) -> todo::ActiveModel {
    let now = Utc::now();
    todo::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        description: Set(None),
        completed: Set(false),
        priority: Set(Priority::Medium),
        due_date: Set(None),
        category_id: Set(category_id),
        tags: Set(encode_tags(&[])),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

fn new_category(name: &str, color: &str) -> category::ActiveModel {
    category::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        color: Set(color.to_string()),
        created_at: Set(Utc::now()),
    }
}

#[tokio::test]
async fn test_in_memory_storage_creation() {
    let result = Storage::in_memory().await;
    assert!(result.is_ok(), "in-memory storage should open and create its schema");
}

#[tokio::test]
async fn test_insert_then_list_includes_todo() {
    let storage = Storage::in_memory().await.unwrap();

    let created = TodoRepository::insert(&storage.conn, new_todo("write tests", None))
        .await
        .unwrap();

    let todos = TodoRepository::get_all(&storage.conn).await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, created.id);
    assert_eq!(todos[0].title, "write tests");
    assert!(!todos[0].completed);
}

#[tokio::test]
async fn test_completion_update_is_visible() {
    let storage = Storage::in_memory().await.unwrap();
    let created = TodoRepository::insert(&storage.conn, new_todo("flip me", None))
        .await
        .unwrap();

    let mut model: todo::ActiveModel = created.clone().into();
    model.completed = Set(true);
    model.updated_at = Set(Utc::now());
    TodoRepository::update(&storage.conn, model).await.unwrap();

    let fetched = TodoRepository::get_by_id(&storage.conn, &created.id)
        .await
        .unwrap()
        .unwrap();
    assert!(fetched.completed);
}

#[tokio::test]
async fn test_delete_removes_todo() {
    let storage = Storage::in_memory().await.unwrap();
    let created = TodoRepository::insert(&storage.conn, new_todo("delete me", None))
        .await
        .unwrap();

    TodoRepository::delete(&storage.conn, created.clone())
        .await
        .unwrap();

    let fetched = TodoRepository::get_by_id(&storage.conn, &created.id)
        .await
        .unwrap();
    assert!(fetched.is_none());
}

#[tokio::test]
async fn test_tags_survive_round_trip() {
    let storage = Storage::in_memory().await.unwrap();
    let mut model = new_todo("tagged", None);
    model.tags = Set(encode_tags(&["home".to_string(), "weekend".to_string()]));

    let created = TodoRepository::insert(&storage.conn, model).await.unwrap();
    let fetched = TodoRepository::get_by_id(&storage.conn, &created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.tag_list(), vec!["home".to_string(), "weekend".to_string()]);
}

#[tokio::test]
async fn test_listing_embeds_category() {
    let storage = Storage::in_memory().await.unwrap();
    let cat = CategoryRepository::insert(&storage.conn, new_category("Work", "blue"))
        .await
        .unwrap();
    TodoRepository::insert(&storage.conn, new_todo("with category", Some(cat.id)))
        .await
        .unwrap();
    TodoRepository::insert(&storage.conn, new_todo("without category", None))
        .await
        .unwrap();

    let rows = TodoRepository::get_all_with_categories(&storage.conn)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);

    let with = rows.iter().find(|(t, _)| t.title == "with category").unwrap();
    let without = rows.iter().find(|(t, _)| t.title == "without category").unwrap();
    assert_eq!(with.1.as_ref().map(|c| c.name.as_str()), Some("Work"));
    assert!(without.1.is_none());
}

#[tokio::test]
async fn test_category_delete_detaches_todos() {
    let storage = Storage::in_memory().await.unwrap();
    let cat = CategoryRepository::insert(&storage.conn, new_category("Temp", "red"))
        .await
        .unwrap();
    let todo_a = TodoRepository::insert(&storage.conn, new_todo("a", Some(cat.id)))
        .await
        .unwrap();
    let todo_b = TodoRepository::insert(&storage.conn, new_todo("b", Some(cat.id)))
        .await
        .unwrap();
    let unrelated = TodoRepository::insert(&storage.conn, new_todo("c", None))
        .await
        .unwrap();

    let detached = CategoryRepository::delete_detaching(&storage.conn, cat.clone())
        .await
        .unwrap();
    assert_eq!(detached, 2);

    // category gone, todos kept with the reference cleared
    assert!(CategoryRepository::get_by_id(&storage.conn, &cat.id)
        .await
        .unwrap()
        .is_none());
    for id in [todo_a.id, todo_b.id, unrelated.id] {
        let fetched = TodoRepository::get_by_id(&storage.conn, &id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.category_id, None);
    }
}

#[tokio::test]
async fn test_seed_default_categories_runs_once() {
    let storage = Storage::in_memory().await.unwrap();

    let first = storage.seed_default_categories().await.unwrap();
    assert_eq!(first, DEFAULT_CATEGORIES.len());

    let second = storage.seed_default_categories().await.unwrap();
    assert_eq!(second, 0, "seeding a populated database should be a no-op");

    let categories = CategoryRepository::get_all(&storage.conn).await.unwrap();
    assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());

    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    for (name, _) in DEFAULT_CATEGORIES {
        assert!(names.contains(&name), "missing seeded category {name}");
    }
}

#[tokio::test]
async fn test_seed_skips_user_populated_database() {
    let storage = Storage::in_memory().await.unwrap();
    CategoryRepository::insert(&storage.conn, new_category("Mine", "teal"))
        .await
        .unwrap();

    let seeded = storage.seed_default_categories().await.unwrap();
    assert_eq!(seeded, 0);

    let categories = CategoryRepository::get_all(&storage.conn).await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Mine");
}

#[tokio::test]
async fn test_clear_all_data() {
    let storage = Storage::in_memory().await.unwrap();
    let cat = CategoryRepository::insert(&storage.conn, new_category("Work", "blue"))
        .await
        .unwrap();
    TodoRepository::insert(&storage.conn, new_todo("task", Some(cat.id)))
        .await
        .unwrap();
    assert!(storage.has_data().await.unwrap());

    storage.clear_all_data().await.unwrap();
    assert!(!storage.has_data().await.unwrap());
    assert!(TodoRepository::get_all(&storage.conn).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_for_category() {
    let storage = Storage::in_memory().await.unwrap();
    let cat = CategoryRepository::insert(&storage.conn, new_category("Study", "purple"))
        .await
        .unwrap();
    TodoRepository::insert(&storage.conn, new_todo("read book", Some(cat.id)))
        .await
        .unwrap();
    TodoRepository::insert(&storage.conn, new_todo("unrelated", None))
        .await
        .unwrap();

    let todos = TodoRepository::get_for_category(&storage.conn, &cat.id)
        .await
        .unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "read book");
}
