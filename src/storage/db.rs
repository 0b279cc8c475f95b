use anyhow::Result;
use chrono::Utc;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema, Set};
use uuid::Uuid;

use crate::constants::DEFAULT_CATEGORIES;
use crate::entities::{category, todo};
use crate::repositories::CategoryRepository;

/// Database handle for the application.
///
/// Wraps a SeaORM connection; cloning is cheap and shares the underlying
/// pool.
#[derive(Clone)]
pub struct Storage {
    pub conn: DatabaseConnection,
}

impl Storage {
    /// Connect to the given SQLite URL and create the schema if needed.
    pub async fn connect(url: &str) -> Result<Self> {
        let conn = Database::connect(url).await?;
        let storage = Storage { conn };
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Open an in-memory database, used by the test suite.
    ///
    /// A single pooled connection keeps every query on the same in-memory
    /// database.
    pub async fn in_memory() -> Result<Self> {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1);
        let conn = Database::connect(options).await?;
        let storage = Storage { conn };
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Create tables from the entity definitions. Categories first, todos
    /// reference them.
    async fn init_schema(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut categories = schema.create_table_from_entity(category::Entity);
        categories.if_not_exists();
        self.conn.execute(backend.build(&categories)).await?;

        let mut todos = schema.create_table_from_entity(todo::Entity);
        todos.if_not_exists();
        self.conn.execute(backend.build(&todos)).await?;

        Ok(())
    }

    /// Insert the default categories when the table is empty.
    ///
    /// Returns the number of categories inserted (0 when data already
    /// exists).
    pub async fn seed_default_categories(&self) -> Result<usize> {
        if !CategoryRepository::get_all(&self.conn).await?.is_empty() {
            return Ok(0);
        }

        for (name, color) in DEFAULT_CATEGORIES {
            let model = category::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(name.to_string()),
                color: Set(color.to_string()),
                created_at: Set(Utc::now()),
            };
            CategoryRepository::insert(&self.conn, model).await?;
        }

        Ok(DEFAULT_CATEGORIES.len())
    }

    /// Check if the database has any categories
    pub async fn has_data(&self) -> Result<bool> {
        Ok(!CategoryRepository::get_all(&self.conn).await?.is_empty())
    }

    /// Clear all data from the database. Todos first, they reference
    /// categories.
    pub async fn clear_all_data(&self) -> Result<()> {
        use sea_orm::EntityTrait;

        todo::Entity::delete_many().exec(&self.conn).await?;
        category::Entity::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
