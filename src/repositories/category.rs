//! Category repository for database operations.

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::category;
use crate::repositories::TodoRepository;

/// Repository for category-related database operations.
pub struct CategoryRepository;

impl CategoryRepository {
    /// Get all categories ordered by creation date.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<category::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(category::Entity::find()
            .order_by_asc(category::Column::CreatedAt)
            .all(conn)
            .await?)
    }

    /// Get a single category by id.
    pub async fn get_by_id<C>(conn: &C, id: &Uuid) -> Result<Option<category::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(category::Entity::find()
            .filter(category::Column::Id.eq(*id))
            .one(conn)
            .await?)
    }

    /// Insert a new category into the database.
    pub async fn insert<C>(conn: &C, category: category::ActiveModel) -> Result<category::Model>
    where
        C: ConnectionTrait,
    {
        Ok(category.insert(conn).await?)
    }

    /// Update a category in the database.
    pub async fn update<C>(conn: &C, category: category::ActiveModel) -> Result<category::Model>
    where
        C: ConnectionTrait,
    {
        Ok(category.update(conn).await?)
    }

    /// Delete a category and detach every todo referencing it, in one
    /// transaction. Referencing todos keep all other fields and get their
    /// `updated_at` bumped.
    ///
    /// Returns the number of detached todos.
    pub async fn delete_detaching(
        conn: &DatabaseConnection,
        category: category::Model,
    ) -> Result<u64> {
        let txn = conn.begin().await?;

        let detached = TodoRepository::detach_category(&txn, &category.id, Utc::now()).await?;
        category.delete(&txn).await?;

        txn.commit().await?;
        Ok(detached)
    }
}
