//! Todo repository for database operations.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::entities::{category, todo};

/// Repository for todo-related database operations.
pub struct TodoRepository;

impl TodoRepository {
    /// Get all todos ordered by completion status and creation date (newest
    /// first).
    pub async fn get_all<C>(conn: &C) -> Result<Vec<todo::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .order_by_asc(todo::Column::Completed)
            .order_by_desc(todo::Column::CreatedAt)
            .all(conn)
            .await?)
    }

    /// Get all todos with their categories joined, same order as
    /// [`Self::get_all`].
    pub async fn get_all_with_categories<C>(
        conn: &C,
    ) -> Result<Vec<(todo::Model, Option<category::Model>)>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .find_also_related(category::Entity)
            .order_by_asc(todo::Column::Completed)
            .order_by_desc(todo::Column::CreatedAt)
            .all(conn)
            .await?)
    }

    /// Get a single todo by id.
    pub async fn get_by_id<C>(conn: &C, id: &Uuid) -> Result<Option<todo::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .filter(todo::Column::Id.eq(*id))
            .one(conn)
            .await?)
    }

    /// Get a single todo by id with its category joined.
    pub async fn get_by_id_with_category<C>(
        conn: &C,
        id: &Uuid,
    ) -> Result<Option<(todo::Model, Option<category::Model>)>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .find_also_related(category::Entity)
            .filter(todo::Column::Id.eq(*id))
            .one(conn)
            .await?)
    }

    /// Get all todos referencing a category.
    pub async fn get_for_category<C>(conn: &C, category_id: &Uuid) -> Result<Vec<todo::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .filter(todo::Column::CategoryId.eq(*category_id))
            .order_by_asc(todo::Column::Completed)
            .order_by_desc(todo::Column::CreatedAt)
            .all(conn)
            .await?)
    }

    /// Insert a new todo into the database.
    pub async fn insert<C>(conn: &C, todo: todo::ActiveModel) -> Result<todo::Model>
    where
        C: ConnectionTrait,
    {
        Ok(todo.insert(conn).await?)
    }

    /// Update a todo in the database.
    pub async fn update<C>(conn: &C, todo: todo::ActiveModel) -> Result<todo::Model>
    where
        C: ConnectionTrait,
    {
        Ok(todo.update(conn).await?)
    }

    /// Delete a todo from the database.
    pub async fn delete<C>(conn: &C, todo: todo::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        todo.delete(conn).await?;
        Ok(())
    }

    /// Clear the category reference of every todo pointing at a category.
    ///
    /// Returns the number of detached todos.
    pub async fn detach_category<C>(
        conn: &C,
        category_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let result = todo::Entity::update_many()
            .col_expr(todo::Column::CategoryId, Expr::value(None::<Uuid>))
            .col_expr(todo::Column::UpdatedAt, Expr::value(now))
            .filter(todo::Column::CategoryId.eq(*category_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }
}
