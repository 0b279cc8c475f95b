//! Storage module for todo and category persistence
//!
//! This module owns the SeaORM database connection, creates the schema from
//! the entity definitions, and seeds default categories into an empty
//! database.

pub mod db;

pub use db::Storage;
