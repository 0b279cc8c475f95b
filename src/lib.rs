//! Taskdeck - a personal task-tracking web application
//!
//! This library provides a small REST API and a server-rendered page for
//! managing todos and the categories that group them. Data is persisted to
//! SQLite through SeaORM; filtering, sorting, and search run as a pure layer
//! over the fetched list.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`config`] - Application configuration management
//! * [`storage`] - Database connection and schema setup
//! * [`repositories`] - Repository layer for database operations
//! * [`filters`] - Filter predicate and sort comparator for todo lists
//! * [`search`] - Advanced search query parsing
//! * [`api`] - REST handlers and routing
//! * [`web`] - Server-rendered browser page

/// REST handlers, routing, and the API error type
pub mod api;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Filter predicate and multi-key sort comparator for todos
pub mod filters;

/// Logging setup for the `log` facade
pub mod logger;

/// Repository layer for database operations
pub mod repositories;

/// Advanced search query parsing (`title:`, `tag:`, `priority:`, `status:`)
pub mod search;

/// Database connection, schema creation, and seeding
pub mod storage;

/// Utility functions for date handling
pub mod utils;

/// Server-rendered HTML page and its form handlers
pub mod web;

// Re-export entity models for convenient access
pub use entities::{category, todo};
