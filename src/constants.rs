//! Constants used throughout the application
//!
//! This module centralizes default values and magic strings to improve
//! maintainability and consistency.

// Server defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;

// Database defaults
pub const DEFAULT_DATABASE_URL: &str = "sqlite://taskdeck.db?mode=rwc";

// Category defaults
pub const DEFAULT_CATEGORY_COLOR: &str = "blue";

/// Categories seeded into an empty database: (name, color)
pub const DEFAULT_CATEGORIES: [(&str, &str); 4] = [
    ("Work", "blue"),
    ("Personal", "green"),
    ("Study", "purple"),
    ("Shopping", "orange"),
];

// Configuration
pub const CONFIG_FILE_NAME: &str = "taskdeck.toml";
pub const CONFIG_GENERATED: &str = "Configuration file generated";
