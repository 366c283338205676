//! Storage Layer
//!
//! Persistence services: SQLite database and JSON configuration.

pub mod config;
pub mod database;

pub use config::ConfigService;
pub use database::{Database, DbPool};
