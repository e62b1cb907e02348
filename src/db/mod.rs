//! Database module: models and schema for the config table.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and conversions
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the pooled store over the `configs` table

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::ConfigEntry;
pub use schema::SQLITE_INIT;
pub use sqlite::{ConfigStorage, SqlitePool};
