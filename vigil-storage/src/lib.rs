//! vigil-storage: SQLite persistence layer.
//!
//! One serialized write connection plus a round-robin read pool, schema
//! migrations via `PRAGMA user_version`, one query module per table, and
//! the derived views that form the public read surface.

pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::DatabaseManager;
