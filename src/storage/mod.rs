//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - records(id, text, number, date, image, signature)

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStore;
