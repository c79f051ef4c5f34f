//! # Recordkeep - local record keeper
//!
//! Stores small records made of free text, a number, a date, an uploaded
//! image and a hand-drawn signature in a single SQLite table.
//!
//! Recordkeep provides:
//! - A `Record` model with optional image and signature blobs
//! - SQLite-backed storage with create/read/update/delete by id
//! - A lossless PNG codec for the two image-bearing fields
//! - Shell-side helpers (update form, signature canvas) used by the CLI

pub mod record;
pub mod storage;
pub mod codec;
pub mod shell;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use record::{Record, RecordFields, RecordSummary};
pub use storage::SqliteStore;

/// Result type alias for Recordkeep operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Recordkeep operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Record not found: {0}")]
    RecordNotFound(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Malformed image data: {0}")]
    MalformedImage(#[from] image::ImageError),

    #[error("Unsupported upload: {0} (expected png, jpg or jpeg)")]
    UnsupportedUpload(String),

    #[error("Invalid signature canvas: {0}")]
    InvalidCanvas(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
