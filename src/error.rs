//! Error types for the gallery
//!
//! Validation failures are the only errors a user can trigger directly.
//! Everything else wraps a failure from the storage medium or the filesystem.

use thiserror::Error;

use crate::state::data::ImageId;

#[derive(Debug, Error)]
pub enum GalleryError {
    /// A precondition gate refused the intent (blank title, no image, ...)
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// No image with this id exists in the collection
    #[error("image {0} not found")]
    NotFound(ImageId),

    /// A persisted record could not be parsed
    #[error("malformed storage record '{key}': {source}")]
    MalformedStorage {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    /// A blocking task was cancelled or panicked
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl GalleryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed(message.into())
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
