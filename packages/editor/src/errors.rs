//! Error types for the editor

use sonasite_document::PathError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid path: {0}")]
    InvalidPath(#[from] PathError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
