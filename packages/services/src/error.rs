use thiserror::Error;

/// Failure to obtain a document or campaign from a content provider.
///
/// Site generation recovers from every variant by substituting the
/// fallback document.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Content provider failed: {0}")]
    Provider(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Content provider returned an empty response")]
    EmptyResponse,
}

/// Failure of the contact/invoice backend. Never fatal to editing.
#[derive(Error, Debug)]
pub enum RecordStoreError {
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    #[error("Record store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record store data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
