use thiserror::Error;

/// Failures reported by a record store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    #[error("document '{id}' not found in '{collection}'")]
    NotFound { collection: String, id: String },

    #[error("record store protocol error: {0}")]
    Protocol(String),

    #[error("record store rejected credentials: {0}")]
    Credentials(String),

    #[error("malformed document '{id}': {reason}")]
    Malformed { id: String, reason: String },
}

impl StoreError {
    pub(crate) fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}
