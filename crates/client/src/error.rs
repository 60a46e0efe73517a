use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the catalog service.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Why a view refused or failed an action.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("the book has not been loaded")]
    NotLoaded,

    #[error("the change was already acknowledged")]
    AlreadyAcknowledged,

    #[error("nothing is awaiting confirmation")]
    NothingToConfirm,

    /// `message` is what the screen shows; `source` is only logged.
    #[error("{message}")]
    Failed {
        message: &'static str,
        #[source]
        source: ClientError,
    },
}
