use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashmindError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("This deck has no flashcards")]
    EmptyDeck,

    #[error("Unsupported deck file: {0}")]
    UnsupportedDeck(PathBuf),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Failures of a single request against the FlashMind server.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(Box<reqwest::Error>),

    #[error("Server error: {0}")]
    Status(u16),

    #[error("Could not read {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// True for failures where the server never produced a usable answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Status(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Transport(Box::new(error))
        }
    }
}
