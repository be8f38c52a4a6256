//! Error types for the grabdeck library.

use thiserror::Error;

use crate::media::Platform;

/// Errors that can occur while talking to the resolver backend.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP failure (unreachable host, refused connection).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status. The response body has
    /// already been logged; only the status travels further.
    #[error("backend returned HTTP {status}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
    },

    /// Structured error reported inside an otherwise well-formed JSON body.
    #[error("{0}")]
    Backend(String),

    /// Response body was not the JSON shape we expected.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A URL could not be parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A specialized `Result` type for grabdeck operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Message shown to the user when a retrieval fails.
    ///
    /// Backend-reported errors surface verbatim; everything else collapses
    /// to a generic per-platform message, with the detail kept in the log.
    #[must_use]
    pub fn user_message(&self, platform: Platform) -> String {
        match self {
            Self::Backend(message) => message.clone(),
            Self::Status { .. } => match platform {
                Platform::YouTube => "Server error while fetching YouTube info".to_string(),
                Platform::Instagram => "Server error while fetching Instagram media".to_string(),
            },
            _ => match platform {
                Platform::YouTube => "Failed to fetch video info".to_string(),
                Platform::Instagram => "Failed to fetch Instagram media".to_string(),
            },
        }
    }
}
