//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use study_core::model::{GenerationFailure, ItemError};

/// The backend answered, but not with a question set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MalformedResponse {
    #[error("response body is not JSON")]
    NotJson,
    #[error("`flashcards` field is missing")]
    MissingFlashcards,
    #[error("`flashcards` field is not a list")]
    FlashcardsNotList,
    #[error("flashcard {index}: {reason}")]
    InvalidFlashcard { index: usize, reason: String },
    #[error("flashcard {index}: {source}")]
    InvalidItem {
        index: usize,
        #[source]
        source: ItemError,
    },
}

/// Errors emitted by the generation client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generation request failed with status {status}: {message}")]
    HttpStatus {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("malformed generation response: {0}")]
    Malformed(#[from] MalformedResponse),
    #[error("could not read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerationError {
    /// True when the backend broke the response contract, as opposed to a
    /// network or status failure.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, GenerationError::Malformed(_))
    }

    /// The message the session keeps for display.
    #[must_use]
    pub fn failure(&self) -> GenerationFailure {
        match self {
            GenerationError::Malformed(_) => GenerationFailure::malformed(),
            GenerationError::HttpStatus { message, .. } => {
                GenerationFailure::transport(message.clone())
            }
            GenerationError::Transport(err) if err.is_timeout() => {
                GenerationFailure::transport("The generation service timed out.")
            }
            GenerationError::Transport(_) => {
                GenerationFailure::transport("Could not reach the generation service.")
            }
            GenerationError::File { path, source } => GenerationFailure::transport(format!(
                "Could not read {}: {source}",
                path.file_name()
                    .map_or_else(|| path.display().to_string(), |name| {
                        name.to_string_lossy().into_owned()
                    })
            )),
        }
    }
}

/// Errors emitted while building a `GenerationConfig`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid generation URL {raw:?}: {source}")]
    InvalidUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("generation URL must use http or https: {raw}")]
    UnsupportedScheme { raw: String },
    #[error("invalid timeout value: {raw}")]
    InvalidTimeout { raw: String },
}
