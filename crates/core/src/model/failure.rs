use thiserror::Error;

/// Shown when the backend fails without saying why.
pub const GENERIC_FAILURE_MESSAGE: &str = "Processing failed";

/// Shown when the backend answers with something that is not a question set.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server";

/// Why a generation attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Network failure, timeout, or a non-success status.
    Transport,
    /// The backend answered but broke the response contract.
    Malformed,
}

/// Failure retained by the session while it sits in the error state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GenerationFailure {
    kind: FailureKind,
    message: String,
}

impl GenerationFailure {
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        };
        Self { kind, message }
    }

    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Transport, message)
    }

    #[must_use]
    pub fn malformed() -> Self {
        Self::new(FailureKind::Malformed, INVALID_RESPONSE_MESSAGE)
    }

    #[must_use]
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_message_falls_back_to_generic() {
        let failure = GenerationFailure::transport("  ");
        assert_eq!(failure.message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn malformed_uses_invalid_response_text() {
        let failure = GenerationFailure::malformed();
        assert_eq!(failure.kind(), FailureKind::Malformed);
        assert_eq!(failure.to_string(), INVALID_RESPONSE_MESSAGE);
    }
}
