//! Error types for YouNotes.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Library-level error type for YouNotes operations.
#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Token limit exceeded: {used} tokens used of {ceiling}. Please reduce the transcript length.")]
    BudgetExceeded { used: usize, ceiling: usize },

    #[error(
        "Transcript service did not respond within {} seconds. \
         It may be waking up from a cold start, please try again in a minute.",
        .0.as_secs_f64()
    )]
    Timeout(Duration),

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Failed to extract transcript. Please try another video or language.")]
    EmptyTranscript,

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("A generation is already running. Wait for it to finish before submitting again.")]
    Busy,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl NotesError {
    /// Classify this error for reporting in a generation outcome.
    pub fn kind(&self) -> FailureKind {
        match self {
            NotesError::InvalidInput(_) => FailureKind::InvalidInput,
            NotesError::BudgetExceeded { .. } => FailureKind::BudgetExceeded,
            NotesError::Timeout(_) => FailureKind::Timeout,
            NotesError::Upstream { .. } => FailureKind::Upstream,
            NotesError::EmptyTranscript => FailureKind::EmptyTranscript,
            NotesError::Generation(_) => FailureKind::GenerationService,
            NotesError::Busy => FailureKind::Busy,
            NotesError::Config(_)
            | NotesError::Io(_)
            | NotesError::Json(_)
            | NotesError::TomlParse(_)
            | NotesError::Http(_) => FailureKind::Internal,
        }
    }
}

/// Kind of failure reported by the generation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidInput,
    BudgetExceeded,
    Timeout,
    Upstream,
    EmptyTranscript,
    GenerationService,
    Busy,
    Internal,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FailureKind::InvalidInput => "invalid_input",
            FailureKind::BudgetExceeded => "budget_exceeded",
            FailureKind::Timeout => "timeout",
            FailureKind::Upstream => "upstream",
            FailureKind::EmptyTranscript => "empty_transcript",
            FailureKind::GenerationService => "generation_service",
            FailureKind::Busy => "busy",
            FailureKind::Internal => "internal",
        };
        write!(f, "{}", label)
    }
}

/// Result type alias for YouNotes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_mentions_cold_start() {
        let msg = NotesError::Timeout(Duration::from_secs(25)).to_string();
        assert!(msg.contains("within 25 seconds"));
        assert!(msg.contains("waking up"));
    }

    #[test]
    fn test_timeout_message_keeps_fractional_seconds() {
        let msg = NotesError::Timeout(Duration::from_millis(500)).to_string();
        assert!(msg.contains("within 0.5 seconds"));

        let msg = NotesError::Timeout(Duration::from_millis(1500)).to_string();
        assert!(msg.contains("within 1.5 seconds"));
    }

    #[test]
    fn test_upstream_message_is_detail() {
        let err = NotesError::Upstream {
            status: 400,
            message: "Invalid YouTube URL format".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid YouTube URL format");
        assert_eq!(err.kind(), FailureKind::Upstream);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FailureKind::GenerationService).unwrap();
        assert_eq!(json, "\"generation_service\"");
        assert_eq!(FailureKind::BudgetExceeded.to_string(), "budget_exceeded");
    }
}
