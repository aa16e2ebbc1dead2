//! Transcript retrieval for YouTube videos.
//!
//! Transcripts come from an external extraction service. [`TranscriptProxy`]
//! talks to it over HTTP; tests and alternative backends implement
//! [`TranscriptSource`] directly.

mod proxy;

pub use proxy::{TranscriptProxy, HEALTH_PATH, TRANSCRIPT_PATH};

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Status reported by the transcript service alongside the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptStatus {
    /// The text is the spoken content of the video.
    #[default]
    #[serde(alias = "success")]
    Ok,
    /// No transcript in the requested language. The text holds instructions.
    NoTranscript,
    /// Captions are disabled for the video. The text holds instructions.
    Disabled,
    /// Extraction failed on the service side.
    Error,
    /// Anything else the service may start sending.
    #[serde(other)]
    Unknown,
}

impl TranscriptStatus {
    /// Whether the accompanying text is fallback guidance rather than spoken content.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            TranscriptStatus::NoTranscript | TranscriptStatus::Disabled | TranscriptStatus::Unknown
        )
    }
}

impl std::fmt::Display for TranscriptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptStatus::Ok => write!(f, "ok"),
            TranscriptStatus::NoTranscript => write!(f, "no_transcript"),
            TranscriptStatus::Disabled => write!(f, "disabled"),
            TranscriptStatus::Error => write!(f, "error"),
            TranscriptStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Transcript returned by the extraction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptResult {
    /// Transcript text, or fallback instructions when the status is advisory.
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub status: TranscriptStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    /// Language code of the transcript actually returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Service-side error detail for the `error` status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranscriptResult {
    /// A successful transcript.
    pub fn ok(transcript: impl Into<String>) -> Self {
        Self::with_status(transcript, TranscriptStatus::Ok)
    }

    /// A transcript with an explicit status.
    pub fn with_status(transcript: impl Into<String>, status: TranscriptStatus) -> Self {
        Self {
            transcript: transcript.into(),
            status,
            video_id: None,
            language: None,
            error: None,
        }
    }
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for a video URL in the given language.
    async fn fetch_transcript(&self, url: &str, lang: &str) -> Result<TranscriptResult>;
}
