//! Front-end state for a note-taking session.
//!
//! [`NotesSession`] mirrors what a UI displays: the inputs being edited, the
//! remaining token budget, the loading indicator and the last notes. It is
//! only written from user edits and from reported outcomes, never by the
//! orchestrator directly.

use crate::budget::TokenBudget;
use crate::error::FailureKind;
use crate::language::DEFAULT_LANGUAGE;
use crate::orchestrator::{GenerationOutcome, GenerationRequest};
use crate::progress::MAX_PROGRESS;
use serde::Serialize;

/// Which input the user submitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Transcript,
    YouTube,
}

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// A short message shown after a generation finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    fn new(title: &str, description: &str, variant: NotificationVariant) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

/// Presentation state for one user.
#[derive(Debug, Clone, Serialize)]
pub struct NotesSession {
    transcript: String,
    url: String,
    language: String,
    notes: String,
    budget: TokenBudget,
    loading: bool,
    progress: u8,
}

impl NotesSession {
    /// Create an empty session with the given token ceiling.
    pub fn new(max_tokens: usize) -> Self {
        Self {
            transcript: String::new(),
            url: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            notes: String::new(),
            budget: TokenBudget::new(max_tokens),
            loading: false,
            progress: 0,
        }
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn budget(&self) -> TokenBudget {
        self.budget
    }

    pub fn remaining_tokens(&self) -> i64 {
        self.budget.remaining()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Replace the transcript text and recompute the budget.
    pub fn set_transcript(&mut self, text: impl Into<String>) {
        self.transcript = text.into();
        self.budget.update(&self.transcript);
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(MAX_PROGRESS);
    }

    /// Build a request from the current inputs.
    pub fn request(&self, source: InputSource) -> GenerationRequest {
        match source {
            InputSource::Transcript => GenerationRequest::transcript(self.transcript.clone()),
            InputSource::YouTube => GenerationRequest::youtube(self.url.clone(), self.language.clone()),
        }
    }

    /// Enter the loading state.
    pub fn begin(&mut self) {
        self.loading = true;
        self.progress = 0;
    }

    /// Apply a finished outcome and return the notification to show.
    ///
    /// Inputs and the budget are reset only after a successful generation.
    pub fn finish(&mut self, outcome: &GenerationOutcome) -> Notification {
        self.loading = false;

        match outcome {
            GenerationOutcome::Success { notes } => {
                self.notes = notes.clone();
                self.transcript.clear();
                self.url.clear();
                self.language = DEFAULT_LANGUAGE.to_string();
                self.budget.reset();
                Notification::new(
                    "Notes generated successfully!",
                    "The notes have been generated based on the provided input.",
                    NotificationVariant::Default,
                )
            }
            GenerationOutcome::Advisory { notes } => {
                self.notes = notes.clone();
                Notification::new(
                    "Transcript not available",
                    "Could not automatically extract transcript. Instructions provided instead.",
                    NotificationVariant::Default,
                )
            }
            GenerationOutcome::Failure {
                kind: FailureKind::BudgetExceeded,
                ..
            } => Notification::new(
                "Token limit exceeded",
                "You have exceeded the maximum token limit. Please reduce the transcript length.",
                NotificationVariant::Destructive,
            ),
            GenerationOutcome::Failure { message, .. } => {
                self.notes = format!("An error occurred: {}", message);
                Notification::new("Error generating notes", message, NotificationVariant::Destructive)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_tracks_edits() {
        let mut session = NotesSession::new(10);
        assert_eq!(session.remaining_tokens(), 10);

        session.set_transcript("one two three");
        assert_eq!(session.remaining_tokens(), 7);

        session.set_transcript("a b c d e f g h i j k l");
        assert_eq!(session.remaining_tokens(), -2);
    }

    #[test]
    fn test_request_from_inputs() {
        let mut session = NotesSession::new(1000);
        session.set_transcript("lecture text");
        session.set_url("https://youtu.be/abcdefghijk");
        session.set_language("fr");

        assert_eq!(
            session.request(InputSource::Transcript),
            GenerationRequest::transcript("lecture text")
        );
        assert_eq!(
            session.request(InputSource::YouTube),
            GenerationRequest::youtube("https://youtu.be/abcdefghijk", "fr")
        );
    }

    #[test]
    fn test_success_resets_inputs() {
        let mut session = NotesSession::new(1000);
        session.set_transcript("lecture text");
        session.set_language("de");
        session.begin();
        session.set_progress(250);
        assert_eq!(session.progress(), 100);

        let notification = session.finish(&GenerationOutcome::Success {
            notes: "Summary.".to_string(),
        });

        assert_eq!(session.notes(), "Summary.");
        assert_eq!(session.transcript(), "");
        assert_eq!(session.language(), "en");
        assert_eq!(session.remaining_tokens(), 1000);
        assert!(!session.is_loading());
        assert!(!notification.is_destructive());
    }

    #[test]
    fn test_advisory_keeps_inputs() {
        let mut session = NotesSession::new(1000);
        session.set_url("https://youtu.be/abcdefghijk");
        session.begin();

        let notification = session.finish(&GenerationOutcome::Advisory {
            notes: "Try another language.".to_string(),
        });

        assert_eq!(session.notes(), "Try another language.");
        assert_eq!(session.url(), "https://youtu.be/abcdefghijk");
        assert_eq!(notification.title, "Transcript not available");
        assert_eq!(notification.variant, NotificationVariant::Default);
    }

    #[test]
    fn test_failure_shows_error_in_notes() {
        let mut session = NotesSession::new(1000);
        session.set_transcript("text");
        session.begin();

        let notification = session.finish(&GenerationOutcome::Failure {
            kind: FailureKind::GenerationService,
            message: "quota exceeded".to_string(),
        });

        assert_eq!(session.notes(), "An error occurred: quota exceeded");
        assert_eq!(session.transcript(), "text");
        assert_eq!(notification.description, "quota exceeded");
        assert!(notification.is_destructive());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_budget_failure_leaves_notes() {
        let mut session = NotesSession::new(1000);
        session.finish(&GenerationOutcome::Success {
            notes: "previous".to_string(),
        });

        let notification = session.finish(&GenerationOutcome::Failure {
            kind: FailureKind::BudgetExceeded,
            message: "too long".to_string(),
        });

        assert_eq!(session.notes(), "previous");
        assert_eq!(notification.title, "Token limit exceeded");
        assert!(notification.is_destructive());
    }
}
