//! Note generation orchestrator for YouNotes.
//!
//! Turns a [`GenerationRequest`] into a [`GenerationOutcome`]: resolves the
//! input text (pasted or fetched from the transcript service), enforces the
//! token budget, calls the generator once and reports the result.

use crate::budget::TokenBudget;
use crate::config::{Prompts, Settings};
use crate::error::{FailureKind, NotesError, Result};
use crate::generation::{NoteGenerator, OpenAIGenerator};
use crate::language::DEFAULT_LANGUAGE;
use crate::progress::ProgressTicker;
use crate::transcript::{TranscriptProxy, TranscriptSource, TranscriptStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};

/// Input for one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum GenerationRequest {
    /// Text pasted by the user.
    Transcript { text: String },
    /// A video whose transcript is fetched first.
    YouTube {
        url: String,
        #[serde(default = "default_lang")]
        lang: String,
    },
}

fn default_lang() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl GenerationRequest {
    pub fn transcript(text: impl Into<String>) -> Self {
        GenerationRequest::Transcript { text: text.into() }
    }

    pub fn youtube(url: impl Into<String>, lang: impl Into<String>) -> Self {
        GenerationRequest::YouTube {
            url: url.into(),
            lang: lang.into(),
        }
    }
}

/// Result of one generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// Notes written by the generator.
    Success { notes: String },
    /// No transcript was available; `notes` holds the service's instructions.
    Advisory { notes: String },
    /// The generation failed.
    Failure { kind: FailureKind, message: String },
}

impl GenerationOutcome {
    /// Build a failure outcome from an error.
    pub fn failure(err: &NotesError) -> Self {
        GenerationOutcome::Failure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success { .. })
    }

    /// Notes text for success and advisory outcomes.
    pub fn notes(&self) -> Option<&str> {
        match self {
            GenerationOutcome::Success { notes } | GenerationOutcome::Advisory { notes } => {
                Some(notes)
            }
            GenerationOutcome::Failure { .. } => None,
        }
    }
}

/// Lifecycle of the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    Idle,
    Running,
    Succeeded,
    Advised,
    Failed,
}

impl GenerationState {
    pub fn is_running(&self) -> bool {
        matches!(self, GenerationState::Running)
    }

    /// Whether a finished generation is waiting to be acknowledged.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GenerationState::Succeeded | GenerationState::Advised | GenerationState::Failed
        )
    }
}

impl From<&GenerationOutcome> for GenerationState {
    fn from(outcome: &GenerationOutcome) -> Self {
        match outcome {
            GenerationOutcome::Success { .. } => GenerationState::Succeeded,
            GenerationOutcome::Advisory { .. } => GenerationState::Advised,
            GenerationOutcome::Failure { .. } => GenerationState::Failed,
        }
    }
}

/// Holds the `Running` state and the progress ticker for one generation.
///
/// Dropping it without [`RunGuard::finish`] (e.g. the caller dropped the
/// `generate` future) returns the orchestrator to `Idle`.
struct RunGuard<'a> {
    state: &'a watch::Sender<GenerationState>,
    ticker: Option<ProgressTicker>,
}

impl RunGuard<'_> {
    fn finish(mut self, outcome: &GenerationOutcome) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
        self.state.send_replace(GenerationState::from(outcome));
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
            self.state.send_replace(GenerationState::Idle);
        }
    }
}

/// The note generation orchestrator.
pub struct Orchestrator {
    transcripts: Arc<dyn TranscriptSource>,
    generator: Arc<dyn NoteGenerator>,
    prompts: Prompts,
    max_tokens: usize,
    progress_interval: Duration,
    state: watch::Sender<GenerationState>,
    progress: Arc<watch::Sender<u8>>,
}

impl Orchestrator {
    /// Create an orchestrator with the HTTP transcript proxy and OpenAI generator.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let transcripts: Arc<dyn TranscriptSource> =
            Arc::new(TranscriptProxy::from_settings(&settings.transcript)?);

        let generator: Arc<dyn NoteGenerator> =
            Arc::new(OpenAIGenerator::from_settings(&settings.generation)?);
        info!("Using model {} for notes", generator.model());

        Ok(Self::with_components(settings, prompts, transcripts, generator))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: &Settings,
        prompts: Prompts,
        transcripts: Arc<dyn TranscriptSource>,
        generator: Arc<dyn NoteGenerator>,
    ) -> Self {
        let (state, _) = watch::channel(GenerationState::Idle);
        let (progress, _) = watch::channel(0u8);

        Self {
            transcripts,
            generator,
            prompts,
            max_tokens: settings.budget.max_tokens,
            progress_interval: settings.generation.progress_interval(),
            state,
            progress: Arc::new(progress),
        }
    }

    /// Token ceiling applied to pasted transcripts.
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GenerationState {
        *self.state.borrow()
    }

    /// Subscribe to lifecycle changes.
    pub fn subscribe_state(&self) -> watch::Receiver<GenerationState> {
        self.state.subscribe()
    }

    /// Subscribe to progress updates (0-100) of the running generation.
    pub fn subscribe_progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    /// Mark a finished generation as observed, returning to `Idle`.
    pub fn acknowledge(&self) {
        self.state.send_if_modified(|state| {
            if state.is_terminal() {
                *state = GenerationState::Idle;
                true
            } else {
                false
            }
        });
    }

    /// Generate notes for a request.
    ///
    /// Never fails: every error is reported as [`GenerationOutcome::Failure`].
    /// A call made while another generation is running fails with `Busy`.
    #[instrument(skip(self, request))]
    pub async fn generate(&self, request: GenerationRequest) -> GenerationOutcome {
        let started = self.state.send_if_modified(|state| {
            if state.is_running() {
                false
            } else {
                *state = GenerationState::Running;
                true
            }
        });

        if !started {
            warn!("Rejected generation: another one is running");
            return GenerationOutcome::failure(&NotesError::Busy);
        }

        self.progress.send_replace(0);
        let guard = RunGuard {
            state: &self.state,
            ticker: Some(ProgressTicker::start(
                self.progress.clone(),
                self.progress_interval,
            )),
        };

        let outcome = match self.run(&request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Generation failed: {}", e);
                GenerationOutcome::failure(&e)
            }
        };

        guard.finish(&outcome);
        outcome
    }

    async fn run(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        let text = match request {
            GenerationRequest::Transcript { text } => {
                let budget = TokenBudget::for_text(self.max_tokens, text);
                if budget.is_exceeded() {
                    return Err(NotesError::BudgetExceeded {
                        used: budget.used,
                        ceiling: budget.ceiling,
                    });
                }
                if text.trim().is_empty() {
                    return Err(NotesError::InvalidInput(
                        "Please enter a transcript to generate notes from".to_string(),
                    ));
                }
                info!("Generating notes from pasted transcript ({} tokens)", budget.used);
                text.clone()
            }
            GenerationRequest::YouTube { url, lang } => {
                if url.trim().is_empty() {
                    return Err(NotesError::InvalidInput(
                        "Please enter a valid YouTube URL".to_string(),
                    ));
                }

                info!("Fetching transcript for {} ({})", url, lang);
                let result = self.transcripts.fetch_transcript(url, lang).await?;

                if result.transcript.trim().is_empty() {
                    return Err(NotesError::EmptyTranscript);
                }

                if result.status == TranscriptStatus::Error {
                    return Err(NotesError::Upstream {
                        status: 502,
                        message: result.error.unwrap_or(result.transcript),
                    });
                }

                if result.status.is_advisory() {
                    info!("No usable transcript (status {}), returning instructions", result.status);
                    return Ok(GenerationOutcome::Advisory {
                        notes: result.transcript,
                    });
                }

                result.transcript
            }
        };

        let prompt = self.prompts.notes_prompt(&text);
        let response = self.generator.generate(&prompt).await.map_err(|e| match e {
            NotesError::Generation(_) => e,
            other => NotesError::Generation(other.to_string()),
        })?;

        let notes = response.trim();
        if notes.is_empty() {
            return Err(NotesError::Generation("Empty response from model".to_string()));
        }

        Ok(GenerationOutcome::Success {
            notes: notes.to_string(),
        })
    }
}
