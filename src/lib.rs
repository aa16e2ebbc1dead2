//! YouNotes - notes from transcripts and YouTube videos
//!
//! Paste a transcript or point at a YouTube video and get concise notes back
//! from a language model, within a fixed token budget.
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `budget` - Whitespace token estimate and the token ceiling
//! - `language` - Supported transcript languages
//! - `transcript` - Client for the external transcript extraction service
//! - `generation` - Note generation backends
//! - `progress` - Simulated progress ticker
//! - `orchestrator` - Single-flight generation pipeline
//! - `session` - Input, result and notification state for a front end
//!
//! # Example
//!
//! ```rust,no_run
//! use younotes::config::Settings;
//! use younotes::orchestrator::{GenerationRequest, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(&settings)?;
//!
//!     let outcome = orchestrator
//!         .generate(GenerationRequest::youtube("https://youtu.be/dQw4w9WgXcQ", "en"))
//!         .await;
//!     println!("{}", outcome.notes().unwrap_or_default());
//!
//!     Ok(())
//! }
//! ```

pub mod budget;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod language;
pub mod openai;
pub mod orchestrator;
pub mod progress;
pub mod session;
pub mod transcript;

pub use error::{NotesError, Result};
