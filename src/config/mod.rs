//! Configuration module for YouNotes.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{NotesPrompts, Prompts};
pub use settings::{
    BudgetSettings, GeneralSettings, GenerationSettings, PromptSettings, ServerSettings, Settings,
    TranscriptSettings,
};
