//! Pre-flight checks before network operations.
//!
//! Validates that required configuration is available before starting
//! operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{NotesError, Result};
use crate::openai::is_api_key_configured;
use crate::transcript::TranscriptProxy;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Generating notes requires the API key and, for videos, the service URL.
    Notes,
    /// Fetching a transcript requires a valid service URL.
    Transcript,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Notes => {
            check_api_key(settings)?;
            check_service_url(settings)?;
        }
        Operation::Transcript => {
            check_service_url(settings)?;
        }
    }
    Ok(())
}

fn check_api_key(settings: &Settings) -> Result<()> {
    if is_api_key_configured(&settings.generation) {
        Ok(())
    } else {
        let var = &settings.generation.api_key_env;
        Err(NotesError::Config(format!(
            "{} not set. Set it with: export {}='sk-...'",
            var, var
        )))
    }
}

fn check_service_url(settings: &Settings) -> Result<()> {
    TranscriptProxy::from_settings(&settings.transcript).map(|_| ())
}
