//! Transcript command implementation.

use crate::cli::output::content_preview;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::language::language_name;
use crate::transcript::{TranscriptProxy, TranscriptSource};
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(url: &str, lang: Option<String>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Transcript, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let lang = lang.unwrap_or_else(|| settings.transcript.default_language.clone());
    let proxy = TranscriptProxy::from_settings(&settings.transcript)?;

    let spinner = Output::spinner("Fetching transcript...");
    let result = proxy.fetch_transcript(url, &lang).await;
    spinner.finish_and_clear();

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            Output::error(&format!("Failed to fetch transcript: {}", e));
            return Err(e.into());
        }
    };

    Output::header("Transcript");
    Output::kv("Status", &result.status.to_string());
    if let Some(video_id) = &result.video_id {
        Output::kv("Video", video_id);
    }
    let language = result.language.as_deref().unwrap_or(&lang);
    Output::kv(
        "Language",
        &format!("{} ({})", language, language_name(language).unwrap_or("unlisted")),
    );
    Output::kv("Preview", &content_preview(&result.transcript, 80));

    if result.status.is_advisory() {
        Output::warning("No transcript available. The service returned instructions instead:");
    }

    println!("\n{}\n", result.transcript);
    Ok(())
}
