//! Notes command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::language::language_name;
use crate::orchestrator::{GenerationOutcome, Orchestrator};
use crate::session::{InputSource, NotesSession};
use anyhow::Result;
use std::io::Read;

/// Run the notes command.
pub async fn run_notes(
    text: Option<String>,
    file: Option<String>,
    youtube: Option<String>,
    lang: Option<String>,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    if text.is_none() && file.is_none() && youtube.is_none() {
        Output::error("Provide one of --text, --file or --youtube");
        return Err(anyhow::anyhow!("no input given"));
    }

    if let Err(e) = preflight::check(Operation::Notes, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'younotes doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(&settings)?;
    let mut session = NotesSession::new(orchestrator.max_tokens());

    let source = match youtube {
        Some(url) => {
            let lang = lang.unwrap_or_else(|| settings.transcript.default_language.clone());
            if language_name(&lang).is_none() {
                Output::warning(&format!(
                    "'{}' is not a listed language; passing it to the transcript service as-is.",
                    lang
                ));
            }
            Output::info(&format!("Processing: {}", url));
            session.set_url(url);
            session.set_language(lang);
            InputSource::YouTube
        }
        None => {
            session.set_transcript(read_input(text, file)?);
            Output::kv(
                "Remaining tokens",
                &format!("{} / {}", session.remaining_tokens(), orchestrator.max_tokens()),
            );
            InputSource::Transcript
        }
    };

    let request = session.request(source);
    session.begin();

    let pb = Output::progress_bar(100, "Generating notes...");
    let mut progress = orchestrator.subscribe_progress();

    let generation = orchestrator.generate(request);
    tokio::pin!(generation);

    let outcome = loop {
        tokio::select! {
            outcome = &mut generation => break outcome,
            Ok(()) = progress.changed() => {
                session.set_progress(*progress.borrow_and_update());
                pb.set_position(session.progress() as u64);
            }
        }
    };
    pb.finish_and_clear();
    orchestrator.acknowledge();

    let notification = session.finish(&outcome);
    Output::notification(&notification);

    if let GenerationOutcome::Failure { message, .. } = &outcome {
        return Err(anyhow::anyhow!("{}", message));
    }

    match output {
        Some(path) => {
            std::fs::write(&path, session.notes())?;
            Output::success(&format!("Notes written to {}", path));
        }
        None => println!("\n{}\n", session.notes()),
    }

    Ok(())
}

/// Read transcript text from `--text` or `--file` (`-` = stdin).
pub(crate) fn read_input(text: Option<String>, file: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    match file.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e)),
        None => Err(anyhow::anyhow!("Provide --text or --file")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_input_prefers_text() {
        let text = read_input(Some("inline".to_string()), Some("ignored".to_string())).unwrap();
        assert_eq!(text, "inline");
    }

    #[test]
    fn test_read_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lecture.txt");
        std::fs::write(&path, "from file").unwrap();

        let text = read_input(None, Some(path.to_string_lossy().to_string())).unwrap();
        assert_eq!(text, "from file");
    }

    #[test]
    fn test_read_input_missing() {
        assert!(read_input(None, None).is_err());
        assert!(read_input(None, Some("/nonexistent/younotes.txt".to_string())).is_err());
    }
}
