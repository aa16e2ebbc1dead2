//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const FALLBACK_EDITOR: &str = "vi";

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings, config_path: Option<PathBuf>) -> Result<()> {
    let path = config_path.unwrap_or_else(Settings::default_config_path);

    match action {
        ConfigAction::Show => print!("{}", render_settings(&settings, &path)?),
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Edit => edit(&settings, &path)?,
    }

    Ok(())
}

/// Effective settings as TOML, headed by the file they would be read from.
fn render_settings(settings: &Settings, path: &Path) -> Result<String> {
    let body = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
    let origin = if path.exists() { "" } else { " (not created yet, showing defaults)" };
    Ok(format!("# {}{}\n\n{}", path.display(), origin, body))
}

/// Open the config file in the user's editor, then check that it still loads.
fn edit(settings: &Settings, path: &Path) -> Result<()> {
    let path = path.to_path_buf();
    if !path.exists() {
        settings.save_to(&path)?;
        Output::info(&format!("Wrote current settings to {}", path.display()));
    }

    let editor = pick_editor(std::env::var("VISUAL").ok(), std::env::var("EDITOR").ok());
    let status = std::process::Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| format!("Could not start editor '{}'", editor))?;

    if !status.success() {
        Output::warning(&format!("{} exited with {}, file left as is.", editor, status));
        return Ok(());
    }

    match validate(&path) {
        Ok(edited) => {
            Output::success("Config saved.");
            Output::kv("Transcript service", &edited.transcript.service_url);
            Output::kv("Model", &edited.generation.model);
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("{} no longer loads: {}", path.display(), e));
            Output::info("Run 'younotes config edit' again to fix it.");
            Err(e)
        }
    }
}

/// `$VISUAL` wins over `$EDITOR`; blank values are ignored.
fn pick_editor(visual: Option<String>, editor: Option<String>) -> String {
    [visual, editor]
        .into_iter()
        .flatten()
        .map(|e| e.trim().to_string())
        .find(|e| !e.is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

fn validate(path: &PathBuf) -> Result<Settings> {
    Settings::load_from(Some(path)).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_editor() {
        assert_eq!(pick_editor(Some("hx".into()), Some("nano".into())), "hx");
        assert_eq!(pick_editor(Some("  ".into()), Some("nano".into())), "nano");
        assert_eq!(pick_editor(None, None), "vi");
    }

    #[test]
    fn test_render_settings_marks_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let shown = render_settings(&Settings::default(), &path).unwrap();
        assert!(shown.starts_with(&format!("# {} (not created yet", path.display())));
        assert!(shown.contains("[transcript]"));
        assert!(shown.contains("max_tokens = 1000"));

        Settings::default().save_to(&path).unwrap();
        let shown = render_settings(&Settings::default(), &path).unwrap();
        assert!(!shown.contains("not created yet"));
    }

    #[test]
    fn test_validate_rejects_broken_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "[budget]\nmax_tokens = 400\n").unwrap();
        assert_eq!(validate(&path).unwrap().budget.max_tokens, 400);

        std::fs::write(&path, "[budget\nmax_tokens = ").unwrap();
        assert!(validate(&path).is_err());
    }
}
