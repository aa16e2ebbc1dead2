//! Prompt templates for YouNotes.
//!
//! The notes prompt can be customized by placing `notes.toml` in the custom
//! prompts directory.

use super::Settings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub notes: NotesPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompt used to turn a transcript into notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesPrompts {
    pub user: String,
}

impl Default for NotesPrompts {
    fn default() -> Self {
        Self {
            user: "Please generate notes from the following transcript:\n\n{{transcript}}"
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let notes_path = Settings::expand_path(dir).join("notes.toml");
            if notes_path.exists() {
                let content = std::fs::read_to_string(&notes_path)?;
                prompts.notes = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Single pass over the template: substituted values are never scanned
    /// again, and unknown `{{name}}` placeholders are left as they are.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            match after.find("}}") {
                Some(end) => match vars.get(&after[..end]) {
                    Some(value) => {
                        result.push_str(value);
                        rest = &after[end + 2..];
                    }
                    None => {
                        result.push_str("{{");
                        rest = after;
                    }
                },
                None => {
                    result.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        result.push_str(rest);
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }

    /// Build the notes prompt for a transcript.
    pub fn notes_prompt(&self, transcript: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());
        self.render_with_custom(&self.notes.user, &vars)
    }
}
