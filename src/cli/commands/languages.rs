//! Languages command implementation.

use crate::cli::Output;
use crate::language::{DEFAULT_LANGUAGE, LANGUAGES};

/// Run the languages command.
pub fn run_languages() {
    Output::header("Transcript Languages");
    for language in LANGUAGES {
        let marker = if language.code == DEFAULT_LANGUAGE { " (default)" } else { "" };
        Output::list_item(&format!("{:<4} {}{}", language.code, language.name, marker));
    }
}
