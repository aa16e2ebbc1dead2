//! Budget command implementation.

use super::notes::read_input;
use crate::budget::TokenBudget;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the budget command.
pub fn run_budget(text: Option<String>, file: Option<String>, settings: &Settings) -> Result<()> {
    let text = read_input(text, file)?;
    let budget = TokenBudget::for_text(settings.budget.max_tokens, &text);

    Output::header("Token Budget");
    Output::kv("Used", &budget.used.to_string());
    Output::kv("Remaining", &format!("{} / {}", budget.remaining(), budget.ceiling));

    if budget.is_exceeded() {
        Output::warning("Over the token limit. Shorten the transcript before generating notes.");
    } else {
        Output::success("Within the token limit.");
    }

    Ok(())
}
