//! Doctor command - verify configuration and connectivity.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::NotesError;
use crate::transcript::TranscriptProxy;
use console::style;
use std::path::PathBuf;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    Output::header("YouNotes Doctor");
    println!();
    println!("Checking configuration and connectivity...\n");

    let mut checks = Vec::new();

    println!("{}", style("Generation").bold());
    let api_check = check_api_key(&settings.generation.api_key_env);
    api_check.print();
    checks.push(api_check);
    let model_check = CheckResult::ok(
        "Model",
        &format!(
            "{} via {}",
            settings.generation.model,
            settings.generation.api_base.as_deref().unwrap_or("api.openai.com")
        ),
    );
    model_check.print();
    checks.push(model_check);

    println!();

    println!("{}", style("Transcript Service").bold());
    let service_check = check_transcript_service(settings).await;
    service_check.print();
    checks.push(service_check);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(config_path.unwrap_or_else(Settings::default_config_path));
    config_check.print();
    checks.push(config_check);
    let budget_check = check_budget(settings.budget.max_tokens);
    budget_check.print();
    checks.push(budget_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before generating notes.",
            errors
        ));
        return Err(anyhow::anyhow!("{} doctor check(s) failed", errors));
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! YouNotes is ready to use.");
    }

    Ok(())
}

/// Check that the API key variable is set.
fn check_api_key(var: &str) -> CheckResult {
    let hint = format!("Set with: export {}='sk-...'", var);
    match std::env::var(var) {
        Ok(key) if key.is_empty() => CheckResult::error(var, "empty", &hint),
        Ok(key) => CheckResult::ok(var, &format!("configured ({})", mask_key(&key))),
        Err(_) => CheckResult::error(var, "not set", &hint),
    }
}

/// Mask all but the edges of a secret.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Check that the transcript service URL is valid and the service answers.
async fn check_transcript_service(settings: &Settings) -> CheckResult {
    let url = &settings.transcript.service_url;
    let proxy = match TranscriptProxy::from_settings(&settings.transcript) {
        Ok(proxy) => proxy,
        Err(e) => {
            return CheckResult::error(
                "Service URL",
                &e.to_string(),
                "Set [transcript] service_url in the config or pass --service-url",
            )
        }
    };

    match proxy.ping().await {
        Ok(()) => CheckResult::ok("Service", &format!("{} is reachable", url)),
        Err(NotesError::Timeout(deadline)) => CheckResult::warning(
            "Service",
            &format!("{} did not answer within {:?}", url, deadline),
            "The service may be cold-starting; try again in a minute",
        ),
        Err(e) => CheckResult::warning(
            "Service",
            &format!("{} is unreachable: {}", url, e),
            "YouTube notes need the transcript service; pasted transcripts still work",
        ),
    }
}

/// Check if the config file exists.
fn check_config_file(config_path: PathBuf) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: younotes config edit",
        )
    }
}

fn check_budget(max_tokens: usize) -> CheckResult {
    if max_tokens == 0 {
        CheckResult::error(
            "Token budget",
            "max_tokens is 0, every transcript will be rejected",
            "Set [budget] max_tokens to a positive value",
        )
    } else {
        CheckResult::ok("Token budget", &format!("{} tokens", max_tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-abcdefghijklmnop1234"), "sk-abcd...1234");
        assert_eq!(mask_key("short"), "*****");
    }

    #[test]
    fn test_check_budget() {
        assert_eq!(check_budget(0).status, CheckStatus::Error);
        assert_eq!(check_budget(1000).status, CheckStatus::Ok);
    }

    #[tokio::test]
    async fn test_invalid_service_url_is_error() {
        let mut settings = Settings::default();
        settings.transcript.service_url = "::nope::".to_string();
        let result = check_transcript_service(&settings).await;
        assert_eq!(result.status, CheckStatus::Error);
    }
}
