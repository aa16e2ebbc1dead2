//! OpenAI client configuration.

use crate::config::GenerationSettings;
use crate::error::{NotesError, Result};
use async_openai::{config::OpenAIConfig, Client};

/// Create an OpenAI client from generation settings.
///
/// The API key is read from the environment variable named in the settings.
/// An `api_base` points the client at any OpenAI-compatible endpoint.
pub fn create_client(settings: &GenerationSettings) -> Result<Client<OpenAIConfig>> {
    let api_key = std::env::var(&settings.api_key_env).map_err(|_| {
        NotesError::Config(format!(
            "{} not set. Set it with: export {}='sk-...'",
            settings.api_key_env, settings.api_key_env
        ))
    })?;

    let mut config = OpenAIConfig::new().with_api_key(api_key);
    if let Some(base) = settings.api_base.as_deref().filter(|b| !b.is_empty()) {
        config = config.with_api_base(base);
    }

    let http_client = reqwest::Client::builder().build()?;

    Ok(Client::with_config(config).with_http_client(http_client))
}

/// Check if the configured API key is present and non-empty.
pub fn is_api_key_configured(settings: &GenerationSettings) -> bool {
    std::env::var(&settings.api_key_env).is_ok_and(|key| !key.is_empty())
}
