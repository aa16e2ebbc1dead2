//! OpenAI chat completion generator.

use super::NoteGenerator;
use crate::config::GenerationSettings;
use crate::error::{NotesError, Result};
use crate::openai::create_client;
use async_openai::types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Generator backed by an OpenAI-compatible chat completions API.
pub struct OpenAIGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl OpenAIGenerator {
    /// Create a generator from settings.
    pub fn from_settings(settings: &GenerationSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(settings)?,
            model: settings.model.clone(),
        })
    }
}

#[async_trait]
impl NoteGenerator for OpenAIGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| NotesError::Generation(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![message.into()])
            .build()
            .map_err(|e| NotesError::Generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| NotesError::Generation(e.to_string()))?;

        let text = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| NotesError::Generation("Empty response from model".to_string()))?
            .clone();

        debug!("Generated {} chars", text.len());
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
