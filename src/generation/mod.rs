//! Generative text service used to write notes.

mod openai;

pub use openai::OpenAIGenerator;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for text generation backends.
///
/// One call produces one complete response; there is no streaming.
#[async_trait]
pub trait NoteGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Name of the model behind this generator.
    fn model(&self) -> &str;
}
