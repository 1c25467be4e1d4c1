//! LLM provider trait for generating completions

use async_trait::async_trait;
use crate::error::Result;

/// Trait for generative-model completions
///
/// Implementations:
/// - `GeminiClient`: Google Generative Language API
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a composed prompt and return the model's text verbatim
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
