use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Single-turn text completion backend used for risk briefings.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Model identifier for logging.
    fn name(&self) -> &str;

    /// Send one user prompt and return the reply verbatim.
    async fn complete(&self, prompt: &str) -> Result<String, DomainError>;
}
