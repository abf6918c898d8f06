// src/provider/mod.rs — Completion service

pub mod google;

use async_trait::async_trait;

use crate::infra::errors::CompletionError;

pub use google::GeminiClient;

/// Text in, generated text out. Every call is attempted exactly once.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Label used in logs and error messages.
    fn id(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
