//! Client trait for text-generation providers

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// A text-generation provider
///
/// The generator depends on this trait rather than a concrete client so
/// tests can substitute a scripted implementation.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Issue one completion request and wait for the reply
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
