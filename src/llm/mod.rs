//! Text-generation client for break content
//!
//! Provides the client trait, the Anthropic implementation, and the
//! request/response types shared by both.

mod anthropic;
mod client;
mod error;
mod types;

pub use anthropic::AnthropicClient;
pub use client::LlmClient;
pub use error::LlmError;
pub use types::{CompletionRequest, CompletionResponse, Message, Role};
