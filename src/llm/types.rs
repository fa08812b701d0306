//! Request/response types for the text-generation service
//!
//! These model the Anthropic Messages API, but are small enough to stay
//! provider-agnostic: one user message in, one short text reply out.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A completion request - everything needed for one generation call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Conversation messages (a single user message for break content)
    pub messages: Vec<Message>,

    /// Max tokens for the reply
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Build a single-user-message request
    pub fn user(prompt: impl Into<String>, max_tokens: u32) -> Self {
        debug!(max_tokens, "CompletionRequest::user: called");
        Self {
            messages: vec![Message::user(prompt)],
            max_tokens,
        }
    }
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        debug!("Message::user: called");
        Self {
            role: Role::User,
            content: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A completed generation - the text of the first content block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_request_has_single_message() {
        let request = CompletionRequest::user("hello", 100);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
        assert_eq!(request.messages[0].content, "hello");
        assert_eq!(request.max_tokens, 100);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert!(json.contains("\"role\":\"user\""));
    }
}
