//! Break-content generation
//!
//! Produces encouragement messages and stretch routines, from the
//! remote text-generation service when a key is configured and from the
//! fixed persona tables otherwise. Every call returns usable text; a
//! failed remote call degrades silently to the style/focus fallback.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::llm::{AnthropicClient, CompletionRequest, LlmClient};
use crate::persona::{BodyFocus, EncouragementStyle};

/// Why generated text came from the local tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No API key configured
    ConfigurationMissing,
    /// The remote call failed (network, non-2xx, or unparseable body)
    RemoteCallFailed,
}

/// Where a piece of generated text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Remote,
    Fallback(FallbackReason),
}

/// A piece of break-time text, ready to display
#[derive(Debug, Clone)]
pub struct Generated {
    pub text: String,
    pub source: TextSource,
}

impl Generated {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, TextSource::Fallback(_))
    }
}

/// Break-content generator
///
/// Holds the client as a trait object so tests can script responses.
/// A generator without a client serves fallback text only.
pub struct Generator {
    llm: Option<Arc<dyn LlmClient>>,
    max_tokens: u32,
}

impl Generator {
    /// Create a generator over an optional client
    pub fn new(llm: Option<Arc<dyn LlmClient>>, max_tokens: u32) -> Self {
        debug!(configured = llm.is_some(), "Generator::new: called");
        Self { llm, max_tokens }
    }

    /// Create a generator from configuration
    ///
    /// A missing API key is not an error here: the generator comes up
    /// in fallback-only mode and the caller routes the user to setup.
    pub fn from_config(config: &LlmConfig) -> Self {
        debug!(model = %config.model, "Generator::from_config: called");
        if config.api_key().is_none() {
            warn!("No API key configured; break content will use fallback text");
            return Self::new(None, config.max_tokens);
        }

        match AnthropicClient::from_config(config) {
            Ok(client) => Self::new(Some(Arc::new(client)), config.max_tokens),
            Err(e) => {
                warn!(error = %e, "Failed to create generation client; using fallback text");
                Self::new(None, config.max_tokens)
            }
        }
    }

    /// Whether a remote client is available
    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    /// Generate a break-time encouragement message
    ///
    /// Always returns non-empty text; remote failures degrade to the
    /// style-keyed fallback.
    pub async fn encouragement(&self, style: EncouragementStyle, user_name: &str) -> Generated {
        debug!(style = %style, %user_name, "Generator::encouragement: called");
        let prompt = format!(
            "{} Give a break-time encouragement message to {}. Keep it to 2 sentences maximum.",
            style.persona_prompt(),
            user_name
        );

        match self.request_text(prompt).await {
            Ok(text) => Generated {
                text,
                source: TextSource::Remote,
            },
            Err(reason) => Generated {
                text: style.fallback_message(user_name),
                source: TextSource::Fallback(reason),
            },
        }
    }

    /// Generate a stretch routine for the given focus area
    ///
    /// The remote prompt asks for a numbered list of at most 5 timed
    /// stretches filling the break; the returned durations are advisory
    /// text and are never validated locally. Failures degrade to the
    /// focus-keyed fallback routine.
    pub async fn routine(&self, focus: BodyFocus, user_name: &str, break_minutes: u32) -> Generated {
        debug!(focus = %focus, %user_name, break_minutes, "Generator::routine: called");
        let prompt = format!(
            "You are a friendly desk-stretch coach. {} Write a stretch routine for {}'s \
             {}-minute break as a numbered list of at most 5 timed stretches whose durations \
             add up to {} minutes.",
            focus.stretch_prompt(),
            user_name,
            break_minutes,
            break_minutes
        );

        match self.request_text(prompt).await {
            Ok(text) => Generated {
                text,
                source: TextSource::Remote,
            },
            Err(reason) => Generated {
                text: focus.fallback_routine().to_string(),
                source: TextSource::Fallback(reason),
            },
        }
    }

    /// Issue one remote request, mapping every failure to the reason
    /// the caller uses to pick fallback text
    async fn request_text(&self, prompt: String) -> Result<String, FallbackReason> {
        let Some(llm) = &self.llm else {
            debug!("Generator::request_text: no client configured");
            return Err(FallbackReason::ConfigurationMissing);
        };

        let request = CompletionRequest::user(prompt, self.max_tokens);
        match llm.complete(request).await {
            Ok(response) => {
                debug!("Generator::request_text: remote reply received");
                Ok(response.text)
            }
            Err(e) => {
                // Silent degrade: the user only ever sees text.
                warn!(error = %e, "Generation call failed; using fallback text");
                Err(FallbackReason::RemoteCallFailed)
            }
        }
    }
}
