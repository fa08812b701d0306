//! devpace - work/break pacing with AI encouragement
//!
//! devpace alternates work and break phases on wall-clock timers. When
//! a break opens, it generates a short encouragement message (and, on
//! request, a stretch routine) from a text-generation service, falling
//! back to fixed per-style text whenever the remote call cannot be
//! made. The user-facing flow is never blocked on the network: every
//! generation call resolves to usable text.
//!
//! # Modules
//!
//! - [`scheduler`] - Working ⇄ OnBreak cycle timers
//! - [`generator`] - encouragement/routine generation with fallbacks
//! - [`persona`] - styles, focus areas, prompt and fallback tables
//! - [`llm`] - text-generation client trait and Anthropic implementation
//! - [`surface`] - typed channel to the display and settings surfaces
//! - [`session`] - composition root wiring the above together
//! - [`config`] - preferences loading and saving
//! - [`cli`] / [`daemon`] - command-line interface and process control

pub mod cli;
pub mod config;
pub mod daemon;
pub mod generator;
pub mod llm;
pub mod persona;
pub mod scheduler;
pub mod session;
pub mod surface;

// Re-export commonly used types
pub use config::{Config, LlmConfig, PaceConfig};
pub use generator::{FallbackReason, Generated, Generator, TextSource};
pub use llm::{AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError, Message, Role};
pub use persona::{BodyFocus, EncouragementStyle};
pub use scheduler::{CycleEvent, CycleScheduler, Phase};
pub use session::PaceSession;
pub use surface::{
    SettingsError, SettingsForm, SurfaceCommand, SurfaceConnection, SurfaceError, SurfaceEvent, SurfaceHandle,
};
