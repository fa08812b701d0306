//! Typed channel between the core and its UI surfaces
//!
//! The core never talks to a concrete display. It sends
//! `SurfaceCommand`s and receives `SurfaceEvent`s over a paired channel;
//! any adapter (desktop notifications, a terminal, an editor panel) can
//! sit on the other end. Settings-form validation lives here, at the
//! boundary, so the core only ever sees well-formed preferences.

pub mod notify;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

use crate::persona::{BodyFocus, EncouragementStyle};

/// Commands sent from the core to the display surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCommand {
    /// Open the break display with an encouragement message and a
    /// countdown length
    ShowBreak { message: String, break_minutes: u32 },

    /// Add a stretch routine to the open break display
    ShowRoutine { text: String },

    /// Close the break display
    CloseBreak,

    /// Show a one-line notice (setup prompts, confirmations)
    Notify { message: String },
}

/// Events sent from a surface back to the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The user picked a body area on the break display
    FocusSelected(BodyFocus),

    /// The break display was dismissed before the countdown ended
    BreakDismissed,

    /// The settings form was submitted
    SettingsSubmitted(SettingsForm),

    /// Stop scheduling breaks until resumed
    PauseRequested,

    /// Resume scheduling breaks
    ResumeRequested,
}

/// Errors crossing the surface boundary
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Surface channel closed")]
    ChannelClosed,
}

/// The four-field settings form
///
/// Validation happens here when the form is built from raw input; the
/// core applies the values without re-checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub user_name: String,
    pub work_minutes: u32,
    pub break_minutes: u32,
    pub style: EncouragementStyle,
}

/// Settings-form validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Work minutes must be a positive integer, got: {0}")]
    InvalidWorkMinutes(String),

    #[error("Break minutes must be a positive integer, got: {0}")]
    InvalidBreakMinutes(String),
}

impl SettingsForm {
    /// Build a form from raw field strings, validating each
    ///
    /// The style field is lenient: an unrecognized style falls back to
    /// Supportive Friend, matching the generator's own default.
    pub fn from_fields(user_name: &str, work: &str, break_minutes: &str, style: &str) -> Result<Self, SettingsError> {
        debug!(%user_name, %work, %break_minutes, %style, "SettingsForm::from_fields: called");
        let user_name = user_name.trim();
        if user_name.is_empty() {
            return Err(SettingsError::EmptyName);
        }

        let work_minutes: u32 = work
            .trim()
            .parse()
            .ok()
            .filter(|m| *m > 0)
            .ok_or_else(|| SettingsError::InvalidWorkMinutes(work.to_string()))?;

        let break_parsed: u32 = break_minutes
            .trim()
            .parse()
            .ok()
            .filter(|m| *m > 0)
            .ok_or_else(|| SettingsError::InvalidBreakMinutes(break_minutes.to_string()))?;

        Ok(Self {
            user_name: user_name.to_string(),
            work_minutes,
            break_minutes: break_parsed,
            style: EncouragementStyle::from_name(style),
        })
    }
}

/// Core-side end of the surface channel
pub struct SurfaceHandle {
    cmd_tx: mpsc::Sender<SurfaceCommand>,
    event_rx: mpsc::Receiver<SurfaceEvent>,
}

/// Adapter-side end of the surface channel
pub struct SurfaceConnection {
    cmd_rx: mpsc::Receiver<SurfaceCommand>,
    event_tx: mpsc::Sender<SurfaceEvent>,
}

/// Create a connected handle/connection pair
pub fn channel(capacity: usize) -> (SurfaceHandle, SurfaceConnection) {
    debug!(capacity, "surface::channel: called");
    let (cmd_tx, cmd_rx) = mpsc::channel(capacity);
    let (event_tx, event_rx) = mpsc::channel(capacity);
    (SurfaceHandle { cmd_tx, event_rx }, SurfaceConnection { cmd_rx, event_tx })
}

impl SurfaceHandle {
    /// Open the break display
    pub async fn show_break(&self, message: String, break_minutes: u32) -> Result<(), SurfaceError> {
        debug!(break_minutes, "SurfaceHandle::show_break: called");
        self.cmd_tx
            .send(SurfaceCommand::ShowBreak { message, break_minutes })
            .await
            .map_err(|_| SurfaceError::ChannelClosed)
    }

    /// Add a routine to the break display
    pub async fn show_routine(&self, text: String) -> Result<(), SurfaceError> {
        debug!("SurfaceHandle::show_routine: called");
        self.cmd_tx
            .send(SurfaceCommand::ShowRoutine { text })
            .await
            .map_err(|_| SurfaceError::ChannelClosed)
    }

    /// Close the break display
    pub async fn close_break(&self) -> Result<(), SurfaceError> {
        debug!("SurfaceHandle::close_break: called");
        self.cmd_tx
            .send(SurfaceCommand::CloseBreak)
            .await
            .map_err(|_| SurfaceError::ChannelClosed)
    }

    /// Show a one-line notice
    pub async fn notify(&self, message: impl Into<String>) -> Result<(), SurfaceError> {
        debug!("SurfaceHandle::notify: called");
        self.cmd_tx
            .send(SurfaceCommand::Notify { message: message.into() })
            .await
            .map_err(|_| SurfaceError::ChannelClosed)
    }

    /// Receive the next surface event
    ///
    /// Returns None once every surface end has gone away.
    pub async fn recv_event(&mut self) -> Option<SurfaceEvent> {
        self.event_rx.recv().await
    }
}

impl SurfaceConnection {
    /// Receive the next command from the core
    ///
    /// Returns None once the core has shut down.
    pub async fn recv(&mut self) -> Option<SurfaceCommand> {
        self.cmd_rx.recv().await
    }

    /// A second event sender, for wiring signal handlers or extra
    /// input sources to the same session
    pub fn event_sender(&self) -> mpsc::Sender<SurfaceEvent> {
        self.event_tx.clone()
    }

    /// Report a focus-area selection
    pub async fn focus_selected(&self, focus: BodyFocus) -> Result<(), SurfaceError> {
        debug!(focus = %focus, "SurfaceConnection::focus_selected: called");
        self.event_tx
            .send(SurfaceEvent::FocusSelected(focus))
            .await
            .map_err(|_| SurfaceError::ChannelClosed)
    }

    /// Report an early break dismissal
    pub async fn break_dismissed(&self) -> Result<(), SurfaceError> {
        debug!("SurfaceConnection::break_dismissed: called");
        self.event_tx
            .send(SurfaceEvent::BreakDismissed)
            .await
            .map_err(|_| SurfaceError::ChannelClosed)
    }

    /// Submit a validated settings form
    pub async fn submit_settings(&self, form: SettingsForm) -> Result<(), SurfaceError> {
        debug!("SurfaceConnection::submit_settings: called");
        self.event_tx
            .send(SurfaceEvent::SettingsSubmitted(form))
            .await
            .map_err(|_| SurfaceError::ChannelClosed)
    }
}
