//! Desktop-notification display surface
//!
//! Renders break content as desktop notifications. Notifications have
//! no input affordances, so the adapter can be told a default focus
//! area to request a routine for on every break; dismissal is left to
//! the break timer.

use chrono::Local;
use notify_rust::Notification;
use tracing::{debug, warn};

use super::{SurfaceCommand, SurfaceConnection};
use crate::persona::BodyFocus;

/// Notification-based break display
pub struct NotifySurface {
    conn: SurfaceConnection,
    /// Focus area to auto-request a routine for when a break opens
    auto_focus: Option<BodyFocus>,
}

impl NotifySurface {
    pub fn new(conn: SurfaceConnection, auto_focus: Option<BodyFocus>) -> Self {
        debug!(?auto_focus, "NotifySurface::new: called");
        Self { conn, auto_focus }
    }

    /// Drive the surface until the core hangs up
    pub async fn run(mut self) {
        debug!("NotifySurface::run: started");
        while let Some(cmd) = self.conn.recv().await {
            match cmd {
                SurfaceCommand::ShowBreak { message, break_minutes } => {
                    self.show_break(&message, break_minutes);
                    if let Some(focus) = self.auto_focus
                        && self.conn.focus_selected(focus).await.is_err()
                    {
                        debug!("NotifySurface::run: core gone, stopping");
                        break;
                    }
                }
                SurfaceCommand::ShowRoutine { text } => {
                    show("devPace: stretch routine", &text, false);
                }
                SurfaceCommand::CloseBreak => {
                    // Notifications dismiss themselves; nothing to tear down.
                    debug!("NotifySurface::run: break closed");
                }
                SurfaceCommand::Notify { message } => {
                    show("devPace", &message, false);
                }
            }
        }
        debug!("NotifySurface::run: finished");
    }

    fn show_break(&self, message: &str, break_minutes: u32) {
        let until = Local::now() + chrono::Duration::minutes(i64::from(break_minutes));
        let body = format!(
            "{}\n\nYour break is set for {} minutes (until {}).",
            message,
            break_minutes,
            until.format("%H:%M")
        );
        show("devPace: time to move!", &body, true);
    }
}

/// Fire one notification; a render failure is reported in the log and
/// never propagates to the session loop.
fn show(summary: &str, body: &str, sticky: bool) {
    debug!(%summary, "notify::show: called");
    let mut notification = Notification::new();
    notification.summary(summary).body(body);
    if sticky {
        notification.timeout(0);
    }
    if let Err(e) = notification.show() {
        warn!(error = %e, "Failed to show notification");
    }
}
