//! Pacing session: wires the scheduler, generator, and surface
//!
//! One session per process. A single select! loop owns every piece of
//! mutable state, so cycle events, surface events, and shutdown are
//! handled strictly sequentially: a generation call always finishes
//! (with remote or fallback text) before the result reaches the
//! surface, and nothing races the scheduler.

use std::path::PathBuf;

use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::generator::Generator;
use crate::persona::BodyFocus;
use crate::scheduler::{CycleEvent, CycleScheduler};
use crate::surface::{SettingsForm, SurfaceEvent, SurfaceHandle};

/// Notice shown when no API key is configured
const SETUP_NOTICE: &str =
    "Anthropic API key not set. Break messages will use built-in text until you add one (run `pace setup`).";

/// A running pacing session
pub struct PaceSession {
    config: Config,
    config_path: Option<PathBuf>,
    scheduler: CycleScheduler,
    cycle_rx: mpsc::Receiver<CycleEvent>,
    generator: Generator,
    surface: SurfaceHandle,
    surface_open: bool,
}

impl PaceSession {
    /// Build a session from configuration
    pub fn new(config: Config, config_path: Option<PathBuf>, generator: Generator, surface: SurfaceHandle) -> Self {
        debug!(
            work_minutes = config.pace.work_minutes,
            break_minutes = config.pace.break_minutes,
            "PaceSession::new: called"
        );
        let (scheduler, cycle_rx) = CycleScheduler::new(config.pace.work_minutes, config.pace.break_minutes);
        Self {
            config,
            config_path,
            scheduler,
            cycle_rx,
            generator,
            surface,
            surface_open: true,
        }
    }

    /// Run the session until a shutdown message arrives
    pub async fn run(mut self, mut shutdown_rx: mpsc::Receiver<()>) -> Result<()> {
        info!(
            user = %self.config.pace.user_name,
            style = %self.config.pace.encouragement_style,
            "Pacing session starting"
        );

        if !self.generator.is_configured() {
            // Prompt for the key, keep going on fallback text.
            self.send_notice(SETUP_NOTICE).await;
        }

        self.scheduler.start();

        loop {
            tokio::select! {
                Some(event) = self.cycle_rx.recv() => match event {
                    CycleEvent::BreakDue => self.begin_break().await,
                    CycleEvent::BreakOver => self.end_break().await,
                },
                event = self.surface.recv_event(), if self.surface_open => match event {
                    Some(SurfaceEvent::FocusSelected(focus)) => self.send_routine(focus).await,
                    Some(SurfaceEvent::BreakDismissed) => {
                        debug!("PaceSession::run: break dismissed early");
                        self.end_break().await;
                    }
                    Some(SurfaceEvent::SettingsSubmitted(form)) => self.apply_settings(form).await,
                    Some(SurfaceEvent::PauseRequested) => {
                        info!("Break reminders paused");
                        self.scheduler.pause();
                        self.send_notice("Break reminders paused. Send resume to pick the cycle back up.").await;
                    }
                    Some(SurfaceEvent::ResumeRequested) => {
                        info!("Break reminders resumed");
                        self.scheduler.start();
                        self.send_notice("Break reminders resumed.").await;
                    }
                    None => {
                        // The surface hung up. The cycle keeps running;
                        // there is just nowhere left to render.
                        warn!("Surface disconnected; continuing without a display");
                        self.surface_open = false;
                    }
                },
                _ = shutdown_rx.recv() => {
                    info!("Pacing session shutting down");
                    self.scheduler.shutdown();
                    break;
                }
            }
        }

        Ok(())
    }

    /// The work timer elapsed: produce text and open the break.
    ///
    /// Whatever happens during generation or display, the break timer
    /// is chained afterwards - the cycle must never strand in Working.
    async fn begin_break(&mut self) {
        debug!("PaceSession::begin_break: called");
        let generated = self
            .generator
            .encouragement(self.config.pace.encouragement_style, &self.config.pace.user_name)
            .await;
        debug!(fallback = generated.is_fallback(), "PaceSession::begin_break: content ready");

        if self.surface_open
            && let Err(e) = self
                .surface
                .show_break(generated.text, self.config.pace.break_minutes)
                .await
        {
            warn!(error = %e, "Failed to open break display");
            self.surface_open = false;
        }

        self.scheduler.on_break_displayed();
    }

    /// The break ended (timer or dismissal): close up and work again.
    async fn end_break(&mut self) {
        debug!("PaceSession::end_break: called");
        if self.surface_open
            && let Err(e) = self.surface.close_break().await
        {
            warn!(error = %e, "Failed to close break display");
            self.surface_open = false;
        }
        self.scheduler.start();
    }

    /// A focus area was picked: add a routine to the break display.
    async fn send_routine(&mut self, focus: BodyFocus) {
        debug!(focus = %focus, "PaceSession::send_routine: called");
        let generated = self
            .generator
            .routine(focus, &self.config.pace.user_name, self.config.pace.break_minutes)
            .await;

        if self.surface_open
            && let Err(e) = self.surface.show_routine(generated.text).await
        {
            warn!(error = %e, "Failed to show routine");
            self.surface_open = false;
        }
    }

    /// Apply a validated settings form and persist every key together.
    async fn apply_settings(&mut self, form: SettingsForm) {
        info!(user = %form.user_name, "Applying updated preferences");
        self.config.pace.user_name = form.user_name;
        self.config.pace.work_minutes = form.work_minutes;
        self.config.pace.break_minutes = form.break_minutes;
        self.config.pace.encouragement_style = form.style;
        self.config.pace.configured = true;

        self.scheduler
            .set_durations(self.config.pace.work_minutes, self.config.pace.break_minutes);

        match self.config.save(self.config_path.as_ref()) {
            Ok(()) => {
                let message = format!(
                    "Pace preferences updated successfully. Have a good day, {}!",
                    self.config.pace.user_name
                );
                self.send_notice(&message).await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to save preferences");
                self.send_notice("Failed to save preferences; changes apply to this session only.")
                    .await;
            }
        }
    }

    async fn send_notice(&mut self, message: &str) {
        if !self.surface_open {
            return;
        }
        if let Err(e) = self.surface.notify(message).await {
            warn!(error = %e, "Failed to send notice");
            self.surface_open = false;
        }
    }
}
