//! Work/break cycle scheduler
//!
//! Drives the Working ⇄ OnBreak alternation with wall-clock timers.
//! Each timer is a tokio sleep in its own task; when it elapses, a
//! `CycleEvent` lands on the channel handed out at construction. At
//! most one timer is pending at any time: every schedule call aborts
//! the previous handle first, so `start()` is safe to call repeatedly
//! without stacking triggers.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Which half of the cycle the scheduler is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Working,
    OnBreak,
}

/// Timer expirations emitted by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEvent {
    /// The work timer elapsed; time to show a break
    BreakDue,
    /// The break timer elapsed; time to resume work
    BreakOver,
}

/// The pending timer, tagged with the phase that scheduled it so
/// `pause()` can leave break timers alone.
struct PendingTimer {
    phase: Phase,
    handle: JoinHandle<()>,
}

/// Work/break cycle scheduler
///
/// One instance per session, constructed by the composition root and
/// torn down with an explicit `shutdown()`.
pub struct CycleScheduler {
    work: Duration,
    rest: Duration,
    phase: Phase,
    pending: Option<PendingTimer>,
    events_tx: mpsc::Sender<CycleEvent>,
}

impl CycleScheduler {
    /// Create a scheduler and the channel its timers fire on
    pub fn new(work_minutes: u32, break_minutes: u32) -> (Self, mpsc::Receiver<CycleEvent>) {
        debug!(work_minutes, break_minutes, "CycleScheduler::new: called");
        let (events_tx, events_rx) = mpsc::channel(8);
        let scheduler = Self {
            work: minutes(work_minutes),
            rest: minutes(break_minutes),
            phase: Phase::Working,
            pending: None,
            events_tx,
        };
        (scheduler, events_rx)
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a timer is currently pending
    pub fn has_pending_timer(&self) -> bool {
        self.pending.is_some()
    }

    /// Enter the Working phase and schedule the next break
    ///
    /// Cancel-then-schedule: any pending timer (work or break) is
    /// invalidated first, so calling this twice arms exactly one
    /// trigger.
    pub fn start(&mut self) {
        debug!(work = ?self.work, "CycleScheduler::start: called");
        self.cancel_pending();
        self.phase = Phase::Working;
        self.schedule(Phase::Working, self.work, CycleEvent::BreakDue);
    }

    /// Cancel the pending work timer, if any
    ///
    /// Only timers armed by `start()` are cancelled; a break-duration
    /// timer already chained by `on_break_displayed()` keeps running.
    pub fn pause(&mut self) {
        debug!("CycleScheduler::pause: called");
        if let Some(pending) = &self.pending
            && pending.phase == Phase::Working
        {
            debug!("CycleScheduler::pause: cancelling pending work timer");
            self.cancel_pending();
        }
    }

    /// Enter the OnBreak phase and schedule the end of the break
    ///
    /// Called once the display surface has the break up.
    pub fn on_break_displayed(&mut self) {
        debug!(rest = ?self.rest, "CycleScheduler::on_break_displayed: called");
        self.cancel_pending();
        self.phase = Phase::OnBreak;
        self.schedule(Phase::OnBreak, self.rest, CycleEvent::BreakOver);
    }

    /// Update durations; applies to subsequently scheduled timers
    pub fn set_durations(&mut self, work_minutes: u32, break_minutes: u32) {
        debug!(work_minutes, break_minutes, "CycleScheduler::set_durations: called");
        self.work = minutes(work_minutes);
        self.rest = minutes(break_minutes);
    }

    /// Cancel any pending timer
    pub fn shutdown(&mut self) {
        debug!("CycleScheduler::shutdown: called");
        self.cancel_pending();
    }

    fn schedule(&mut self, phase: Phase, delay: Duration, event: CycleEvent) {
        debug!(?phase, ?delay, ?event, "CycleScheduler::schedule: arming timer");
        let tx = self.events_tx.clone();
        // Deadline is fixed here, not at first poll of the task.
        let sleep = tokio::time::sleep(delay);
        let handle = tokio::spawn(async move {
            sleep.await;
            // Receiver gone means the session is shutting down.
            let _ = tx.send(event).await;
        });
        self.pending = Some(PendingTimer { phase, handle });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(phase = ?pending.phase, "CycleScheduler::cancel_pending: aborting timer");
            pending.handle.abort();
        }
    }
}

impl Drop for CycleScheduler {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn minutes(m: u32) -> Duration {
    Duration::from_secs(u64::from(m) * 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    /// Let spawned timer tasks run after the clock moves.
    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn break_fires_after_work_minutes() {
        let (mut scheduler, mut events) = CycleScheduler::new(1, 1);
        scheduler.start();
        assert_eq!(scheduler.phase(), Phase::Working);

        advance(Duration::from_secs(60)).await;
        settle().await;

        assert_eq!(events.try_recv().unwrap(), CycleEvent::BreakDue);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_fires_before_the_work_timer_elapses() {
        let (mut scheduler, mut events) = CycleScheduler::new(2, 1);
        scheduler.start();

        advance(Duration::from_secs(119)).await;
        settle().await;

        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_prevents_the_break_trigger() {
        let (mut scheduler, mut events) = CycleScheduler::new(1, 1);
        scheduler.start();
        scheduler.pause();

        advance(Duration::from_secs(3600)).await;
        settle().await;

        assert!(events.try_recv().is_err());
        assert!(!scheduler.has_pending_timer());
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_arms_exactly_one_trigger() {
        let (mut scheduler, mut events) = CycleScheduler::new(1, 1);
        scheduler.start();
        scheduler.start();

        advance(Duration::from_secs(3600)).await;
        settle().await;

        assert_eq!(events.try_recv().unwrap(), CycleEvent::BreakDue);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_leaves_a_chained_break_timer_running() {
        let (mut scheduler, mut events) = CycleScheduler::new(1, 1);
        scheduler.on_break_displayed();
        assert_eq!(scheduler.phase(), Phase::OnBreak);

        scheduler.pause();
        assert!(scheduler.has_pending_timer());

        advance(Duration::from_secs(60)).await;
        settle().await;

        assert_eq!(events.try_recv().unwrap(), CycleEvent::BreakOver);
    }

    #[tokio::test(start_paused = true)]
    async fn full_cycle_alternates_events() {
        let (mut scheduler, mut events) = CycleScheduler::new(1, 1);
        scheduler.start();

        advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(events.try_recv().unwrap(), CycleEvent::BreakDue);

        scheduler.on_break_displayed();
        advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(events.try_recv().unwrap(), CycleEvent::BreakOver);

        scheduler.start();
        assert_eq!(scheduler.phase(), Phase::Working);
        advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(events.try_recv().unwrap(), CycleEvent::BreakDue);
    }

    #[tokio::test(start_paused = true)]
    async fn set_durations_applies_to_next_schedule() {
        let (mut scheduler, mut events) = CycleScheduler::new(60, 10);
        scheduler.set_durations(1, 1);
        scheduler.start();

        advance(Duration::from_secs(60)).await;
        settle().await;

        assert_eq!(events.try_recv().unwrap(), CycleEvent::BreakDue);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_timer() {
        let (mut scheduler, mut events) = CycleScheduler::new(1, 1);
        scheduler.start();
        scheduler.shutdown();

        advance(Duration::from_secs(3600)).await;
        settle().await;

        assert!(events.try_recv().is_err());
    }
}
