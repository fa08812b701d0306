//! End-to-end cycle tests
//!
//! Drive a full pacing session against a paused clock and a scripted
//! generation client: no real timers, no network.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::Instant;

use devpace::surface::{self, SurfaceCommand};
use devpace::{
    BodyFocus, CompletionRequest, CompletionResponse, Config, EncouragementStyle, Generator, LlmClient, LlmError,
    PaceSession,
};

/// Scripted client: replies with a fixed result every time
struct ScriptedClient {
    reply: Result<String, u16>,
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        match &self.reply {
            Ok(text) => Ok(CompletionResponse { text: text.clone() }),
            Err(status) => Err(LlmError::ApiError {
                status: *status,
                message: "simulated failure".to_string(),
            }),
        }
    }
}

fn ada_config() -> Config {
    let mut config = Config::default();
    config.pace.user_name = "Ada".to_string();
    config.pace.work_minutes = 1;
    config.pace.break_minutes = 1;
    config.pace.encouragement_style = EncouragementStyle::ZenMaster;
    config
}

/// Preferences{Ada, 1, 1, Zen Master}, no API key: after one simulated
/// minute the break opens with the Zen Master fallback naming Ada;
/// after one more the session re-enters Working and schedules the next
/// break.
#[tokio::test(start_paused = true)]
async fn full_cycle_with_fallback_text() {
    let (handle, mut conn) = surface::channel(8);
    let session = PaceSession::new(ada_config(), None, Generator::new(None, 100), handle);

    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
    let session_task = tokio::spawn(session.run(shutdown_rx));

    // No API key: the session leads with a setup notice.
    match conn.recv().await.unwrap() {
        SurfaceCommand::Notify { message } => assert!(message.contains("API key")),
        other => panic!("Expected setup notice, got {:?}", other),
    }

    // One simulated work minute later the break opens.
    let started = Instant::now();
    match conn.recv().await.unwrap() {
        SurfaceCommand::ShowBreak { message, break_minutes } => {
            assert_eq!(message, EncouragementStyle::ZenMaster.fallback_message("Ada"));
            assert!(message.contains("Ada"));
            assert_eq!(break_minutes, 1);
        }
        other => panic!("Expected break display, got {:?}", other),
    }
    assert_eq!(started.elapsed(), Duration::from_secs(60));

    // One simulated break minute later the break closes.
    match conn.recv().await.unwrap() {
        SurfaceCommand::CloseBreak => {}
        other => panic!("Expected break close, got {:?}", other),
    }
    assert_eq!(started.elapsed(), Duration::from_secs(120));

    // Back in Working: the next break arrives a work period later.
    match conn.recv().await.unwrap() {
        SurfaceCommand::ShowBreak { message, .. } => {
            assert_eq!(message, EncouragementStyle::ZenMaster.fallback_message("Ada"));
        }
        other => panic!("Expected second break display, got {:?}", other),
    }
    assert_eq!(started.elapsed(), Duration::from_secs(180));

    shutdown_tx.send(()).await.unwrap();
    session_task.await.unwrap().unwrap();
}

/// A remote reply is handed to the surface verbatim.
#[tokio::test(start_paused = true)]
async fn remote_reply_reaches_the_surface() {
    let generator = Generator::new(
        Some(Arc::new(ScriptedClient {
            reply: Ok("X".to_string()),
        })),
        100,
    );

    let (handle, mut conn) = surface::channel(8);
    let session = PaceSession::new(ada_config(), None, generator, handle);

    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
    let session_task = tokio::spawn(session.run(shutdown_rx));

    match conn.recv().await.unwrap() {
        SurfaceCommand::ShowBreak { message, .. } => assert_eq!(message, "X"),
        other => panic!("Expected break display, got {:?}", other),
    }

    shutdown_tx.send(()).await.unwrap();
    session_task.await.unwrap().unwrap();
}

/// A failing remote call still opens the break, with fallback text,
/// and the cycle keeps chaining.
#[tokio::test(start_paused = true)]
async fn remote_failure_still_chains_the_cycle() {
    let generator = Generator::new(Some(Arc::new(ScriptedClient { reply: Err(500) })), 100);

    let (handle, mut conn) = surface::channel(8);
    let session = PaceSession::new(ada_config(), None, generator, handle);

    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
    let session_task = tokio::spawn(session.run(shutdown_rx));

    match conn.recv().await.unwrap() {
        SurfaceCommand::ShowBreak { message, .. } => {
            assert_eq!(message, EncouragementStyle::ZenMaster.fallback_message("Ada"));
        }
        other => panic!("Expected break display, got {:?}", other),
    }

    // The break still times out and the cycle re-enters Working.
    assert_eq!(conn.recv().await.unwrap(), SurfaceCommand::CloseBreak);
    assert!(matches!(conn.recv().await.unwrap(), SurfaceCommand::ShowBreak { .. }));

    shutdown_tx.send(()).await.unwrap();
    session_task.await.unwrap().unwrap();
}

/// Picking a focus area during a break produces a routine for it.
#[tokio::test(start_paused = true)]
async fn focus_selection_yields_a_routine() {
    let (handle, mut conn) = surface::channel(8);
    let session = PaceSession::new(ada_config(), None, Generator::new(None, 100), handle);

    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
    let session_task = tokio::spawn(session.run(shutdown_rx));

    // Setup notice, then the first break.
    assert!(matches!(conn.recv().await.unwrap(), SurfaceCommand::Notify { .. }));
    assert!(matches!(conn.recv().await.unwrap(), SurfaceCommand::ShowBreak { .. }));

    conn.focus_selected(BodyFocus::Wrists).await.unwrap();
    match conn.recv().await.unwrap() {
        SurfaceCommand::ShowRoutine { text } => {
            assert_eq!(text, BodyFocus::Wrists.fallback_routine());
        }
        other => panic!("Expected routine, got {:?}", other),
    }

    shutdown_tx.send(()).await.unwrap();
    session_task.await.unwrap().unwrap();
}
