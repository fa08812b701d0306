//! devpace - work/break pacing daemon
//!
//! CLI entry point for running the pacing session, managing the
//! background daemon, and editing preferences.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use tokio::sync::mpsc;
use tracing::{info, warn};

use devpace::cli::{Cli, Command, OutputFormat, get_log_path};
use devpace::config::Config;
use devpace::daemon::DaemonManager;
use devpace::generator::Generator;
use devpace::persona::{BodyFocus, EncouragementStyle};
use devpace::session::PaceSession;
use devpace::surface::notify::NotifySurface;
use devpace::surface::{self, SettingsForm, SurfaceEvent};

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "devpace loaded config: user={}, work={}m, break={}m, style={}",
        config.pace.user_name, config.pace.work_minutes, config.pace.break_minutes, config.pace.encouragement_style
    );

    // Dispatch command
    match cli.command {
        Some(Command::Run {
            focus,
            work,
            break_minutes,
        }) => cmd_run(config, cli.config, focus, work, break_minutes).await,
        Some(Command::Start) => cmd_start(),
        Some(Command::Stop) => cmd_stop(),
        Some(Command::Status { format }) => cmd_status(format),
        Some(Command::RunDaemon) => cmd_run_daemon(config, cli.config).await,
        Some(Command::Setup) => cmd_setup(config, cli.config),
        Some(Command::Preview { style, focus }) => cmd_preview(&config, style, focus).await,
        Some(Command::Config { format }) => cmd_config(&config, format),
        Some(Command::Logs { follow, lines }) => cmd_logs(follow, lines),
        None => {
            // Default: run in the foreground
            cmd_run(config, cli.config, None, None, None).await
        }
    }
}

/// Run the pacing session in the foreground
async fn cmd_run(
    mut config: Config,
    config_path: Option<PathBuf>,
    focus: Option<BodyFocus>,
    work: Option<u32>,
    break_minutes: Option<u32>,
) -> Result<()> {
    if let Some(minutes) = work {
        config.pace.work_minutes = minutes;
    }
    if let Some(minutes) = break_minutes {
        config.pace.break_minutes = minutes;
    }
    if config.pace.work_minutes == 0 || config.pace.break_minutes == 0 {
        return Err(eyre::eyre!("Work and break durations must be positive"));
    }

    println!("devpace running for {}.", config.pace.user_name);
    println!(
        "  Work: {} minutes, break: {} minutes, style: {}",
        config.pace.work_minutes, config.pace.break_minutes, config.pace.encouragement_style
    );
    println!("  Press Ctrl+C to stop.");

    run_session(config, config_path, focus).await
}

/// Run as the daemon process (internal command)
async fn cmd_run_daemon(config: Config, config_path: Option<PathBuf>) -> Result<()> {
    let daemon = DaemonManager::new();
    daemon.register_self()?;

    run_session(config, config_path, None).await
}

/// Wire up the session, surface, and signal handling, then run
async fn run_session(config: Config, config_path: Option<PathBuf>, focus: Option<BodyFocus>) -> Result<()> {
    let generator = Generator::from_config(&config.llm);

    let (handle, conn) = surface::channel(16);
    let event_tx = conn.event_sender();

    // Shutdown channel for the session
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);

    // Signal handling: Ctrl+C / SIGTERM stop the session, SIGUSR1
    // pauses the reminder cycle, SIGUSR2 resumes it.
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigusr1 = signal(SignalKind::user_defined1())?;
        let mut sigusr2 = signal(SignalKind::user_defined2())?;

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = sigint.recv() => {
                        warn!("SIGINT received");
                        let _ = shutdown_tx.send(()).await;
                        break;
                    }
                    _ = sigterm.recv() => {
                        warn!("SIGTERM received");
                        let _ = shutdown_tx.send(()).await;
                        break;
                    }
                    _ = sigusr1.recv() => {
                        info!("SIGUSR1 received - pausing reminders");
                        let _ = event_tx.send(SurfaceEvent::PauseRequested).await;
                    }
                    _ = sigusr2.recv() => {
                        info!("SIGUSR2 received - resuming reminders");
                        let _ = event_tx.send(SurfaceEvent::ResumeRequested).await;
                    }
                }
            }
        });
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            let _ = shutdown_tx.send(()).await;
        });
        drop(event_tx);
    }

    // The notification surface lives on its own task and exits when
    // the session drops its end of the channel.
    let surface_task = tokio::spawn(NotifySurface::new(conn, focus).run());

    let session = PaceSession::new(config, config_path, generator, handle);
    session.run(shutdown_rx).await?;

    let _ = surface_task.await;
    Ok(())
}

/// Start the daemon in the background
fn cmd_start() -> Result<()> {
    let daemon = DaemonManager::new();

    if daemon.is_running() {
        println!("devpace is already running (PID: {})", daemon.running_pid().unwrap());
        return Ok(());
    }

    let pid = daemon.start()?;
    println!("devpace started (PID: {})", pid);
    Ok(())
}

/// Stop the daemon
fn cmd_stop() -> Result<()> {
    let daemon = DaemonManager::new();

    if !daemon.is_running() {
        println!("devpace is not running");
        return Ok(());
    }

    let pid = daemon.running_pid().unwrap();
    daemon.stop()?;
    println!("devpace stopped (was PID: {})", pid);
    Ok(())
}

/// Show daemon status
fn cmd_status(format: OutputFormat) -> Result<()> {
    let daemon = DaemonManager::new();
    let status = daemon.status();

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "running": status.running,
                "pid": status.pid,
                "pid_file": status.pid_file.to_string_lossy()
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            println!("devpace Status");
            println!("--------------");
            if status.running {
                println!("Status: running");
                println!("PID: {}", status.pid.unwrap());
            } else {
                println!("Status: stopped");
            }
            println!("PID file: {}", status.pid_file.display());
        }
    }

    Ok(())
}

/// Terminal settings form: four questions, validated at the boundary
/// and saved in one shot.
fn cmd_setup(mut config: Config, config_path: Option<PathBuf>) -> Result<()> {
    println!("Hi there! Let's set your pace preferences.");
    println!();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut ask = |question: &str| -> Result<String> {
        println!("{}", question);
        let line = lines
            .next()
            .transpose()
            .context("Failed to read input")?
            .ok_or_else(|| eyre::eyre!("Input closed before the form was complete"))?;
        Ok(line)
    };

    let name = ask("What is your name?")?;
    let work = ask("How long do you want to work for without a break (in minutes)?")?;
    let break_minutes = ask("How long do you want your breaks to be (in minutes)?")?;

    println!("What kind of encouragement would you like?");
    for style in EncouragementStyle::ALL {
        println!("  - {}", style);
    }
    let style = ask("")?;

    let form = SettingsForm::from_fields(&name, &work, &break_minutes, &style)?;

    config.pace.user_name = form.user_name;
    config.pace.work_minutes = form.work_minutes;
    config.pace.break_minutes = form.break_minutes;
    config.pace.encouragement_style = form.style;
    config.pace.configured = true;
    config.save(config_path.as_ref())?;

    println!();
    println!(
        "Pace preferences updated successfully. Have a good day, {}!",
        config.pace.user_name
    );

    if config.llm.api_key().is_none() {
        println!();
        println!(
            "Note: no Anthropic API key found. Set the {} environment variable (or llm.api-key \
             in the config file) to get generated messages; built-in text is used until then.",
            config.llm.api_key_env
        );
    }

    Ok(())
}

/// Print one generated encouragement (and optionally a routine)
async fn cmd_preview(config: &Config, style: Option<EncouragementStyle>, focus: Option<BodyFocus>) -> Result<()> {
    let generator = Generator::from_config(&config.llm);
    let style = style.unwrap_or(config.pace.encouragement_style);

    let message = generator.encouragement(style, &config.pace.user_name).await;
    println!("[{}] {}", style, message.text);

    if let Some(focus) = focus {
        let routine = generator
            .routine(focus, &config.pace.user_name, config.pace.break_minutes)
            .await;
        println!();
        println!("[{}]", focus);
        println!("{}", routine.text);
    }

    if message.is_fallback() {
        println!();
        println!("(built-in fallback text; set {} for generated messages)", config.llm.api_key_env);
    }

    Ok(())
}

/// Show the effective configuration
fn cmd_config(config: &Config, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Text => print!("{}", serde_yaml::to_string(config)?),
    }
    Ok(())
}

/// Show logs
fn cmd_logs(follow: bool, lines: usize) -> Result<()> {
    let log_path = get_log_path();

    if !log_path.exists() {
        println!("No log file found at: {}", log_path.display());
        println!("The daemon may not have been started yet.");
        return Ok(());
    }

    if follow {
        println!("Following log file: {} (Ctrl+C to stop)", log_path.display());
        println!();

        // Use tail -f for following
        let mut child = std::process::Command::new("tail")
            .args(["-f", "-n", &lines.to_string()])
            .arg(&log_path)
            .spawn()
            .context("Failed to run tail -f")?;

        child.wait()?;
    } else {
        // Read last N lines
        let file = fs::File::open(&log_path).context("Failed to open log file")?;
        let reader = BufReader::new(file);
        let all_lines: Vec<String> = reader.lines().map_while(Result::ok).collect();

        let start = if all_lines.len() > lines { all_lines.len() - lines } else { 0 };

        for line in &all_lines[start..] {
            println!("{}", line);
        }
    }

    Ok(())
}
