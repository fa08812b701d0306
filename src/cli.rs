//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::persona::{BodyFocus, EncouragementStyle};

/// devpace - work/break pacing with AI encouragement
#[derive(Parser)]
#[command(
    name = "pace",
    about = "Work/break pacing daemon with AI-generated encouragement",
    version,
    after_help = "Logs are written to: ~/.local/share/devpace/logs/devpace.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Run the pacing session in the foreground
    Run {
        /// Request a stretch routine for this focus area on every break
        #[arg(long)]
        focus: Option<BodyFocus>,

        /// Override work minutes for this run
        #[arg(long, value_name = "MINUTES")]
        work: Option<u32>,

        /// Override break minutes for this run
        #[arg(long = "break", value_name = "MINUTES")]
        break_minutes: Option<u32>,
    },

    /// Start the pacing daemon in the background
    Start,

    /// Stop the running daemon
    Stop,

    /// Show daemon status
    Status {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Internal: Run as daemon process (used by `start`)
    #[command(hide = true)]
    RunDaemon,

    /// Set your pace preferences (name, durations, style)
    Setup,

    /// Preview a generated encouragement (and optionally a routine)
    Preview {
        /// Encouragement style to preview
        #[arg(short, long)]
        style: Option<EncouragementStyle>,

        /// Also preview a stretch routine for this focus area
        #[arg(short, long)]
        focus: Option<BodyFocus>,
    },

    /// Show the effective configuration
    Config {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show daemon logs
    Logs {
        /// Follow log output (like tail -f)
        #[arg(short, long)]
        follow: bool,

        /// Number of lines to show
        #[arg(short, long, default_value = "50")]
        lines: usize,
    },
}

/// Output format for status/config commands
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

/// Path to the log file
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("devpace")
        .join("logs")
        .join("devpace.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_format_parses() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn run_accepts_focus_and_overrides() {
        let cli = Cli::parse_from(["pace", "run", "--focus", "Wrists", "--work", "45", "--break", "5"]);
        match cli.command {
            Some(Command::Run {
                focus,
                work,
                break_minutes,
            }) => {
                assert_eq!(focus, Some(BodyFocus::Wrists));
                assert_eq!(work, Some(45));
                assert_eq!(break_minutes, Some(5));
            }
            _ => panic!("Expected run command"),
        }
    }

    #[test]
    fn preview_accepts_style_name() {
        let cli = Cli::parse_from(["pace", "preview", "--style", "Zen Master"]);
        match cli.command {
            Some(Command::Preview { style, focus }) => {
                assert_eq!(style, Some(EncouragementStyle::ZenMaster));
                assert_eq!(focus, None);
            }
            _ => panic!("Expected preview command"),
        }
    }
}
