//! Command-line interface for signtype
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

/// Sign-language typing from hand landmarks
#[derive(Parser, Debug)]
#[command(name = "signtype", version, about = "Sign-language typing from hand landmarks")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress status messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the scoring model resource
    #[arg(long, global = true, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Path to the newline-delimited label table
    #[arg(long, global = true, value_name = "PATH")]
    pub labels: Option<PathBuf>,

    /// Minimum confidence (percent) required to type a symbol
    #[arg(long, value_name = "PERCENT")]
    pub min_confidence: Option<f32>,

    /// Minimum gap between typed symbols. Examples: 1s, 500ms
    #[arg(long, value_name = "DURATION", value_parser = parse_duration_arg)]
    pub cooldown: Option<Duration>,

    /// Delay between replayed frames. Examples: 33ms, 100ms, 0ms
    #[arg(long, value_name = "DURATION", default_value = "33ms", value_parser = parse_duration_arg)]
    pub interval: Duration,

    /// Recorded landmark stream (JSON lines; default: stdin)
    #[arg(value_name = "FRAMES")]
    pub input: Option<PathBuf>,
}

/// Parse a duration string like "500ms" or "1s". Bare numbers are
/// milliseconds.
fn parse_duration_arg(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if let Ok(ms) = s.parse::<u64>() {
        return Ok(Duration::from_millis(ms));
    }
    humantime::parse_duration(s).map_err(|e| e.to_string())
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate that the model and label table load and agree in shape
    Check,

    /// Print the loaded label table with score indices
    Labels,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_duration_accepts_bare_millis() {
        assert_eq!(parse_duration_arg("250"), Ok(Duration::from_millis(250)));
    }

    #[test]
    fn parse_duration_accepts_humantime() {
        assert_eq!(parse_duration_arg("1s"), Ok(Duration::from_secs(1)));
        assert_eq!(parse_duration_arg("33ms"), Ok(Duration::from_millis(33)));
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert!(parse_duration_arg("soon").is_err());
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::parse_from([
            "signtype",
            "--min-confidence",
            "90",
            "--cooldown",
            "500ms",
            "frames.jsonl",
        ]);
        assert!(cli.command.is_none());
        assert_eq!(cli.min_confidence, Some(90.0));
        assert_eq!(cli.cooldown, Some(Duration::from_millis(500)));
        assert_eq!(cli.input, Some(PathBuf::from("frames.jsonl")));
    }

    #[test]
    fn check_subcommand_parses() {
        let cli = Cli::parse_from(["signtype", "check", "--model", "m.safetensors"]);
        assert!(matches!(cli.command, Some(Commands::Check)));
        assert_eq!(cli.model, Some(PathBuf::from("m.safetensors")));
    }
}
