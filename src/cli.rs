//! Command-line argument parsing for the replay binary
//!
//! Supports:
//! - Replaying a scenario file
//! - Overriding the config file location
//! - Pretty or compact JSON output

use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigError, KeysendConfig};

/// Replay keyboard shortcuts against the send pane
#[derive(Parser, Debug)]
#[command(name = "keysend", version, about = "Replay send-pane shortcuts")]
pub struct CliArgs {
    /// Scenario file (YAML) to replay
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Read config from this file instead of the user config directory
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(short = 'p', long)]
    pub pretty: bool,

    /// Only log to stderr
    #[arg(long)]
    pub no_log_file: bool,
}

impl CliArgs {
    /// Config from `--config`, or the user config with defaults as fallback
    pub fn load_config(&self) -> Result<KeysendConfig, ConfigError> {
        match &self.config {
            Some(path) => KeysendConfig::load_from(path),
            None => Ok(KeysendConfig::load()),
        }
    }
}
