//! Command line configuration.

use crate::timer::{DEFAULT_MINUTES, MAX_MINUTES, MIN_MINUTES};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// CLI arguments for the widget binary.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "binary-pomodoro")]
#[command(about = "A pomodoro timer that grows a binary Christmas tree in your terminal")]
#[command(version)]
pub struct Config {
    /// Countdown length in minutes (clamped to 1-60)
    #[arg(short, long, default_value_t = DEFAULT_MINUTES as i64, allow_negative_numbers = true)]
    pub minutes: i64,

    /// Disable mouse input (clicking buttons and dragging the widget)
    #[arg(long)]
    pub no_mouse: bool,

    /// Append log output to this file; logging is off without it
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// The requested duration, clamped to what the timer accepts.
    pub fn clamped_minutes(&self) -> u32 {
        self.minutes.clamp(MIN_MINUTES as i64, MAX_MINUTES as i64) as u32
    }

    /// Log level for the verbose flag.
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            minutes: DEFAULT_MINUTES as i64,
            no_mouse: false,
            log_file: None,
            verbose: false,
        }
    }
}
