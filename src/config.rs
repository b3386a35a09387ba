//! Configuration and CLI argument handling

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::{
    state::{DEFAULT_MAX_TICKS, DEFAULT_STORAGE_KEY},
    validation::ValidationRules,
};

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "exercise-counter")]
#[command(about = "Timed repeat counters for exercises, saved locally")]
#[command(version)]
pub struct Config {
    /// Directory the exercise list is stored in
    #[arg(short, long, default_value = ".exercise-counter")]
    pub data_dir: PathBuf,

    /// Name of the stored blob holding the exercise list
    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    pub storage_key: String,

    /// Keep everything in memory and never touch the disk
    #[arg(long)]
    pub in_memory: bool,

    /// Shortest interval an exercise may be saved with, in seconds
    #[arg(long, default_value_t = 1.5)]
    pub min_seconds: f64,

    /// Longest interval an exercise may be saved with, in seconds
    #[arg(long, default_value_t = 10.0)]
    pub max_seconds: f64,

    /// Ticks after which a run halts on its own
    #[arg(short = 't', long, default_value_t = DEFAULT_MAX_TICKS)]
    pub max_ticks: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Reject combinations the core cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.min_seconds.is_finite() && self.min_seconds > 0.0) {
            bail!("--min-seconds must be a positive number, got {}", self.min_seconds);
        }
        if !self.max_seconds.is_finite() || self.max_seconds < self.min_seconds {
            bail!(
                "--max-seconds ({}) must be at least --min-seconds ({})",
                self.max_seconds,
                self.min_seconds
            );
        }
        if self.max_ticks == 0 {
            bail!("--max-ticks must be at least 1");
        }
        Ok(())
    }

    /// Validation bounds for drafts
    pub fn rules(&self) -> ValidationRules {
        ValidationRules::new(self.min_seconds, self.max_seconds)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
