//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::worker::{RestartPolicy, WorkerConfig};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-worker")]
#[command(about = "A background countdown worker that ticks once per second")]
#[command(version)]
pub struct Config {
    /// Serve workers over WebSocket instead of reading commands from stdin
    #[arg(long)]
    pub serve: bool,

    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Milliseconds between two firings of a countdown
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// What a "start" does to a countdown that is already running
    #[arg(long, value_enum, default_value = "overwrite")]
    pub restart_policy: RestartPolicy,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the configuration handed to every worker
    pub fn worker_config(&self) -> WorkerConfig {
        WorkerConfig::new(Duration::from_millis(self.tick_ms), self.restart_policy)
    }
}
