//! Shared state of the WebSocket host

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Instant,
};
use tracing::debug;

use crate::worker::WorkerConfig;

/// State shared by every WebSocket connection
#[derive(Debug)]
pub struct AppState {
    /// Configuration handed to each connection's worker
    pub worker_config: WorkerConfig,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Number of connected hosts, each owning one worker
    active_connections: AtomicUsize,
}

impl AppState {
    /// Create a new AppState with no connections
    pub fn new(port: u16, host: String, worker_config: WorkerConfig) -> Self {
        Self {
            worker_config,
            start_time: Instant::now(),
            port,
            host,
            active_connections: AtomicUsize::new(0),
        }
    }

    /// Record a new connection, returning the updated count
    pub fn connection_opened(&self) -> usize {
        let count = self.active_connections.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Worker connection opened ({} active)", count);
        count
    }

    /// Record a closed connection, returning the updated count
    pub fn connection_closed(&self) -> usize {
        let count = self.active_connections.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
        debug!("Worker connection closed ({} active)", count);
        count
    }

    pub fn active_connections(&self) -> usize {
        self.active_connections.load(Ordering::SeqCst)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;
        
        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_counting() {
        let state = AppState::new(20554, "127.0.0.1".to_string(), WorkerConfig::default());
        assert_eq!(state.connection_opened(), 1);
        assert_eq!(state.connection_opened(), 2);
        assert_eq!(state.connection_closed(), 1);
        assert_eq!(state.active_connections(), 1);
    }

    #[test]
    fn test_fresh_uptime() {
        let state = AppState::new(20554, "127.0.0.1".to_string(), WorkerConfig::default());
        assert_eq!(state.get_uptime(), "0s");
    }
}
