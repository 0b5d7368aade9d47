//! Countdown Worker - A background countdown timer decoupled from its host
//! 
//! A worker receives `["start", seconds]` and `["stop"]` commands, posts a
//! `"tick"` once per second while counting, and a single `"stop"` when the
//! countdown completes. Workers run on their own task and can be hosted over
//! stdio or over WebSocket connections.

pub mod config;
pub mod protocol;
pub mod state;
pub mod worker;
pub mod host;
pub mod api;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use protocol::{Command, Notification};
pub use worker::{spawn_worker, CountdownWorker, RestartPolicy, WorkerConfig, WorkerHandle};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
