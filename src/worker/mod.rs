//! Countdown worker module
//! 
//! This module contains the countdown worker actor, the countdown stream it
//! drives, and the host-side handle used to talk to a spawned worker.

pub mod config;
pub mod countdown;
pub mod countdown_worker;
pub mod handle;

// Re-export main types
pub use config::{RestartPolicy, WorkerConfig};
pub use countdown::{Countdown, Firing};
pub use countdown_worker::CountdownWorker;
pub use handle::{spawn_worker, WorkerHandle};
