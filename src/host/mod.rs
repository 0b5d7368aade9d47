//! Host module
//! 
//! This module contains the stdio host, which plays the part of the main
//! thread for a single worker over line-delimited JSON.

pub mod stdio;

// Re-export main functions
pub use stdio::run_stdio_host;
