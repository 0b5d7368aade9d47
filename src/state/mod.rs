//! State management module
//! 
//! This module contains the observable countdown state and the shared state
//! of the WebSocket host.

pub mod app_state;
pub mod countdown_state;

// Re-export main types
pub use app_state::AppState;
pub use countdown_state::CountdownState;
