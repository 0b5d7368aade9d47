//! Wire protocol module
//! 
//! This module contains the inbound command and outbound notification types
//! exchanged between a host and a countdown worker, and their JSON codec.

pub mod command;
pub mod notification;

// Re-export main types
pub use command::{Command, ProtocolError};
pub use notification::Notification;
