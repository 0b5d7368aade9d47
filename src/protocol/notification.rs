//! Outbound notifications posted by the worker

use serde::{Deserialize, Serialize};

/// Notification sent from a worker back to its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notification {
    /// One period elapsed and the countdown has not reached its duration yet
    Tick,
    /// The countdown reached its duration
    Stop,
}

impl Notification {
    /// The bare event name carried on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Notification::Tick => "tick",
            Notification::Stop => "stop",
        }
    }

    /// Encode as a JSON frame (a bare JSON string)
    pub fn encode(&self) -> String {
        serde_json::Value::from(self.as_str()).to_string()
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
