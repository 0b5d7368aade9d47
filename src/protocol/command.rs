//! Inbound commands posted by the host

use serde_json::Value;
use thiserror::Error;

/// Errors raised while decoding an inbound frame
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("frame is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("frame is not an array: {0}")]
    NotAnArray(String),
}

/// Command sent from a host to a worker
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start a new countdown of `duration` seconds
    Start { duration: f64 },
    /// Cancel the active countdown
    Stop,
    /// Any other event type; handled as a no-op
    Unknown(String),
}

impl Command {
    /// Convenience constructor for a start command with a whole number of seconds
    pub fn start(seconds: u64) -> Self {
        Command::Start { duration: seconds as f64 }
    }

    /// Decode a JSON frame of the form `[eventType, duration]`
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(frame)?;
        Self::from_value(&value)
    }

    /// Decode an already parsed JSON value
    pub fn from_value(value: &Value) -> Result<Self, ProtocolError> {
        let items = value
            .as_array()
            .ok_or_else(|| ProtocolError::NotAnArray(value.to_string()))?;

        let command = match items.first() {
            Some(Value::String(event)) if event == "start" => Command::Start {
                duration: coerce_duration(items.get(1)),
            },
            Some(Value::String(event)) if event == "stop" => Command::Stop,
            Some(Value::String(event)) => Command::Unknown(event.clone()),
            Some(other) => Command::Unknown(other.to_string()),
            None => Command::Unknown(String::new()),
        };

        Ok(command)
    }

    /// The event name as received
    pub fn event_type(&self) -> &str {
        match self {
            Command::Start { .. } => "start",
            Command::Stop => "stop",
            Command::Unknown(event) => event,
        }
    }
}

/// Coerce a duration value to a number of seconds.
///
/// Missing or non-numeric values become NaN, which never compares below the
/// elapsed count, so such a countdown completes on its first firing.
pub fn coerce_duration(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(flag)) => if *flag { 1.0 } else { 0.0 },
        Some(Value::Number(number)) => number.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(text)) => {
            let text = text.trim();
            if text.is_empty() {
                0.0
            } else {
                text.parse().unwrap_or(f64::NAN)
            }
        }
        Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_start_and_stop() {
        assert_eq!(Command::decode(r#"["start", 5]"#).unwrap(), Command::start(5));
        assert_eq!(Command::decode(r#"["stop"]"#).unwrap(), Command::Stop);
        // duration is ignored for stop
        assert_eq!(Command::decode(r#"["stop", 12]"#).unwrap(), Command::Stop);
    }

    #[test]
    fn test_decode_unknown_event_types() {
        assert_eq!(
            Command::decode(r#"["pause"]"#).unwrap(),
            Command::Unknown("pause".to_string())
        );
        assert_eq!(
            Command::decode("[42, 1]").unwrap(),
            Command::Unknown("42".to_string())
        );
        assert_eq!(Command::decode("[]").unwrap(), Command::Unknown(String::new()));
    }

    #[test]
    fn test_decode_rejects_malformed_frames() {
        assert!(matches!(
            Command::decode("start 5"),
            Err(ProtocolError::InvalidJson(_))
        ));
        assert!(matches!(
            Command::decode(r#"{"type": "start"}"#),
            Err(ProtocolError::NotAnArray(_))
        ));
        assert!(matches!(
            Command::decode(r#""stop""#),
            Err(ProtocolError::NotAnArray(_))
        ));
    }

    #[test]
    fn test_duration_coercion() {
        let duration = |frame: &str| match Command::decode(frame).unwrap() {
            Command::Start { duration } => duration,
            other => panic!("expected start, got {:?}", other),
        };

        assert_eq!(duration(r#"["start", 2.5]"#), 2.5);
        assert_eq!(duration(r#"["start", " 3 "]"#), 3.0);
        assert_eq!(duration(r#"["start", ""]"#), 0.0);
        assert_eq!(duration(r#"["start", null]"#), 0.0);
        assert_eq!(duration(r#"["start", true]"#), 1.0);
        assert_eq!(duration(r#"["start", -4]"#), -4.0);
        assert!(duration(r#"["start"]"#).is_nan());
        assert!(duration(r#"["start", "soon"]"#).is_nan());
        assert!(duration(r#"["start", {"seconds": 3}]"#).is_nan());
        // only decimal strings parse; arrays never coerce
        assert!(duration(r#"["start", "0x10"]"#).is_nan());
        assert!(duration(r#"["start", [3]]"#).is_nan());
    }

    #[test]
    fn test_event_type() {
        assert_eq!(Command::start(1).event_type(), "start");
        assert_eq!(Command::Stop.event_type(), "stop");
        assert_eq!(Command::Unknown("pause".into()).event_type(), "pause");
    }
}
