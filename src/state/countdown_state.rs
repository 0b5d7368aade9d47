//! Countdown state structure

use serde::Serialize;

/// Observable state of a worker's active countdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CountdownState {
    /// No countdown the worker can cancel
    Idle,
    /// Counting towards `duration`, `elapsed` whole periods so far
    Counting { elapsed: u64, duration: f64 },
}

impl CountdownState {
    /// Create an idle state
    pub fn new() -> Self {
        CountdownState::Idle
    }

    /// Create the state of a freshly started countdown
    pub fn started(duration: f64) -> Self {
        CountdownState::Counting { elapsed: 0, duration }
    }

    /// Check if a countdown is active
    pub fn is_counting(&self) -> bool {
        matches!(self, CountdownState::Counting { .. })
    }

    /// Elapsed periods if counting
    pub fn elapsed(&self) -> Option<u64> {
        match self {
            CountdownState::Counting { elapsed, .. } => Some(*elapsed),
            CountdownState::Idle => None,
        }
    }

    /// Periods left before the stop notification, if counting.
    ///
    /// Zero for durations that complete on the next firing, including NaN.
    pub fn remaining(&self) -> Option<u64> {
        match self {
            CountdownState::Counting { elapsed, duration } => {
                let left = (duration - *elapsed as f64).ceil();
                Some(if left > 0.0 { left as u64 } else { 0 })
            }
            CountdownState::Idle => None,
        }
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining() {
        assert_eq!(CountdownState::Idle.remaining(), None);
        assert_eq!(CountdownState::started(5.0).remaining(), Some(5));
        assert_eq!(
            CountdownState::Counting { elapsed: 2, duration: 2.5 }.remaining(),
            Some(1)
        );
        assert_eq!(CountdownState::started(-3.0).remaining(), Some(0));
        assert_eq!(CountdownState::started(f64::NAN).remaining(), Some(0));
    }

    #[test]
    fn test_serialized_shape() {
        let idle = serde_json::to_value(CountdownState::Idle).unwrap();
        assert_eq!(idle, serde_json::json!({ "state": "idle" }));

        let counting = serde_json::to_value(CountdownState::Counting { elapsed: 1, duration: 3.0 }).unwrap();
        assert_eq!(
            counting,
            serde_json::json!({ "state": "counting", "elapsed": 1, "duration": 3.0 })
        );
    }
}
