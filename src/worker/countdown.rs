//! A single countdown run as a stream of firings

use std::{
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};
use futures::stream::{self, Stream, StreamExt};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::protocol::Notification;

/// One firing of a countdown's interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Firing {
    /// Periods elapsed since the countdown started, including this one
    pub elapsed: u64,
    pub notification: Notification,
}

/// A countdown from zero towards `duration`, firing once per period.
///
/// Yields a `Tick` for every firing while `elapsed < duration`, then a single
/// `Stop` and ends. Dropping the stream cancels the countdown.
pub struct Countdown {
    duration: f64,
    firings: Pin<Box<dyn Stream<Item = Firing> + Send>>,
}

impl Countdown {
    /// Arm a countdown; the first firing is one period from now
    pub fn start(duration: f64, period: Duration) -> Self {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let firings = stream::unfold(Some((ticker, 0u64)), move |state| async move {
            let Some((mut ticker, elapsed)) = state else {
                return None;
            };
            ticker.tick().await;

            let elapsed = elapsed + 1;
            // NaN never compares less, so bad durations stop on the first firing
            if (elapsed as f64) < duration {
                let firing = Firing { elapsed, notification: Notification::Tick };
                Some((firing, Some((ticker, elapsed))))
            } else {
                let firing = Firing { elapsed, notification: Notification::Stop };
                Some((firing, None))
            }
        });

        Self {
            duration,
            firings: firings.boxed(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }
}

impl Stream for Countdown {
    type Item = Firing;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Firing>> {
        self.firings.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Countdown")
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}
