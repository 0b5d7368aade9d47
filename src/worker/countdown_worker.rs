//! The countdown worker actor

use futures::stream::{SelectAll, StreamExt};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::{
    protocol::{Command, Notification},
    state::CountdownState,
};
use super::{Countdown, Firing, RestartPolicy, WorkerConfig};

/// Background worker that owns at most one cancellable countdown.
///
/// Every command and every firing is handled on the single task running
/// [`CountdownWorker::run`], so a cancelled countdown never fires again.
#[derive(Debug)]
pub struct CountdownWorker {
    config: WorkerConfig,
    outbound: mpsc::UnboundedSender<Notification>,
    /// The countdown "stop" cancels
    active: Option<Countdown>,
    /// Countdowns overwritten by a later "start"; they run to completion
    detached: SelectAll<Countdown>,
    state_tx: watch::Sender<CountdownState>,
}

impl CountdownWorker {
    /// Create an idle worker posting notifications to `outbound`
    pub fn new(config: WorkerConfig, outbound: mpsc::UnboundedSender<Notification>) -> Self {
        let (state_tx, _) = watch::channel(CountdownState::new());

        Self {
            config,
            outbound,
            active: None,
            detached: SelectAll::new(),
            state_tx,
        }
    }

    /// Watch the state of the active countdown
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.state_tx.subscribe()
    }

    /// Current state of the active countdown
    pub fn state(&self) -> CountdownState {
        *self.state_tx.borrow()
    }

    pub fn is_counting(&self) -> bool {
        self.active.is_some()
    }

    /// Number of overwritten countdowns still running
    pub fn detached_count(&self) -> usize {
        self.detached.len()
    }

    /// Apply one inbound command
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Start { duration } => self.start(duration),
            Command::Stop => self.stop(),
            Command::Unknown(event) => {
                debug!("Ignoring unknown event type: {:?}", event);
            }
        }
    }

    fn start(&mut self, duration: f64) {
        if let Some(previous) = self.active.take() {
            match self.config.restart_policy {
                RestartPolicy::Overwrite => {
                    debug!("Detaching running countdown of {}s", previous.duration());
                    self.detached.push(previous);
                }
                RestartPolicy::Replace => {
                    debug!("Cancelling running countdown of {}s", previous.duration());
                }
            }
        }

        info!("Starting countdown for {}s", duration);
        self.active = Some(Countdown::start(duration, self.config.period));
        self.state_tx.send_replace(CountdownState::started(duration));
    }

    fn stop(&mut self) {
        match self.active.take() {
            Some(countdown) => {
                info!("Countdown of {}s cancelled", countdown.duration());
                self.state_tx.send_replace(CountdownState::Idle);
            }
            None => debug!("Stop received while idle"),
        }
    }

    /// Record a firing of the active countdown and forward it
    fn on_active_firing(&mut self, firing: Firing) -> bool {
        match firing.notification {
            Notification::Tick => {
                let duration = self.active.as_ref().map(Countdown::duration).unwrap_or(f64::NAN);
                self.state_tx.send_replace(CountdownState::Counting {
                    elapsed: firing.elapsed,
                    duration,
                });
            }
            Notification::Stop => {
                info!("Countdown completed after {} ticks", firing.elapsed);
                self.active = None;
                self.state_tx.send_replace(CountdownState::Idle);
            }
        }

        self.post(firing.notification)
    }

    fn post(&self, notification: Notification) -> bool {
        debug!("Posting {}", notification);
        if self.outbound.send(notification).is_err() {
            warn!("Notification receiver dropped, shutting down worker");
            return false;
        }
        true
    }

    /// Drive the worker until its inbound channel closes and every pending
    /// countdown has finished, or until the host drops its notification
    /// receiver.
    pub async fn run(mut self, mut inbound: mpsc::UnboundedReceiver<Command>) {
        debug!("Countdown worker started");
        let mut inbound_open = true;

        loop {
            if !inbound_open && self.active.is_none() && self.detached.is_empty() {
                break;
            }

            let keep_running = tokio::select! {
                command = inbound.recv(), if inbound_open => {
                    match command {
                        Some(command) => self.handle(command),
                        None => {
                            debug!("Inbound channel closed, draining pending countdowns");
                            inbound_open = false;
                        }
                    }
                    true
                }
                Some(firing) = next_firing(&mut self.active) => {
                    self.on_active_firing(firing)
                }
                firing = self.detached.next(), if !self.detached.is_empty() => {
                    match firing {
                        Some(firing) => self.post(firing.notification),
                        // every detached countdown has ended; re-check the exit condition
                        None => true,
                    }
                }
            };

            if !keep_running {
                break;
            }
        }

        debug!("Countdown worker finished");
    }
}

/// Next firing of the active countdown; pending forever while idle
async fn next_firing(active: &mut Option<Countdown>) -> Option<Firing> {
    match active {
        Some(countdown) => countdown.next().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker(policy: RestartPolicy) -> (CountdownWorker, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let config = WorkerConfig::default().with_restart_policy(policy);
        (CountdownWorker::new(config, tx), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_state_transitions() {
        let (mut worker, _rx) = worker(RestartPolicy::Overwrite);
        assert_eq!(worker.state(), CountdownState::Idle);

        worker.handle(Command::start(4));
        assert!(worker.is_counting());
        assert_eq!(worker.state(), CountdownState::started(4.0));

        worker.handle(Command::Unknown("pause".to_string()));
        assert_eq!(worker.state(), CountdownState::started(4.0));

        worker.handle(Command::Stop);
        assert!(!worker.is_counting());
        assert_eq!(worker.state(), CountdownState::Idle);

        // stopping an idle worker is harmless
        worker.handle(Command::Stop);
        assert_eq!(worker.state(), CountdownState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_policies() {
        let (mut overwrite, _rx) = worker(RestartPolicy::Overwrite);
        overwrite.handle(Command::start(3));
        overwrite.handle(Command::start(5));
        assert_eq!(overwrite.detached_count(), 1);
        assert_eq!(overwrite.state(), CountdownState::started(5.0));

        let (mut replace, _rx) = worker(RestartPolicy::Replace);
        replace.handle(Command::start(3));
        replace.handle(Command::start(5));
        assert_eq!(replace.detached_count(), 0);
        assert_eq!(replace.state(), CountdownState::started(5.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_ends_when_receiver_dropped() {
        let (worker, rx) = worker(RestartPolicy::Overwrite);
        let (commands, inbound) = mpsc::unbounded_channel();
        drop(rx);

        commands.send(Command::start(10)).unwrap();
        // the first tick cannot be delivered, so the worker gives up
        worker.run(inbound).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_drains_after_inbound_closes() {
        let (worker, mut rx) = worker(RestartPolicy::Overwrite);
        let (commands, inbound) = mpsc::unbounded_channel();

        commands.send(Command::start(2)).unwrap();
        drop(commands);
        worker.run(inbound).await;

        assert_eq!(rx.recv().await, Some(Notification::Tick));
        assert_eq!(rx.recv().await, Some(Notification::Stop));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_ends_when_detached_countdown_outlives_active() {
        let (worker, mut rx) = worker(RestartPolicy::Overwrite);
        let (commands, inbound) = mpsc::unbounded_channel();

        commands.send(Command::start(5)).unwrap();
        commands.send(Command::start(1)).unwrap();
        drop(commands);

        let finished = tokio::time::timeout(std::time::Duration::from_secs(60), worker.run(inbound)).await;
        assert!(finished.is_ok(), "worker kept running after every countdown ended");

        let mut received = Vec::new();
        while let Some(notification) = rx.recv().await {
            received.push(notification);
        }
        // both countdowns fire at the same instants, so only the totals are fixed
        let ticks = received.iter().filter(|n| **n == Notification::Tick).count();
        let stops = received.iter().filter(|n| **n == Notification::Stop).count();
        assert_eq!((ticks, stops), (4, 2));
        assert_eq!(received.last(), Some(&Notification::Stop));
    }
}
