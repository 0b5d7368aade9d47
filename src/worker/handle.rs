//! Host-side handle to a spawned countdown worker

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, error};

use crate::{
    protocol::{Command, Notification, ProtocolError},
    state::CountdownState,
};
use super::{CountdownWorker, WorkerConfig};

/// Handle owned by the host of a worker running on its own task
#[derive(Debug)]
pub struct WorkerHandle {
    commands: Option<mpsc::UnboundedSender<Command>>,
    state_rx: watch::Receiver<CountdownState>,
    task: JoinHandle<()>,
}

/// Spawn a worker on the current runtime.
///
/// Returns the handle used to post commands and the receiver the worker posts
/// notifications to.
pub fn spawn_worker(config: WorkerConfig) -> (WorkerHandle, mpsc::UnboundedReceiver<Notification>) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (notification_tx, notification_rx) = mpsc::unbounded_channel();

    let worker = CountdownWorker::new(config, notification_tx);
    let state_rx = worker.subscribe();
    let task = tokio::spawn(worker.run(command_rx));

    let handle = WorkerHandle {
        commands: Some(command_tx),
        state_rx,
        task,
    };
    (handle, notification_rx)
}

impl WorkerHandle {
    /// Post a command; silently dropped once the worker is gone or closed
    pub fn post(&self, command: Command) {
        let Some(commands) = &self.commands else {
            debug!("Dropping {:?}: worker inbound is closed", command.event_type());
            return;
        };
        if let Err(e) = commands.send(command) {
            debug!("Dropping {:?}: worker has exited", e.0.event_type());
        }
    }

    /// Decode a JSON frame and post it
    pub fn post_message(&self, frame: &str) -> Result<(), ProtocolError> {
        let command = Command::decode(frame)?;
        self.post(command);
        Ok(())
    }

    /// Current state of the worker's active countdown
    pub fn state(&self) -> CountdownState {
        *self.state_rx.borrow()
    }

    /// Watch the state of the worker's active countdown
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.state_rx.clone()
    }

    /// Close the inbound side; pending countdowns still run to completion
    pub fn close(&mut self) {
        if self.commands.take().is_some() {
            debug!("Closing worker inbound channel");
        }
    }

    /// Close the inbound side and wait for the worker to finish
    pub async fn join(mut self) {
        self.close();
        if let Err(e) = self.task.await {
            if !e.is_cancelled() {
                error!("Countdown worker task failed: {}", e);
            }
        }
    }

    /// Stop the worker immediately, discarding any pending countdown
    pub fn terminate(self) {
        debug!("Terminating countdown worker");
        self.task.abort();
    }
}
