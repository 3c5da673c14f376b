//! Delayed delivery of opponent tickets.
//!
//! The computer waits a moment before replying so its move is visible as a
//! separate step. Each scheduled reply is a tokio task that sleeps and then
//! hands the ticket back to the event loop over a channel. The event loop
//! owns all game state; the task only carries the ticket.

use crate::OpponentTicket;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Schedules at most one pending opponent move.
#[derive(Debug)]
pub struct OpponentScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<OpponentTicket>,
    pending: Option<JoinHandle<()>>,
}

impl OpponentScheduler {
    /// Creates a scheduler and the receiver its tickets arrive on.
    #[instrument]
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<OpponentTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            delay,
            tx,
            pending: None,
        };
        (scheduler, rx)
    }

    /// Delivers `ticket` after the delay, replacing any pending delivery.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self))]
    pub fn schedule(&mut self, ticket: OpponentTicket) {
        self.cancel();
        let tx = self.tx.clone();
        let delay = self.delay;
        debug!(delay_ms = delay.as_millis() as u64, "Scheduling opponent move");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(ticket).is_err() {
                debug!("Event loop gone, dropping opponent ticket");
            }
        }));
    }

    /// Aborts the pending delivery, if any.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            debug!("Cancelling pending opponent move");
            handle.abort();
        }
    }

    /// True while a delivery is still sleeping.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for OpponentScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
