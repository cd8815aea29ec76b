//! Shared event bus
//!
//! A single bounded FIFO multiplexing every producer into one consumer
//! stream. Events are delivered in the order their `publish` calls became
//! visible to the queue; there is no priority lane.

use crate::error::{Error, Result};
use crate::event::Event;
use crossbeam_channel::{bounded, Receiver, Sender, SendTimeoutError, TrySendError};
use std::time::Duration;
use tracing::warn;

/// Behavior of a publisher when the bus is full
///
/// Input scanners should block (a lost button press is user-visible);
/// detection and UI producers may drop. The choice belongs to the hosting
/// code per producer, not to the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Wait up to the timeout for space, then fail with `QueueOverflow`
    Block {
        /// Upper bound on the wait; publishers never block indefinitely
        timeout: Duration,
    },

    /// Fail immediately with a logged `QueueOverflow`
    DropNewest,
}

/// The shared event bus
///
/// Created by the hosting process, which hands [`Publisher`] clones to its
/// producers and then converts the bus into the single consumer's receiver.
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl EventBus {
    /// Create a bus holding at most `capacity` undispatched events
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity);
        Self { tx, rx }
    }

    /// Create a producer handle with its own overflow policy
    pub fn publisher(&self, policy: OverflowPolicy) -> Publisher {
        Publisher {
            tx: self.tx.clone(),
            policy,
        }
    }

    /// Hand the receiving side to the single consumer
    ///
    /// Consumes the bus and with it the bus's own sender, so the consumer
    /// loop ends once every publisher has been dropped.
    pub fn into_receiver(self) -> BusReceiver {
        BusReceiver { rx: self.rx }
    }
}

/// Producer handle onto the bus
#[derive(Clone)]
pub struct Publisher {
    tx: Sender<Event>,
    policy: OverflowPolicy,
}

impl Publisher {
    /// Enqueue an event
    ///
    /// Never blocks the producer indefinitely: `Block` waits at most its
    /// timeout, `DropNewest` gives up immediately on a full queue.
    pub fn publish(&self, event: Event) -> Result<()> {
        match self.policy {
            OverflowPolicy::Block { timeout } => {
                self.tx.send_timeout(event, timeout).map_err(|err| match err {
                    SendTimeoutError::Timeout(event) => {
                        warn!(?event, "event bus full, publish timed out");
                        Error::QueueOverflow
                    }
                    SendTimeoutError::Disconnected(_) => Error::BusClosed,
                })
            }
            OverflowPolicy::DropNewest => self.tx.try_send(event).map_err(|err| match err {
                TrySendError::Full(event) => {
                    warn!(?event, "event bus full, dropping event");
                    Error::QueueOverflow
                }
                TrySendError::Disconnected(_) => Error::BusClosed,
            }),
        }
    }
}

/// Receiving side of the bus, owned by the single consumer
pub struct BusReceiver {
    rx: Receiver<Event>,
}

impl BusReceiver {
    /// Block until the next event is available
    ///
    /// Returns `None` only once every publisher has disconnected.
    pub fn receive(&self) -> Option<Event> {
        self.rx.recv().ok()
    }
}
