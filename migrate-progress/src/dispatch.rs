//! Event channel plumbing between the migration engine and the tracker.
//!
//! The tracker's counters are unsynchronized by design; routing all events
//! through a bounded single-consumer channel serializes delivery even when the
//! producing side is concurrent. Dropping every [`EventTx`] detaches the
//! tracker and ends its run loop.

use tokio::sync::mpsc;

use crate::events::MigrationEvent;

/// Sending half of the migration event channel.
pub type EventTx = mpsc::Sender<MigrationEvent>;

/// Receiving half of the migration event channel.
pub type EventRx = mpsc::Receiver<MigrationEvent>;

/// Creates a new bounded pair of [`EventTx`] and [`EventRx`].
pub fn create_event_channel(capacity: usize) -> (EventTx, EventRx) {
    mpsc::channel(capacity)
}
