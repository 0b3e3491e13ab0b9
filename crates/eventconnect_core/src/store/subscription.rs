//! Live event-list subscriptions.
//!
//! # Responsibility
//! - Hand every subscriber the latest committed event list.
//!
//! # Invariants
//! - The first emission of a subscription is the state at subscribe time.
//! - A subscriber that falls behind only keeps the newest snapshot.
//! - Emissions on one subscription never go back to an older commit.

use crate::model::event::Event;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Immutable full-state list, ordered by `date ASC, id ASC`.
pub type EventSnapshot = Arc<[Event]>;

/// Handle on the store's live event list.
///
/// Dropping the handle unsubscribes.
#[derive(Debug)]
pub struct EventSubscription {
    rx: watch::Receiver<EventSnapshot>,
    initial_pending: bool,
}

impl EventSubscription {
    pub(crate) fn new(rx: watch::Receiver<EventSnapshot>) -> Self {
        Self {
            rx,
            initial_pending: true,
        }
    }

    /// Latest published snapshot, without consuming a pending emission.
    pub fn current(&self) -> EventSnapshot {
        Arc::clone(&self.rx.borrow())
    }

    /// Waits for the next emission.
    ///
    /// Resolves immediately on the first call. Returns `None` once the
    /// store has been dropped.
    pub async fn next(&mut self) -> Option<EventSnapshot> {
        if self.initial_pending {
            self.initial_pending = false;
            return Some(self.take_latest());
        }

        self.rx.changed().await.ok()?;
        Some(self.take_latest())
    }

    /// Returns the next emission if one is ready, without waiting.
    pub fn try_next(&mut self) -> Option<EventSnapshot> {
        if self.initial_pending {
            self.initial_pending = false;
            return Some(self.take_latest());
        }

        match self.rx.has_changed() {
            Ok(true) => Some(self.take_latest()),
            _ => None,
        }
    }

    /// Converts the subscription into a `Stream` of snapshots.
    ///
    /// The stream continues where the subscription stopped: it starts with
    /// the current snapshot only if that one was not yet emitted. It ends
    /// when the store is dropped.
    pub fn into_stream(self) -> WatchStream<EventSnapshot> {
        if self.initial_pending {
            WatchStream::new(self.rx)
        } else {
            WatchStream::from_changes(self.rx)
        }
    }

    fn take_latest(&mut self) -> EventSnapshot {
        Arc::clone(&self.rx.borrow_and_update())
    }
}
