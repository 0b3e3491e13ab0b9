//! Participation use-case service.
//!
//! # Responsibility
//! - Toggle or set the participation flag of one event.
//!
//! # Invariants
//! - Holds no state of its own; the store is the only source of truth.
//! - Unknown ids surface as `StoreError::NotFound`.

use crate::model::event::{Event, EventId};
use crate::store::event_store::{EventStore, StoreResult};
use log::info;
use std::sync::Arc;

pub struct ParticipationService {
    store: Arc<EventStore>,
}

impl ParticipationService {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// Sets participation explicitly and returns the refreshed record.
    pub fn set(&self, id: EventId, participating: bool) -> StoreResult<Event> {
        self.store.set_participation(id, participating)
    }

    /// Flips participation atomically and returns the refreshed record.
    ///
    /// # Errors
    /// - `NotFound` when `id` does not exist.
    /// - `Storage` on SQLite failure.
    pub fn toggle(&self, id: EventId) -> StoreResult<Event> {
        let updated = self.store.toggle_participation(id)?;
        info!(
            "event=participation_toggle module=service status=ok event_id={} participating={}",
            id, updated.is_participating
        );
        Ok(updated)
    }
}
