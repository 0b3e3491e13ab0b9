//! Domain model for the event catalog.
//!
//! # Responsibility
//! - Define the canonical event record and its creation draft.
//!
//! # Invariants
//! - Every event is identified by a store-assigned, never-reused `EventId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod event;
