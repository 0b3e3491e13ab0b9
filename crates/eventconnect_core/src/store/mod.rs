//! Event store and live subscriptions.
//!
//! # Responsibility
//! - Own the durable event table and expose CRUD plus a live list feed.
//!
//! # Invariants
//! - One store instance per database; it is passed around explicitly.
//! - Every successful mutation publishes a full, ordered snapshot.

pub mod event_store;
pub mod subscription;
