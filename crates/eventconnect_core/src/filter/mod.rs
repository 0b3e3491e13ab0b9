//! Display-list projection over the live event list.
//!
//! # Responsibility
//! - Derive the list shown to the user from category and proximity filters.
//!
//! # Invariants
//! - Projection is pure and recomputed from the full list on every change.
//! - Output keeps the input order (`date ASC, id ASC`).
//!
//! # Proximity policy
//! The default [`ProximityMode::FallbackWhenEmpty`] ignores the location
//! filter when no event lies inside the radius, so "nothing nearby" renders
//! like "no location filter". [`ProximityMode::Strict`] and
//! [`project_with_outcome`] let callers show an explicit empty state instead.

pub mod projection;

pub use projection::{
    project, project_with_outcome, CategoryFilter, Projection, ProjectionOutcome,
    ProjectionQuery, ProximityMode, DEFAULT_RADIUS_KM,
};
