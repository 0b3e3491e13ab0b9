//! Core domain logic for EventConnect.
//! This crate is the single source of truth for event catalog invariants.

pub mod config;
pub mod db;
pub mod filter;
pub mod geo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod validation;

pub use config::{ConfigError, CoreConfig};
pub use filter::{
    project, project_with_outcome, CategoryFilter, Projection, ProjectionOutcome,
    ProjectionQuery, ProximityMode, DEFAULT_RADIUS_KM,
};
pub use geo::{distance_km, Coordinates};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{
    Event, EventDraft, EventId, EventValidationError, CATEGORIES, CATEGORY_ALL, DEFAULT_CATEGORY,
};
pub use repo::event_repo::{EventRepository, RepoError, RepoResult, SqliteEventRepository};
pub use service::participation_service::ParticipationService;
pub use store::event_store::{EventStore, StoreError, StoreResult};
pub use store::subscription::{EventSnapshot, EventSubscription};
pub use validation::{
    today_local, validate_and_normalize_date, validate_form, validate_title, Field, FormErrors,
    FormInput, PickedDate, ValidatedForm, ValidationError,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
