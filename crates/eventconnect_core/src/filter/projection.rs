//! Category and proximity projection of the event list.
//!
//! # Responsibility
//! - Build the display list from the full list and a `ProjectionQuery`.
//!
//! # Invariants
//! - The radius test is inclusive (`distance <= radius_km`).
//! - Events without coordinates never match a proximity filter.
//! - Output is a subsequence of the input in the same order.

use crate::geo::Coordinates;
use crate::model::event::{Event, CATEGORY_ALL};

/// Radius used by the "events near me" view.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Category part of a projection query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Maps the UI selection to a filter; `"All"` disables filtering.
    pub fn parse(value: &str) -> Self {
        if value == CATEGORY_ALL {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    fn selected(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(category) => Some(category.as_str()),
        }
    }
}

/// How an empty proximity result is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProximityMode {
    /// Empty proximity result falls back to ignoring the location.
    #[default]
    FallbackWhenEmpty,
    /// Empty proximity result yields an empty list.
    Strict,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionQuery {
    pub category: CategoryFilter,
    /// Reference location; `None` disables the proximity filter.
    pub origin: Option<Coordinates>,
    pub radius_km: f64,
    pub proximity: ProximityMode,
}

impl Default for ProjectionQuery {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            origin: None,
            radius_km: DEFAULT_RADIUS_KM,
            proximity: ProximityMode::FallbackWhenEmpty,
        }
    }
}

impl ProjectionQuery {
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn near(mut self, origin: Coordinates, radius_km: f64) -> Self {
        self.origin = Some(origin);
        self.radius_km = radius_km;
        self
    }

    pub fn strict(mut self) -> Self {
        self.proximity = ProximityMode::Strict;
        self
    }
}

/// Which branch of the combination policy produced the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionOutcome {
    /// No filter was active.
    Unfiltered,
    /// Category match over the full list.
    CategoryOnly,
    /// Events inside the radius.
    Nearby,
    /// Events inside the radius with the selected category.
    NearbyInCategory,
    /// A location was set but no event lies inside the radius.
    NoNearbyEvents,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub events: Vec<Event>,
    pub outcome: ProjectionOutcome,
}

/// Derives the display list from the full list.
pub fn project(all: &[Event], query: &ProjectionQuery) -> Vec<Event> {
    project_with_outcome(all, query).events
}

/// Like [`project`], also reporting which policy branch applied.
///
/// Under `FallbackWhenEmpty`, `NoNearbyEvents` is reported whenever the
/// radius matched nothing, even though the returned list then ignores the
/// location.
pub fn project_with_outcome(all: &[Event], query: &ProjectionQuery) -> Projection {
    let nearby: Option<Vec<&Event>> = query.origin.map(|origin| {
        all.iter()
            .filter(|event| is_within(event, &origin, query.radius_km))
            .collect()
    });
    let nearby_hits = nearby.as_ref().filter(|events| !events.is_empty());
    let category = query.category.selected();

    let (events, outcome): (Vec<&Event>, ProjectionOutcome) =
        match (query.proximity, nearby_hits, category) {
            (_, Some(hits), Some(category)) => (
                hits.iter()
                    .copied()
                    .filter(|event| event.has_category(category))
                    .collect(),
                ProjectionOutcome::NearbyInCategory,
            ),
            (_, Some(hits), None) => (hits.clone(), ProjectionOutcome::Nearby),
            (ProximityMode::Strict, None, _) if nearby.is_some() => {
                (Vec::new(), ProjectionOutcome::NoNearbyEvents)
            }
            (_, None, Some(category)) => (
                all.iter()
                    .filter(|event| event.has_category(category))
                    .collect(),
                fallback_outcome(nearby.is_some(), ProjectionOutcome::CategoryOnly),
            ),
            (_, None, None) => (
                all.iter().collect(),
                fallback_outcome(nearby.is_some(), ProjectionOutcome::Unfiltered),
            ),
        };

    Projection {
        events: events.into_iter().cloned().collect(),
        outcome,
    }
}

fn is_within(event: &Event, origin: &Coordinates, radius_km: f64) -> bool {
    event
        .coordinates
        .is_some_and(|coordinates| origin.distance_km_to(&coordinates) <= radius_km)
}

fn fallback_outcome(had_origin: bool, otherwise: ProjectionOutcome) -> ProjectionOutcome {
    if had_origin {
        ProjectionOutcome::NoNearbyEvents
    } else {
        otherwise
    }
}
