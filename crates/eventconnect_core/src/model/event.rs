//! Event domain model.
//!
//! # Responsibility
//! - Define the canonical event record and the draft used to create one.
//! - Validate record-level invariants shared by write and read paths.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another event.
//! - `date` is always canonical `YYYY-MM-DD`.
//! - Coordinates are a single optional pair; one side never exists alone.
//! - Only `is_participating` changes after creation.

use crate::geo::Coordinates;
use crate::validation::parse_canonical_date;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned integer identity.
pub type EventId = i64;

/// Category applied when a draft carries none.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Filter value meaning "no category filter". Never stored.
pub const CATEGORY_ALL: &str = "All";

/// Categories offered by the create form.
///
/// Advisory only: the store accepts any non-blank category.
pub const CATEGORIES: &[&str] = &["Music", "Theatre", "Sport", "Conference", DEFAULT_CATEGORY];

/// Record-level invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// Title is empty or whitespace only.
    BlankTitle,
    /// Date is not canonical `YYYY-MM-DD`.
    MalformedDate(String),
    /// Category is an empty string.
    BlankCategory,
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "event title cannot be blank"),
            Self::MalformedDate(value) => {
                write!(f, "event date `{value}` is not in YYYY-MM-DD form")
            }
            Self::BlankCategory => write!(f, "event category cannot be blank"),
        }
    }
}

impl Error for EventValidationError {}

/// Canonical stored event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Canonical `YYYY-MM-DD`; lexical order is chronological order.
    pub date: String,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Opaque reference to externally-owned image data.
    pub image_uri: Option<String>,
    pub category: String,
    pub coordinates: Option<Coordinates>,
    pub is_participating: bool,
}

impl Event {
    /// Checks record-level invariants.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        validate_fields(&self.title, &self.date, Some(self.category.as_str()))
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.category == category
    }
}

/// Input for creating an event; the store assigns `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_uri: Option<String>,
    /// `None` falls back to [`DEFAULT_CATEGORY`].
    pub category: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl EventDraft {
    /// Creates a draft with only the required fields set.
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates::new(latitude, longitude));
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Category that will be stored for this draft.
    pub fn effective_category(&self) -> &str {
        match self.category.as_deref() {
            Some(category) if !category.trim().is_empty() => category,
            _ => DEFAULT_CATEGORY,
        }
    }

    /// Checks the invariants the stored record will have to satisfy.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        validate_fields(&self.title, &self.date, None)
    }
}

fn validate_fields(
    title: &str,
    date: &str,
    category: Option<&str>,
) -> Result<(), EventValidationError> {
    if title.trim().is_empty() {
        return Err(EventValidationError::BlankTitle);
    }
    if parse_canonical_date(date).is_none() {
        return Err(EventValidationError::MalformedDate(date.to_string()));
    }
    if matches!(category, Some(value) if value.trim().is_empty()) {
        return Err(EventValidationError::BlankCategory);
    }
    Ok(())
}
