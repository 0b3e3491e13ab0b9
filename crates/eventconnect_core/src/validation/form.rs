//! Create-form validation.
//!
//! # Invariants
//! - Title and date are validated independently; both errors may be set.
//! - A successful result only ever carries a normalized date.

use super::{validate_and_normalize_date, validate_title, Field, ValidationError};
use crate::geo::Coordinates;
use crate::model::event::EventDraft;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Calendar day picked in the form; `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickedDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Raw create-form submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub title: String,
    /// `None` when the user never picked a date.
    pub date: Option<PickedDate>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_uri: Option<String>,
    pub category: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// Per-field errors of a rejected submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub title: Option<ValidationError>,
    pub date: Option<ValidationError>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.date.is_none()
    }
}

impl Display for FormErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = [self.title.as_ref(), self.date.as_ref()]
            .into_iter()
            .flatten()
            .map(ToString::to_string)
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl Error for FormErrors {}

/// Accepted submission, ready to be turned into a store draft.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedForm {
    pub title: String,
    pub date: String,
    input: FormInput,
}

impl ValidatedForm {
    /// Builds the store draft, keeping optional fields as submitted.
    pub fn into_draft(self) -> EventDraft {
        let FormInput {
            location,
            description,
            image_uri,
            category,
            coordinates,
            ..
        } = self.input;

        EventDraft {
            title: self.title,
            date: self.date,
            location: non_blank(location),
            description: non_blank(description),
            image_uri,
            category,
            coordinates,
        }
    }
}

/// Validates a create-form submission against `reference` ("today").
///
/// # Errors
/// Returns `FormErrors` with every failing field filled in.
pub fn validate_form(input: &FormInput, reference: NaiveDate) -> Result<ValidatedForm, FormErrors> {
    let title_result = validate_title(&input.title);
    let date_result = match input.date {
        Some(picked) => validate_and_normalize_date(picked.year, picked.month, picked.day, reference),
        None => Err(ValidationError::RequiredField { field: Field::Date }),
    };

    match (title_result, date_result) {
        (Ok(()), Ok(date)) => Ok(ValidatedForm {
            title: input.title.trim().to_string(),
            date,
            input: input.clone(),
        }),
        (title, date) => Err(FormErrors {
            title: title.err(),
            date: date.err(),
        }),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{validate_form, FormInput, PickedDate};
    use crate::validation::{Field, ValidationError};
    use chrono::NaiveDate;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn reports_title_and_date_errors_together() {
        let input = FormInput {
            title: "  ".to_string(),
            date: None,
            ..FormInput::default()
        };

        let errors = validate_form(&input, reference()).unwrap_err();
        assert_eq!(
            errors.title,
            Some(ValidationError::RequiredField {
                field: Field::Title
            })
        );
        assert_eq!(
            errors.date,
            Some(ValidationError::RequiredField { field: Field::Date })
        );
    }

    #[test]
    fn past_date_is_reported_even_with_valid_title() {
        let input = FormInput {
            title: "Concert".to_string(),
            date: Some(PickedDate {
                year: 2024,
                month: 12,
                day: 31,
            }),
            ..FormInput::default()
        };

        let errors = validate_form(&input, reference()).unwrap_err();
        assert!(errors.title.is_none());
        assert!(matches!(errors.date, Some(ValidationError::PastDate { .. })));
    }

    #[test]
    fn accepted_form_builds_trimmed_draft() {
        let input = FormInput {
            title: "  Concert ".to_string(),
            date: Some(PickedDate {
                year: 2025,
                month: 7,
                day: 4,
            }),
            location: Some("   ".to_string()),
            category: Some("Music".to_string()),
            ..FormInput::default()
        };

        let draft = validate_form(&input, reference()).unwrap().into_draft();
        assert_eq!(draft.title, "Concert");
        assert_eq!(draft.date, "2025-07-04");
        assert_eq!(draft.location, None);
        assert_eq!(draft.category.as_deref(), Some("Music"));
    }
}
