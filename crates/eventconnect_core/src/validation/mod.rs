//! Form input validation and date normalization.
//!
//! # Responsibility
//! - Validate create-form input before it reaches the store.
//! - Normalize picked calendar dates into canonical `YYYY-MM-DD` strings.
//!
//! # Invariants
//! - Functions here never read the clock; "today" is always injected.
//! - Form validation reports every failing field, never only the first one.
//! - Canonical dates are zero-padded, so lexical order equals chronological
//!   order.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod form;

pub use form::{validate_form, FormErrors, FormInput, PickedDate, ValidatedForm};

static CANONICAL_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid canonical date regex"));

/// Years that format as exactly four digits.
const CANONICAL_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Form field a validation error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Date,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Date => "date",
        }
    }
}

/// Field-level validation failure returned to the form caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is missing, empty or whitespace only.
    RequiredField { field: Field },
    /// Picked date is strictly before the reference day.
    PastDate { date: String, reference: String },
    /// Year/month/day do not form a real calendar date.
    InvalidDate { year: i32, month: u32, day: u32 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequiredField { field } => write!(f, "{} is required", field.as_str()),
            Self::PastDate { date, reference } => {
                write!(f, "date {date} is before {reference}")
            }
            Self::InvalidDate { year, month, day } => {
                write!(f, "invalid calendar date {year}-{month}-{day}")
            }
        }
    }
}

impl Error for ValidationError {}

/// Checks that a title carries at least one non-whitespace character.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: Field::Title,
        });
    }
    Ok(())
}

/// Builds the canonical `YYYY-MM-DD` string for a picked date.
///
/// `month` is 1-based. The date must not be strictly before `reference`;
/// both sides are whole days, so the reference day itself is accepted.
///
/// # Errors
/// - `InvalidDate` when the triple is not a real calendar day or the year
///   falls outside `0..=9999`.
/// - `PastDate` when the day is before `reference`.
pub fn validate_and_normalize_date(
    year: i32,
    month: u32,
    day: u32,
    reference: NaiveDate,
) -> Result<String, ValidationError> {
    let picked = NaiveDate::from_ymd_opt(year, month, day)
        .filter(|_| CANONICAL_YEARS.contains(&year))
        .ok_or(ValidationError::InvalidDate { year, month, day })?;
    let normalized = format_canonical_date(picked);

    if picked < reference {
        return Err(ValidationError::PastDate {
            date: normalized,
            reference: format_canonical_date(reference),
        });
    }

    Ok(normalized)
}

/// Formats a date as zero-padded `YYYY-MM-DD`.
pub fn format_canonical_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a canonical `YYYY-MM-DD` date string.
///
/// Returns `None` for unpadded (`2025-3-5`) or impossible (`2025-02-30`)
/// values.
pub fn parse_canonical_date(value: &str) -> Option<NaiveDate> {
    if !CANONICAL_DATE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Today's date in the process-local timezone.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::{
        parse_canonical_date, validate_and_normalize_date, validate_title, Field, ValidationError,
    };
    use chrono::NaiveDate;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn blank_titles_are_rejected() {
        for title in ["", "   ", "\t\n"] {
            assert_eq!(
                validate_title(title),
                Err(ValidationError::RequiredField {
                    field: Field::Title
                })
            );
        }
        assert!(validate_title(" Jazz night ").is_ok());
    }

    #[test]
    fn dates_are_zero_padded() {
        let normalized = validate_and_normalize_date(2025, 3, 5, day(2025, 1, 1)).unwrap();
        assert_eq!(normalized, "2025-03-05");
    }

    #[test]
    fn reference_day_itself_is_accepted() {
        let normalized = validate_and_normalize_date(2025, 6, 15, day(2025, 6, 15)).unwrap();
        assert_eq!(normalized, "2025-06-15");
    }

    #[test]
    fn past_dates_are_rejected() {
        let err = validate_and_normalize_date(2025, 6, 14, day(2025, 6, 15)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::PastDate {
                date: "2025-06-14".to_string(),
                reference: "2025-06-15".to_string(),
            }
        );
    }

    #[test]
    fn impossible_dates_are_rejected() {
        let err = validate_and_normalize_date(2025, 2, 30, day(2025, 1, 1)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { month: 2, day: 30, .. }));
    }

    #[test]
    fn years_without_four_digits_are_rejected() {
        for year in [10_000, -1] {
            let err = validate_and_normalize_date(year, 1, 1, day(0, 1, 1)).unwrap_err();
            assert_eq!(
                err,
                ValidationError::InvalidDate {
                    year,
                    month: 1,
                    day: 1
                }
            );
        }
        assert_eq!(
            validate_and_normalize_date(9999, 12, 31, day(2025, 1, 1)).unwrap(),
            "9999-12-31"
        );
    }

    #[test]
    fn canonical_parser_requires_padding() {
        assert_eq!(parse_canonical_date("2025-03-05"), Some(day(2025, 3, 5)));
        assert_eq!(parse_canonical_date("2025-3-5"), None);
        assert_eq!(parse_canonical_date("2025-02-30"), None);
        assert_eq!(parse_canonical_date(""), None);
    }
}
