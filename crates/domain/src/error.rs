// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use time::PrimitiveDateTime;

/// Errors that can occur during field validation and schema registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required text field is empty or whitespace.
    RequiredField {
        /// The field that was missing.
        field: &'static str,
    },
    /// A text field exceeds its maximum length.
    FieldTooLong {
        /// The offending field.
        field: &'static str,
        /// The maximum number of characters allowed.
        max_length: usize,
        /// The number of characters supplied.
        length: usize,
    },
    /// An email field is not of the form `local@domain.tld`.
    InvalidEmail {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
    /// A quantity or amount is below zero.
    NegativeValue {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },
    /// A decimal value has too many fractional or integer digits.
    PrecisionExceeded {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
        /// The total number of digits allowed.
        max_digits: u32,
        /// The number of fractional digits allowed.
        decimal_places: u32,
    },
    /// A processing run ends before it starts.
    EndBeforeStart {
        /// The start timestamp.
        started_at: PrimitiveDateTime,
        /// The end timestamp.
        ended_at: PrimitiveDateTime,
    },
    /// A date's year is outside `1..=9999`.
    YearOutOfRange {
        /// The offending field.
        field: &'static str,
        /// The rejected year.
        year: i32,
    },
    /// Failed to format a date or timestamp for storage.
    DateFormatError(String),
    /// Failed to parse a stored date or timestamp.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// The schema registry contains a dependency cycle.
    CyclicDependency(String),
    /// An entity name or relation target is not known.
    UnknownEntity(String),
}

impl DomainError {
    /// Returns the field this error refers to, when there is one.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::RequiredField { field }
            | Self::FieldTooLong { field, .. }
            | Self::InvalidEmail { field, .. }
            | Self::NegativeValue { field, .. }
            | Self::PrecisionExceeded { field, .. }
            | Self::YearOutOfRange { field, .. } => Some(field),
            Self::EndBeforeStart { .. } => Some("ended_at"),
            Self::DateFormatError(_)
            | Self::DateParseError { .. }
            | Self::CyclicDependency(_)
            | Self::UnknownEntity(_) => None,
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequiredField { field } => write!(f, "Field '{field}' is required"),
            Self::FieldTooLong {
                field,
                max_length,
                length,
            } => {
                write!(
                    f,
                    "Field '{field}' is too long: {length} characters (maximum {max_length})"
                )
            }
            Self::InvalidEmail { field, value } => {
                write!(f, "Field '{field}' is not a valid email address: '{value}'")
            }
            Self::NegativeValue { field, value } => {
                write!(f, "Field '{field}' must not be negative, got {value}")
            }
            Self::PrecisionExceeded {
                field,
                value,
                max_digits,
                decimal_places,
            } => {
                write!(
                    f,
                    "Field '{field}' value {value} exceeds precision: at most {max_digits} digits with {decimal_places} decimal places"
                )
            }
            Self::EndBeforeStart {
                started_at,
                ended_at,
            } => {
                write!(
                    f,
                    "Processing cannot end ({ended_at}) before it starts ({started_at})"
                )
            }
            Self::YearOutOfRange { field, year } => {
                write!(f, "Field '{field}' year {year} is outside 1 to 9999")
            }
            Self::DateFormatError(error) => write!(f, "Failed to format date: {error}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::CyclicDependency(entity) => {
                write!(f, "Schema registry has a dependency cycle through '{entity}'")
            }
            Self::UnknownEntity(name) => write!(f, "Unknown entity: {name}"),
        }
    }
}

impl std::error::Error for DomainError {}
