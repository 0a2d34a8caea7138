// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Text encoding for stored dates and timestamps.
//!
//! Dates are stored as `YYYY-MM-DD` and timestamps as `YYYY-MM-DD HH:MM:SS`
//! in UTC, which sort lexically in chronological order on every backend as
//! long as the year has four digits.

use time::format_description::StaticFormatDescription;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::error::DomainError;

/// Returns the current UTC time without an offset.
#[must_use]
pub fn now_utc() -> PrimitiveDateTime {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Earliest year a stored date may carry.
pub const MIN_YEAR: i32 = 1;
/// Latest year a stored date may carry.
pub const MAX_YEAR: i32 = 9999;

const DATE_FORMAT: StaticFormatDescription = format_description!("[year]-[month]-[day]");
const TIMESTAMP_FORMAT: StaticFormatDescription =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Rejects dates whose year has other than four digits.
///
/// Stored text only sorts chronologically for years `MIN_YEAR..=MAX_YEAR`.
///
/// # Errors
///
/// Returns `DomainError::YearOutOfRange` naming `field`.
pub const fn check_year(field: &'static str, date: Date) -> Result<(), DomainError> {
    let year: i32 = date.year();
    if year < MIN_YEAR || year > MAX_YEAR {
        return Err(DomainError::YearOutOfRange { field, year });
    }
    Ok(())
}

/// Formats a date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `DomainError::YearOutOfRange` if the year has other than four
/// digits, or `DomainError::DateFormatError` if formatting fails.
pub fn format_date(date: Date) -> Result<String, DomainError> {
    check_year("date", date)?;
    date.format(DATE_FORMAT)
        .map_err(|e| DomainError::DateFormatError(e.to_string()))
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS`, dropping sub-second precision.
///
/// # Errors
///
/// Returns `DomainError::YearOutOfRange` if the year has other than four
/// digits, or `DomainError::DateFormatError` if formatting fails.
pub fn format_timestamp(timestamp: PrimitiveDateTime) -> Result<String, DomainError> {
    check_year("timestamp", timestamp.date())?;
    timestamp
        .format(TIMESTAMP_FORMAT)
        .map_err(|e| DomainError::DateFormatError(e.to_string()))
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Parses a `YYYY-MM-DD HH:MM:SS` timestamp.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid timestamp.
pub fn parse_timestamp(value: &str) -> Result<PrimitiveDateTime, DomainError> {
    PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}
