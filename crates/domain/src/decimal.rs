// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixed-precision decimal fields.
//!
//! Every decimal column has a total digit budget and a fixed number of
//! fractional digits. Values are validated against their [`DecimalSpec`]
//! before they are written, and stored as integers in minor units
//! (`value * 10^decimal_places`) so no backend ever rounds them.

use rust_decimal::Decimal;

use crate::error::DomainError;

/// Precision and sign rules for one decimal column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalSpec {
    /// Total number of digits, integer and fractional.
    pub max_digits: u32,
    /// Number of fractional digits stored.
    pub decimal_places: u32,
    /// Whether values below zero are accepted.
    pub allow_negative: bool,
}

impl DecimalSpec {
    /// Unit prices per kilogram: up to 999.99.
    pub const PRICE: Self = Self::non_negative(5, 2);
    /// Weights, capacities and money totals: up to 99,999,999.99.
    pub const AMOUNT: Self = Self::non_negative(10, 2);
    /// Geographic coordinates with six fractional digits.
    pub const COORDINATE: Self = Self {
        max_digits: 10,
        decimal_places: 6,
        allow_negative: true,
    };

    const fn non_negative(max_digits: u32, decimal_places: u32) -> Self {
        Self {
            max_digits,
            decimal_places,
            allow_negative: false,
        }
    }

    /// Validates `value` for `field` and rescales it to exactly
    /// `decimal_places` fractional digits.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The value is negative and the column does not allow it
    /// - The value has more fractional digits than `decimal_places`
    /// - The value has more integer digits than `max_digits - decimal_places`
    pub fn apply(&self, field: &'static str, value: Decimal) -> Result<Decimal, DomainError> {
        if !self.allow_negative && value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::NegativeValue { field, value });
        }

        if value.scale() > self.decimal_places {
            return Err(self.precision_error(field, value));
        }

        let mut rescaled: Decimal = value;
        rescaled.rescale(self.decimal_places);

        let whole: u128 = rescaled.mantissa().unsigned_abs() / 10u128.pow(self.decimal_places);
        let whole_digits: u32 = if whole == 0 { 0 } else { whole.ilog10() + 1 };
        if whole_digits > self.max_digits - self.decimal_places {
            return Err(self.precision_error(field, value));
        }

        Ok(rescaled)
    }

    /// Validates an optional value; `None` passes through.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`DecimalSpec::apply`] for `Some` values.
    pub fn apply_optional(
        &self,
        field: &'static str,
        value: Option<Decimal>,
    ) -> Result<Option<Decimal>, DomainError> {
        value.map(|v| self.apply(field, v)).transpose()
    }

    /// Converts a validated value into minor units for storage.
    ///
    /// Returns `None` if the value does not fit in an `i64`, which cannot
    /// happen for values accepted by [`DecimalSpec::apply`].
    #[must_use]
    pub fn to_minor_units(&self, value: Decimal) -> Option<i64> {
        let mut rescaled: Decimal = value;
        rescaled.rescale(self.decimal_places);
        i64::try_from(rescaled.mantissa()).ok()
    }

    /// Converts stored minor units back into a decimal value.
    #[must_use]
    pub fn from_minor_units(&self, minor_units: i64) -> Decimal {
        Decimal::new(minor_units, self.decimal_places)
    }

    const fn precision_error(&self, field: &'static str, value: Decimal) -> DomainError {
        DomainError::PrecisionExceeded {
            field,
            value,
            max_digits: self.max_digits,
            decimal_places: self.decimal_places,
        }
    }
}
