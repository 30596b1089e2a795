// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for temporal arithmetic.
//!
//! Every fallible operation returns [`TemporalResult<T>`]. Errors are raised
//! at the call that would construct or operate on an invalid value and are
//! never recovered internally.
//!
//! | Variant group | Raised by |
//! |---------------|-----------|
//! | metric / month table | calendar construction, leap-rule resolution |
//! | component | coordinate and extent constructors |
//! | argument | conversion functions (negative duration, NaN, zero scale, year range) |
//! | reference | position TRS builder, era hierarchy |
//! | registry | duplicate registration |
//!
//! Registry and era *lookups* report absence through `Option`, not through
//! this type.

use thiserror::Error;

/// Errors raised by the conversion engine and its value types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemporalError {
    // Calendar errors
    #[error("calendar metric `{metric}` must be positive, got {value}")]
    InvalidMetric { metric: &'static str, value: u32 },

    #[error("calendar month table must contain at least one month")]
    EmptyMonthTable,

    #[error("calendar month {index} must have a positive day count")]
    ZeroLengthMonth { index: usize },

    #[error("leap-year rule returned {actual} months for year {year}, expected {expected}")]
    LeapRuleCardinality {
        year: i64,
        expected: usize,
        actual: usize,
    },

    #[error("leap-year rule returned a zero-length month {index} for year {year}")]
    LeapRuleZeroMonth { year: i64, index: usize },

    // Component errors
    #[error("component `{field}` must be non-negative, got {value}")]
    NegativeComponent { field: &'static str, value: f64 },

    #[error("component `{field}` must be finite")]
    NonFiniteComponent { field: &'static str },

    // Argument errors
    #[error("duration must be non-negative, got {0}")]
    NegativeDuration(f64),

    #[error("argument `{parameter}` must be finite")]
    NonFiniteArgument { parameter: &'static str },

    #[error("unit scale factor must be non-zero for `{operation}`")]
    ZeroScaleFactor { operation: &'static str },

    #[error("year {0} is outside the resolvable range")]
    YearOutOfRange(f64),

    // Reference errors
    #[error("position reference system requires an origin coordinate")]
    MissingOrigin,

    #[error("position reference system requires a temporal unit")]
    MissingUnit,

    #[error("unknown era `{0}`")]
    UnknownEra(String),

    // Registry errors
    #[error("{kind} `{name}` is already registered")]
    AlreadyRegistered { kind: &'static str, name: String },
}

/// Result type for temporal operations.
pub type TemporalResult<T> = Result<T, TemporalError>;

/// Rejects NaN and infinities in scalar arguments.
pub(crate) fn ensure_finite(value: f64, parameter: &'static str) -> TemporalResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TemporalError::NonFiniteArgument { parameter })
    }
}

/// Largest year magnitude the engine resolves (2^53). Beyond it `f64`
/// years stop being exact integers.
pub(crate) const MAX_YEAR: f64 = 9_007_199_254_740_992.0;

/// Converts a truncated year into the integer the calendar indexes by.
pub(crate) fn year_index(year: f64) -> TemporalResult<i64> {
    if year.is_finite() && year.abs() <= MAX_YEAR {
        Ok(year as i64)
    } else {
        Err(TemporalError::YearOutOfRange(year))
    }
}
