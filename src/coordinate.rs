// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Decomposed calendar coordinates.
//!
//! A [`TemporalCoordinate`] holds six independently optional components
//! (year, month, day, hour, minute, second) plus [`CoordinateMetadata`].
//! Absent components are kept as absent so that partial coordinates
//! round-trip, but they compare as zero: ordering is lexicographic from
//! year to second with zero substituted for every absent field.
//!
//! Components supplied by callers are never negative; out-of-range values
//! (day 45, minute 300) are accepted and resolved by
//! [`ConversionEngine::normalize_coordinate`](crate::ConversionEngine::normalize_coordinate).
//! Raw coordinates are not canonical: normalize before comparing values
//! produced by different code paths.

use crate::error::{TemporalError, TemporalResult};
use crate::unit::UnitKind;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Provenance and derived annotations attached to a coordinate.
///
/// Metadata never takes part in ordering or equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordinateMetadata {
    /// Name of the reference system that produced the coordinate.
    pub trs: Option<String>,
    /// Granularity of the conversion that produced the coordinate.
    pub unit: Option<UnitKind>,
    pub month_of_year: Option<u32>,
    /// 1-based ordinal day within the year.
    pub day_of_year: Option<u32>,
    /// Weekday index in `0..7`, see [`ConversionEngine::day_of_week`](crate::ConversionEngine::day_of_week).
    pub day_of_week: Option<u32>,
}

impl CoordinateMetadata {
    pub const EMPTY: Self = Self {
        trs: None,
        unit: None,
        month_of_year: None,
        day_of_year: None,
        day_of_week: None,
    };
}

/// A point in time decomposed under a calendar.
///
/// Deserialization runs the same component checks as
/// [`TemporalCoordinate::partial`], except that the year may be negative so
/// that engine outputs before year zero round-trip.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawCoordinate")
)]
pub struct TemporalCoordinate {
    pub(crate) year: Option<f64>,
    pub(crate) month: Option<f64>,
    pub(crate) day: Option<f64>,
    pub(crate) hour: Option<f64>,
    pub(crate) minute: Option<f64>,
    pub(crate) second: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) metadata: CoordinateMetadata,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawCoordinate {
    year: Option<f64>,
    month: Option<f64>,
    day: Option<f64>,
    hour: Option<f64>,
    minute: Option<f64>,
    second: Option<f64>,
    #[serde(default)]
    metadata: CoordinateMetadata,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCoordinate> for TemporalCoordinate {
    type Error = TemporalError;

    fn try_from(raw: RawCoordinate) -> TemporalResult<Self> {
        let year = match raw.year {
            Some(year) if !year.is_finite() => {
                return Err(TemporalError::NonFiniteComponent { field: "year" })
            }
            other => other.map(|year| year + 0.0),
        };
        let checked = Self::partial(None, raw.month, raw.day, raw.hour, raw.minute, raw.second)?;
        Ok(Self {
            year,
            metadata: raw.metadata,
            ..checked
        })
    }
}

/// Validates a caller-supplied component: finite and non-negative.
///
/// Negative zero is folded into positive zero so that the total order
/// never separates the two.
pub(crate) fn check_component(field: &'static str, value: f64) -> TemporalResult<f64> {
    if !value.is_finite() {
        return Err(TemporalError::NonFiniteComponent { field });
    }
    if value < 0.0 {
        return Err(TemporalError::NegativeComponent { field, value });
    }
    Ok(value + 0.0)
}

pub(crate) fn check_optional(
    field: &'static str,
    value: Option<f64>,
) -> TemporalResult<Option<f64>> {
    value.map(|v| check_component(field, v)).transpose()
}

impl TemporalCoordinate {
    /// The all-zero coordinate `(0, 0, 0, 0, 0, 0)`.
    pub const ZERO: Self = Self {
        year: Some(0.0),
        month: Some(0.0),
        day: Some(0.0),
        hour: Some(0.0),
        minute: Some(0.0),
        second: Some(0.0),
        metadata: CoordinateMetadata::EMPTY,
    };

    /// A coordinate with no component set.
    pub const EMPTY: Self = Self {
        year: None,
        month: None,
        day: None,
        hour: None,
        minute: None,
        second: None,
        metadata: CoordinateMetadata::EMPTY,
    };

    /// Creates a coordinate with all six components present.
    pub fn new(
        year: f64,
        month: f64,
        day: f64,
        hour: f64,
        minute: f64,
        second: f64,
    ) -> TemporalResult<Self> {
        Self::partial(
            Some(year),
            Some(month),
            Some(day),
            Some(hour),
            Some(minute),
            Some(second),
        )
    }

    /// Creates a coordinate in which any component may be absent.
    pub fn partial(
        year: Option<f64>,
        month: Option<f64>,
        day: Option<f64>,
        hour: Option<f64>,
        minute: Option<f64>,
        second: Option<f64>,
    ) -> TemporalResult<Self> {
        Ok(Self {
            year: check_optional("year", year)?,
            month: check_optional("month", month)?,
            day: check_optional("day", day)?,
            hour: check_optional("hour", hour)?,
            minute: check_optional("minute", minute)?,
            second: check_optional("second", second)?,
            metadata: CoordinateMetadata::EMPTY,
        })
    }

    /// Creates a year-only coordinate, as used by large-scale systems.
    pub fn from_year(year: f64) -> TemporalResult<Self> {
        Self::partial(Some(year), None, None, None, None, None)
    }

    /// Builds a coordinate without validation.
    ///
    /// Engine outputs may carry a year before year zero (geologic positions
    /// far before the epoch); every other component stays non-negative.
    pub(crate) fn from_raw(components: [Option<f64>; 6], metadata: CoordinateMetadata) -> Self {
        let [year, month, day, hour, minute, second] = components;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            metadata,
        }
    }

    // ── builders ──────────────────────────────────────────────────────

    pub fn with_year(mut self, year: f64) -> TemporalResult<Self> {
        self.year = Some(check_component("year", year)?);
        Ok(self)
    }

    pub fn with_month(mut self, month: f64) -> TemporalResult<Self> {
        self.month = Some(check_component("month", month)?);
        Ok(self)
    }

    pub fn with_day(mut self, day: f64) -> TemporalResult<Self> {
        self.day = Some(check_component("day", day)?);
        Ok(self)
    }

    pub fn with_hour(mut self, hour: f64) -> TemporalResult<Self> {
        self.hour = Some(check_component("hour", hour)?);
        Ok(self)
    }

    pub fn with_minute(mut self, minute: f64) -> TemporalResult<Self> {
        self.minute = Some(check_component("minute", minute)?);
        Ok(self)
    }

    pub fn with_second(mut self, second: f64) -> TemporalResult<Self> {
        self.second = Some(check_component("second", second)?);
        Ok(self)
    }

    pub fn with_trs(mut self, trs: impl Into<String>) -> Self {
        self.metadata.trs = Some(trs.into());
        self
    }

    pub fn with_unit(mut self, unit: UnitKind) -> Self {
        self.metadata.unit = Some(unit);
        self
    }

    pub fn with_metadata(mut self, metadata: CoordinateMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub fn year(&self) -> Option<f64> {
        self.year
    }

    #[inline]
    pub fn month(&self) -> Option<f64> {
        self.month
    }

    #[inline]
    pub fn day(&self) -> Option<f64> {
        self.day
    }

    #[inline]
    pub fn hour(&self) -> Option<f64> {
        self.hour
    }

    #[inline]
    pub fn minute(&self) -> Option<f64> {
        self.minute
    }

    #[inline]
    pub fn second(&self) -> Option<f64> {
        self.second
    }

    #[inline]
    pub fn metadata(&self) -> &CoordinateMetadata {
        &self.metadata
    }

    /// Components year→second with zero substituted for absent fields.
    pub fn components(&self) -> [f64; 6] {
        [
            self.year.unwrap_or(0.0),
            self.month.unwrap_or(0.0),
            self.day.unwrap_or(0.0),
            self.hour.unwrap_or(0.0),
            self.minute.unwrap_or(0.0),
            self.second.unwrap_or(0.0),
        ]
    }

    /// `true` when every component is zero or absent.
    pub fn is_zero(&self) -> bool {
        self.components().iter().all(|&c| c == 0.0)
    }

    /// `true` when only the year component is present.
    pub fn is_year_only(&self) -> bool {
        self.year.is_some()
            && self.month.is_none()
            && self.day.is_none()
            && self.hour.is_none()
            && self.minute.is_none()
            && self.second.is_none()
    }
}

// ── ordering ──────────────────────────────────────────────────────────────

impl Ord for TemporalCoordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_components(&self.components(), &other.components())
    }
}

impl PartialOrd for TemporalCoordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TemporalCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TemporalCoordinate {}

/// Lexicographic total order over component arrays.
pub(crate) fn compare_components(lhs: &[f64], rhs: &[f64]) -> Ordering {
    lhs.iter()
        .zip(rhs)
        .map(|(a, b)| a.total_cmp(b))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

// ── display ───────────────────────────────────────────────────────────────

impl fmt::Display for TemporalCoordinate {
    /// ISO-like rendering; absent components print as `--`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn part(f: &mut fmt::Formatter<'_>, value: Option<f64>) -> fmt::Result {
            match value {
                Some(v) => write!(f, "{:02}", v.trunc() as i64),
                None => f.write_str("--"),
            }
        }

        match self.year {
            Some(y) => write!(f, "{:04}", y.trunc() as i64)?,
            None => f.write_str("----")?,
        }
        f.write_str("-")?;
        part(f, self.month)?;
        f.write_str("-")?;
        part(f, self.day)?;
        f.write_str("T")?;
        part(f, self.hour)?;
        f.write_str(":")?;
        part(f, self.minute)?;
        f.write_str(":")?;
        match self.second {
            Some(s) if s.fract() != 0.0 => write!(f, "{:09.6}", s),
            other => part(f, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: f64, m: f64, d: f64) -> TemporalCoordinate {
        TemporalCoordinate::new(y, m, d, 0.0, 0.0, 0.0).unwrap()
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        assert_eq!(
            TemporalCoordinate::new(2024.0, 1.0, -1.0, 0.0, 0.0, 0.0).unwrap_err(),
            TemporalError::NegativeComponent {
                field: "day",
                value: -1.0
            }
        );
        assert_eq!(
            TemporalCoordinate::EMPTY.with_second(f64::NAN).unwrap_err(),
            TemporalError::NonFiniteComponent { field: "second" }
        );
    }

    #[test]
    fn test_out_of_range_is_accepted() {
        let c = ymd(2024.0, 1.0, 45.0);
        assert_eq!(c.day(), Some(45.0));
    }

    #[test]
    fn test_absent_compares_as_zero() {
        let partial = TemporalCoordinate::from_year(0.0).unwrap();
        assert_eq!(partial, TemporalCoordinate::ZERO);
        assert!(partial.is_zero());
        assert!(partial.month().is_none());
    }

    #[test]
    fn test_lexicographic_order() {
        assert!(ymd(2023.0, 12.0, 31.0) < ymd(2024.0, 1.0, 1.0));
        assert!(ymd(2024.0, 2.0, 1.0) > ymd(2024.0, 1.0, 31.0));
        let later = ymd(2024.0, 1.0, 1.0).with_second(0.5).unwrap();
        assert!(later > ymd(2024.0, 1.0, 1.0));
    }

    #[test]
    fn test_negative_zero_equals_zero() {
        let c = TemporalCoordinate::EMPTY.with_hour(-0.0).unwrap();
        assert_eq!(c.hour(), Some(0.0));
        assert!(c.hour().unwrap().is_sign_positive());
    }

    #[test]
    fn test_metadata_ignored_by_equality() {
        let a = ymd(1970.0, 1.0, 1.0).with_trs("unix");
        let b = ymd(1970.0, 1.0, 1.0).with_unit(UnitKind::Second);
        assert_eq!(a, b);
        assert_ne!(a.metadata(), b.metadata());
    }

    #[test]
    fn test_display() {
        let c = TemporalCoordinate::new(2024.0, 2.0, 29.0, 0.0, 1.0, 0.0).unwrap();
        assert_eq!(c.to_string(), "2024-02-29T00:01:00");
        let y = TemporalCoordinate::from_year(1950.0).unwrap();
        assert_eq!(y.to_string(), "1950-----T--:--:--");
        let frac = TemporalCoordinate::ZERO.with_second(1.5).unwrap();
        assert!(frac.to_string().ends_with("01.500000"));
    }
}
