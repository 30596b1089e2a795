// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Decomposed durations.
//!
//! A [`TemporalExtent`] has seven independently optional, non-negative
//! components (years, months, weeks, days, hours, minutes, seconds). It
//! follows the same zero-substituting lexicographic order as
//! [`TemporalCoordinate`](crate::TemporalCoordinate). Extents carry no
//! direction.

use crate::coordinate::{check_component, compare_components};
#[cfg(feature = "serde")]
use crate::coordinate::check_optional;
use crate::error::TemporalResult;
#[cfg(feature = "serde")]
use crate::error::TemporalError;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A duration decomposed under a calendar.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawExtent")
)]
pub struct TemporalExtent {
    pub(crate) years: Option<f64>,
    pub(crate) months: Option<f64>,
    pub(crate) weeks: Option<f64>,
    pub(crate) days: Option<f64>,
    pub(crate) hours: Option<f64>,
    pub(crate) minutes: Option<f64>,
    pub(crate) seconds: Option<f64>,
    /// Name of the calendar the extent was decomposed under.
    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) trs: Option<String>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawExtent {
    years: Option<f64>,
    months: Option<f64>,
    weeks: Option<f64>,
    days: Option<f64>,
    hours: Option<f64>,
    minutes: Option<f64>,
    seconds: Option<f64>,
    #[serde(default)]
    trs: Option<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawExtent> for TemporalExtent {
    type Error = TemporalError;

    fn try_from(raw: RawExtent) -> TemporalResult<Self> {
        Ok(Self::from_raw(
            [
                check_optional("years", raw.years)?,
                check_optional("months", raw.months)?,
                check_optional("weeks", raw.weeks)?,
                check_optional("days", raw.days)?,
                check_optional("hours", raw.hours)?,
                check_optional("minutes", raw.minutes)?,
                check_optional("seconds", raw.seconds)?,
            ],
            raw.trs,
        ))
    }
}

impl TemporalExtent {
    /// The all-zero extent.
    pub const ZERO: Self = Self {
        years: Some(0.0),
        months: Some(0.0),
        weeks: Some(0.0),
        days: Some(0.0),
        hours: Some(0.0),
        minutes: Some(0.0),
        seconds: Some(0.0),
        trs: None,
    };

    /// An extent with no component set.
    pub const EMPTY: Self = Self {
        years: None,
        months: None,
        weeks: None,
        days: None,
        hours: None,
        minutes: None,
        seconds: None,
        trs: None,
    };

    /// Creates an extent with all seven components present.
    pub fn new(
        years: f64,
        months: f64,
        weeks: f64,
        days: f64,
        hours: f64,
        minutes: f64,
        seconds: f64,
    ) -> TemporalResult<Self> {
        Ok(Self {
            years: Some(check_component("years", years)?),
            months: Some(check_component("months", months)?),
            weeks: Some(check_component("weeks", weeks)?),
            days: Some(check_component("days", days)?),
            hours: Some(check_component("hours", hours)?),
            minutes: Some(check_component("minutes", minutes)?),
            seconds: Some(check_component("seconds", seconds)?),
            trs: None,
        })
    }

    pub(crate) fn from_raw(components: [Option<f64>; 7], trs: Option<String>) -> Self {
        let [years, months, weeks, days, hours, minutes, seconds] = components;
        Self {
            years,
            months,
            weeks,
            days,
            hours,
            minutes,
            seconds,
            trs,
        }
    }

    // ── builders ──────────────────────────────────────────────────────

    pub fn with_years(mut self, value: f64) -> TemporalResult<Self> {
        self.years = Some(check_component("years", value)?);
        Ok(self)
    }

    pub fn with_months(mut self, value: f64) -> TemporalResult<Self> {
        self.months = Some(check_component("months", value)?);
        Ok(self)
    }

    pub fn with_weeks(mut self, value: f64) -> TemporalResult<Self> {
        self.weeks = Some(check_component("weeks", value)?);
        Ok(self)
    }

    pub fn with_days(mut self, value: f64) -> TemporalResult<Self> {
        self.days = Some(check_component("days", value)?);
        Ok(self)
    }

    pub fn with_hours(mut self, value: f64) -> TemporalResult<Self> {
        self.hours = Some(check_component("hours", value)?);
        Ok(self)
    }

    pub fn with_minutes(mut self, value: f64) -> TemporalResult<Self> {
        self.minutes = Some(check_component("minutes", value)?);
        Ok(self)
    }

    pub fn with_seconds(mut self, value: f64) -> TemporalResult<Self> {
        self.seconds = Some(check_component("seconds", value)?);
        Ok(self)
    }

    pub fn with_trs(mut self, trs: impl Into<String>) -> Self {
        self.trs = Some(trs.into());
        self
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub fn years(&self) -> Option<f64> {
        self.years
    }

    #[inline]
    pub fn months(&self) -> Option<f64> {
        self.months
    }

    #[inline]
    pub fn weeks(&self) -> Option<f64> {
        self.weeks
    }

    #[inline]
    pub fn days(&self) -> Option<f64> {
        self.days
    }

    #[inline]
    pub fn hours(&self) -> Option<f64> {
        self.hours
    }

    #[inline]
    pub fn minutes(&self) -> Option<f64> {
        self.minutes
    }

    #[inline]
    pub fn seconds(&self) -> Option<f64> {
        self.seconds
    }

    #[inline]
    pub fn trs(&self) -> Option<&str> {
        self.trs.as_deref()
    }

    /// Components years→seconds with zero substituted for absent fields.
    pub fn components(&self) -> [f64; 7] {
        [
            self.years.unwrap_or(0.0),
            self.months.unwrap_or(0.0),
            self.weeks.unwrap_or(0.0),
            self.days.unwrap_or(0.0),
            self.hours.unwrap_or(0.0),
            self.minutes.unwrap_or(0.0),
            self.seconds.unwrap_or(0.0),
        ]
    }

    pub fn is_zero(&self) -> bool {
        self.components().iter().all(|&c| c == 0.0)
    }
}

impl Ord for TemporalExtent {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_components(&self.components(), &other.components())
    }
}

impl PartialOrd for TemporalExtent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TemporalExtent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TemporalExtent {}

impl fmt::Display for TemporalExtent {
    /// ISO 8601 duration style, e.g. `P1Y2M3DT4H5M6S`; absent and zero
    /// components are omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("P")?;
        for (value, tag) in [
            (self.years, 'Y'),
            (self.months, 'M'),
            (self.weeks, 'W'),
            (self.days, 'D'),
        ] {
            if let Some(v) = value.filter(|&v| v != 0.0) {
                write!(f, "{v}{tag}")?;
            }
        }
        let time = [(self.hours, 'H'), (self.minutes, 'M'), (self.seconds, 'S')];
        if time.iter().any(|(v, _)| v.is_some_and(|v| v != 0.0)) {
            f.write_str("T")?;
            for (value, tag) in time {
                if let Some(v) = value.filter(|&v| v != 0.0) {
                    write!(f, "{v}{tag}")?;
                }
            }
        } else if self.is_zero() {
            f.write_str("T0S")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemporalError;

    #[test]
    fn test_rejects_negative() {
        assert_eq!(
            TemporalExtent::EMPTY.with_hours(-2.0).unwrap_err(),
            TemporalError::NegativeComponent {
                field: "hours",
                value: -2.0
            }
        );
    }

    #[test]
    fn test_zero_and_empty_compare_equal() {
        assert_eq!(TemporalExtent::ZERO, TemporalExtent::EMPTY);
        assert!(TemporalExtent::EMPTY.is_zero());
        assert!(TemporalExtent::EMPTY.days().is_none());
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = TemporalExtent::EMPTY.with_days(2.0).unwrap();
        let b = TemporalExtent::EMPTY.with_weeks(1.0).unwrap();
        // weeks outrank days regardless of magnitude
        assert!(b > a);
        let c = TemporalExtent::EMPTY.with_days(2.0).unwrap().with_seconds(1.0).unwrap();
        assert!(c > a);
    }

    #[test]
    fn test_display() {
        let e = TemporalExtent::new(1.0, 2.0, 0.0, 3.0, 4.0, 5.0, 6.0).unwrap();
        assert_eq!(e.to_string(), "P1Y2M3DT4H5M6S");
        assert_eq!(TemporalExtent::ZERO.to_string(), "PT0S");
        let days = TemporalExtent::EMPTY.with_days(10.0).unwrap();
        assert_eq!(days.to_string(), "P10D");
    }
}
