// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Temporal units.
//!
//! A [`TemporalUnit`] is a scale factor applied to one of six base
//! [`UnitKind`]s. Its magnitude is `scale × (one kind)`, where the length of
//! "one kind" is defined by the calendar the unit is used with.
//!
//! | Constant | Kind | Scale |
//! |----------|------|-------|
//! | [`TemporalUnit::MILLENNIUM`] | Year | 1000 |
//! | [`TemporalUnit::CENTURY`] | Year | 100 |
//! | [`TemporalUnit::DECADE`] | Year | 10 |
//! | [`TemporalUnit::YEAR`] | Year | 1 |
//! | [`TemporalUnit::MONTH`] | Month | 1 |
//! | [`TemporalUnit::WEEK`] | Day | 7 |
//! | [`TemporalUnit::DAY`] | Day | 1 |
//! | [`TemporalUnit::HOUR`] | Hour | 1 |
//! | [`TemporalUnit::MINUTE`] | Minute | 1 |
//! | [`TemporalUnit::SECOND`] | Second | 1 |
//! | [`TemporalUnit::MILLION_YEARS_AGO`] | Year | −1 000 000 |
//! | [`TemporalUnit::THOUSAND_YEARS_AGO`] | Year | −1 000 |
//! | [`TemporalUnit::MARS_SOL`] | Day | 1.0274912517 |
//!
//! Negative scales express epoch-relative "ago" units; fractional scales
//! express non-Earth days.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Base unit kinds, ordered from largest to smallest.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnitKind {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl UnitKind {
    /// All kinds, largest first.
    pub const ALL: [UnitKind; 6] = [
        UnitKind::Year,
        UnitKind::Month,
        UnitKind::Day,
        UnitKind::Hour,
        UnitKind::Minute,
        UnitKind::Second,
    ];

    /// Lowercase label.
    pub const fn label(self) -> &'static str {
        match self {
            UnitKind::Year => "year",
            UnitKind::Month => "month",
            UnitKind::Day => "day",
            UnitKind::Hour => "hour",
            UnitKind::Minute => "minute",
            UnitKind::Second => "second",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named scale applied to a base [`UnitKind`].
///
/// Construction never fails: any real scale is accepted. Operations that
/// divide by the scale reject a zero scale at call time.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TemporalUnit {
    kind: UnitKind,
    scale: f64,
}

impl TemporalUnit {
    pub const MILLENNIUM: Self = Self::new(UnitKind::Year, 1_000.0);
    pub const CENTURY: Self = Self::new(UnitKind::Year, 100.0);
    pub const DECADE: Self = Self::new(UnitKind::Year, 10.0);
    pub const YEAR: Self = Self::new(UnitKind::Year, 1.0);
    pub const MONTH: Self = Self::new(UnitKind::Month, 1.0);
    pub const WEEK: Self = Self::new(UnitKind::Day, 7.0);
    pub const DAY: Self = Self::new(UnitKind::Day, 1.0);
    pub const HOUR: Self = Self::new(UnitKind::Hour, 1.0);
    pub const MINUTE: Self = Self::new(UnitKind::Minute, 1.0);
    pub const SECOND: Self = Self::new(UnitKind::Second, 1.0);

    /// Geologic "Ma": one million years before the epoch.
    pub const MILLION_YEARS_AGO: Self = Self::new(UnitKind::Year, -1_000_000.0);

    /// Archaeologic "ka": one thousand years before the epoch.
    pub const THOUSAND_YEARS_AGO: Self = Self::new(UnitKind::Year, -1_000.0);

    /// Mean Martian solar day (24 h 39 m 35.244 s) in Earth days.
    pub const MARS_SOL: Self = Self::new(UnitKind::Day, 1.027_491_251_7);

    /// Built-in units with their registry names.
    pub const BUILTINS: [(&'static str, TemporalUnit); 13] = [
        ("millennium", Self::MILLENNIUM),
        ("century", Self::CENTURY),
        ("decade", Self::DECADE),
        ("year", Self::YEAR),
        ("month", Self::MONTH),
        ("week", Self::WEEK),
        ("day", Self::DAY),
        ("hour", Self::HOUR),
        ("minute", Self::MINUTE),
        ("second", Self::SECOND),
        ("million-years-ago", Self::MILLION_YEARS_AGO),
        ("thousand-years-ago", Self::THOUSAND_YEARS_AGO),
        ("mars-sol", Self::MARS_SOL),
    ];

    #[inline]
    pub const fn new(kind: UnitKind, scale: f64) -> Self {
        Self { kind, scale }
    }

    #[inline]
    pub const fn kind(&self) -> UnitKind {
        self.kind
    }

    #[inline]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// A unit of the same kind whose scale is multiplied by `factor`.
    #[inline]
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.kind, self.scale * factor)
    }

    /// `true` for epoch-relative "ago" units.
    #[inline]
    pub fn is_retrograde(&self) -> bool {
        self.scale < 0.0
    }
}

impl fmt::Display for TemporalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 1.0 {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} {}", self.scale, self.kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scales() {
        assert_eq!(TemporalUnit::WEEK.kind(), UnitKind::Day);
        assert_eq!(TemporalUnit::WEEK.scale(), 7.0);
        assert_eq!(TemporalUnit::MILLION_YEARS_AGO.scale(), -1.0e6);
        assert!(TemporalUnit::MILLION_YEARS_AGO.is_retrograde());
        assert!(!TemporalUnit::MARS_SOL.is_retrograde());
    }

    #[test]
    fn test_scaled_keeps_kind() {
        let fortnight = TemporalUnit::WEEK.scaled(2.0);
        assert_eq!(fortnight.kind(), UnitKind::Day);
        assert_eq!(fortnight.scale(), 14.0);
    }

    #[test]
    fn test_kind_order_largest_first() {
        assert!(UnitKind::Year < UnitKind::Month);
        assert!(UnitKind::Minute < UnitKind::Second);
        assert_eq!(UnitKind::ALL.len(), 6);
    }

    #[test]
    fn test_display() {
        assert_eq!(TemporalUnit::HOUR.to_string(), "hour");
        assert_eq!(TemporalUnit::MILLION_YEARS_AGO.to_string(), "-1000000 year");
    }

    #[test]
    fn test_builtin_names_unique() {
        let mut names: Vec<_> = TemporalUnit::BUILTINS.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TemporalUnit::BUILTINS.len());
    }
}
