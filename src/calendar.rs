// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar reference systems.
//!
//! A [`CalendarReferenceSystem`] fixes the metrics a coordinate is read
//! under: seconds per minute, minutes per hour, hours per day, an ordered
//! month table, and an optional [`LeapYearRule`] that maps a year to that
//! year's month table.
//!
//! Two calendars are built in:
//!
//! | Calendar | Leap rule |
//! |----------|-----------|
//! | [`CalendarReferenceSystem::gregorian`] | ÷4, not ÷100 unless ÷400, from year 1582 |
//! | [`CalendarReferenceSystem::julian`] | ÷4 |
//!
//! # Unit-kind chain
//!
//! Scalars move between unit kinds through the chain
//! `second → minute → hour → day → average month → year`, where the average
//! month is `days_per_year / months_per_year` days. See
//! [`CalendarReferenceSystem::convert`].

use crate::error::{TemporalError, TemporalResult};
use crate::unit::UnitKind;
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Month lengths of a common Gregorian/Julian year.
pub const STANDARD_MONTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// First year the Gregorian leap rule applies to.
pub const GREGORIAN_REFORM_YEAR: i64 = 1582;

// ═══════════════════════════════════════════════════════════════════════════
// Leap-year rules
// ═══════════════════════════════════════════════════════════════════════════

/// Maps a year to that year's month-length table.
///
/// Implementations must return as many months as the calendar's base table;
/// [`CalendarReferenceSystem::months_for_year`] rejects anything else.
pub trait LeapYearRule: Send + Sync + fmt::Debug {
    fn month_lengths(&self, year: i64) -> Vec<u32>;

    /// Days from the start of year 0 to the start of `year` (negative for
    /// years before 0), for rules that can count them in closed form.
    ///
    /// Returning `None` makes the calendar sum `month_lengths` year by year.
    fn days_before_year(&self, year: i64) -> Option<i64> {
        let _ = year;
        None
    }
}

const COMMON_YEAR_DAYS: i64 = 365;

/// Gregorian rule: a year divisible by 4 is leap, except centuries not
/// divisible by 400. Years before [`GREGORIAN_REFORM_YEAR`] are never leap.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct GregorianLeapRule;

impl GregorianLeapRule {
    pub const fn is_leap_year(year: i64) -> bool {
        year >= GREGORIAN_REFORM_YEAR
            && year % 4 == 0
            && (year % 100 != 0 || year % 400 == 0)
    }
}

impl LeapYearRule for GregorianLeapRule {
    fn month_lengths(&self, year: i64) -> Vec<u32> {
        with_leap_february(Self::is_leap_year(year))
    }

    fn days_before_year(&self, year: i64) -> Option<i64> {
        // leap years in [0, y) under the unreformed 4/100/400 rule
        fn leap_years_below(y: i64) -> i64 {
            (y + 3).div_euclid(4) - (y + 99).div_euclid(100) + (y + 399).div_euclid(400)
        }
        let leap_days = leap_years_below(year.max(GREGORIAN_REFORM_YEAR))
            - leap_years_below(GREGORIAN_REFORM_YEAR);
        Some(year * COMMON_YEAR_DAYS + leap_days)
    }
}

/// Julian rule: every year divisible by 4 is leap.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct JulianLeapRule;

impl JulianLeapRule {
    pub const fn is_leap_year(year: i64) -> bool {
        year.rem_euclid(4) == 0
    }
}

impl LeapYearRule for JulianLeapRule {
    fn month_lengths(&self, year: i64) -> Vec<u32> {
        with_leap_february(Self::is_leap_year(year))
    }

    fn days_before_year(&self, year: i64) -> Option<i64> {
        Some(year * COMMON_YEAR_DAYS + (year + 3).div_euclid(4))
    }
}

fn with_leap_february(leap: bool) -> Vec<u32> {
    let mut months = STANDARD_MONTHS.to_vec();
    if leap {
        months[1] = 29;
    }
    months
}

/// Adapts a closure into a [`LeapYearRule`].
///
/// ```
/// use chronoframe::{CalendarReferenceSystem, LeapRuleFn};
///
/// // 13 × 28-day months, plus one intercalary day every fourth year.
/// let rule = LeapRuleFn::new(|year| {
///     let mut months = vec![28; 13];
///     if year % 4 == 0 {
///         months[12] = 29;
///     }
///     months
/// });
/// let calendar = CalendarReferenceSystem::builder("international-fixed")
///     .months(vec![28; 13])
///     .leap_rule(rule)
///     .build()
///     .unwrap();
/// assert_eq!(calendar.days_in_year(2024).unwrap(), 365);
/// ```
pub struct LeapRuleFn<F>(F);

impl<F> LeapRuleFn<F>
where
    F: Fn(i64) -> Vec<u32> + Send + Sync,
{
    pub fn new(rule: F) -> Self {
        Self(rule)
    }
}

impl<F> fmt::Debug for LeapRuleFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LeapRuleFn(..)")
    }
}

impl<F> LeapYearRule for LeapRuleFn<F>
where
    F: Fn(i64) -> Vec<u32> + Send + Sync,
{
    fn month_lengths(&self, year: i64) -> Vec<u32> {
        (self.0)(year)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CalendarReferenceSystem
// ═══════════════════════════════════════════════════════════════════════════

/// Metrics of a calendar.
#[derive(Debug, Clone)]
pub struct CalendarReferenceSystem {
    name: String,
    seconds_per_minute: u32,
    minutes_per_hour: u32,
    hours_per_day: u32,
    months: Vec<u32>,
    leap_rule: Option<Arc<dyn LeapYearRule>>,
}

impl CalendarReferenceSystem {
    /// Creates a calendar, validating every metric.
    pub fn new(
        name: impl Into<String>,
        seconds_per_minute: u32,
        minutes_per_hour: u32,
        hours_per_day: u32,
        months: Vec<u32>,
        leap_rule: Option<Arc<dyn LeapYearRule>>,
    ) -> TemporalResult<Self> {
        for (metric, value) in [
            ("seconds_per_minute", seconds_per_minute),
            ("minutes_per_hour", minutes_per_hour),
            ("hours_per_day", hours_per_day),
        ] {
            if value == 0 {
                return Err(TemporalError::InvalidMetric { metric, value });
            }
        }
        if months.is_empty() {
            return Err(TemporalError::EmptyMonthTable);
        }
        if let Some(index) = months.iter().position(|&days| days == 0) {
            return Err(TemporalError::ZeroLengthMonth { index });
        }
        Ok(Self {
            name: name.into(),
            seconds_per_minute,
            minutes_per_hour,
            hours_per_day,
            months,
            leap_rule,
        })
    }

    /// Starts a builder with Earth clock metrics (60 s, 60 min, 24 h) and
    /// the standard twelve-month table.
    pub fn builder(name: impl Into<String>) -> CalendarBuilder {
        CalendarBuilder {
            name: name.into(),
            seconds_per_minute: 60,
            minutes_per_hour: 60,
            hours_per_day: 24,
            months: STANDARD_MONTHS.to_vec(),
            leap_rule: None,
        }
    }

    /// The Gregorian calendar.
    pub fn gregorian() -> &'static Self {
        static GREGORIAN: OnceLock<CalendarReferenceSystem> = OnceLock::new();
        GREGORIAN.get_or_init(|| Self::earth("gregorian", Arc::new(GregorianLeapRule)))
    }

    /// The Julian calendar.
    pub fn julian() -> &'static Self {
        static JULIAN: OnceLock<CalendarReferenceSystem> = OnceLock::new();
        JULIAN.get_or_init(|| Self::earth("julian", Arc::new(JulianLeapRule)))
    }

    fn earth(name: &str, rule: Arc<dyn LeapYearRule>) -> Self {
        Self {
            name: name.to_owned(),
            seconds_per_minute: 60,
            minutes_per_hour: 60,
            hours_per_day: 24,
            months: STANDARD_MONTHS.to_vec(),
            leap_rule: Some(rule),
        }
    }

    /// The same calendar with the leap rule removed.
    pub fn without_leap_rule(&self) -> Self {
        Self {
            leap_rule: None,
            ..self.clone()
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn seconds_per_minute(&self) -> u32 {
        self.seconds_per_minute
    }

    pub const fn minutes_per_hour(&self) -> u32 {
        self.minutes_per_hour
    }

    pub const fn hours_per_day(&self) -> u32 {
        self.hours_per_day
    }

    /// Base month table (common year).
    pub fn months(&self) -> &[u32] {
        &self.months
    }

    pub fn leap_rule(&self) -> Option<&Arc<dyn LeapYearRule>> {
        self.leap_rule.as_ref()
    }

    // ── derived metrics ───────────────────────────────────────────────

    pub fn months_per_year(&self) -> u32 {
        self.months.len() as u32
    }

    /// Sum of the base month table.
    pub fn days_per_year(&self) -> f64 {
        self.months.iter().map(|&d| f64::from(d)).sum()
    }

    /// `days_per_year / months_per_year`.
    pub fn average_month_days(&self) -> f64 {
        self.days_per_year() / f64::from(self.months_per_year())
    }

    /// `true` when every month has the same length, so that months and
    /// years are exact multiples of a day.
    pub fn has_exact_metric(&self) -> bool {
        self.months.windows(2).all(|pair| pair[0] == pair[1])
    }

    pub fn seconds_per_hour(&self) -> f64 {
        f64::from(self.seconds_per_minute) * f64::from(self.minutes_per_hour)
    }

    pub fn seconds_per_day(&self) -> f64 {
        self.seconds_per_hour() * f64::from(self.hours_per_day)
    }

    pub fn seconds_per_average_month(&self) -> f64 {
        self.average_month_days() * self.seconds_per_day()
    }

    pub fn seconds_per_year(&self) -> f64 {
        self.days_per_year() * self.seconds_per_day()
    }

    /// Length of one `kind` in seconds along the unit-kind chain.
    pub fn seconds_per(&self, kind: UnitKind) -> f64 {
        match kind {
            UnitKind::Second => 1.0,
            UnitKind::Minute => f64::from(self.seconds_per_minute),
            UnitKind::Hour => self.seconds_per_hour(),
            UnitKind::Day => self.seconds_per_day(),
            UnitKind::Month => self.seconds_per_average_month(),
            UnitKind::Year => self.seconds_per_year(),
        }
    }

    /// Re-expresses `value` from one unit kind into another.
    ///
    /// Same-kind conversions return `value` untouched. Conversions that
    /// cross the month boundary use the average month and are only exact
    /// when [`has_exact_metric`](Self::has_exact_metric) holds.
    pub fn convert(&self, value: f64, from: UnitKind, to: UnitKind) -> f64 {
        if from == to {
            value
        } else {
            value * self.seconds_per(from) / self.seconds_per(to)
        }
    }

    // ── leap-rule resolution ──────────────────────────────────────────

    /// Month table for `year`, resolved through the leap rule when present.
    pub fn months_for_year(&self, year: i64) -> TemporalResult<Cow<'_, [u32]>> {
        let Some(rule) = &self.leap_rule else {
            return Ok(Cow::Borrowed(&self.months));
        };
        let months = rule.month_lengths(year);
        if months.len() != self.months.len() {
            return Err(TemporalError::LeapRuleCardinality {
                year,
                expected: self.months.len(),
                actual: months.len(),
            });
        }
        if let Some(index) = months.iter().position(|&days| days == 0) {
            return Err(TemporalError::LeapRuleZeroMonth { year, index });
        }
        Ok(Cow::Owned(months))
    }

    /// Days in the 1-based `month` of `year`.
    ///
    /// `month` is clamped into the table; callers pass normalized months.
    pub fn days_in_month(&self, year: i64, month: u32) -> TemporalResult<u32> {
        let months = self.months_for_year(year)?;
        let index = (month.max(1) as usize - 1).min(months.len() - 1);
        Ok(months[index])
    }

    pub fn days_in_year(&self, year: i64) -> TemporalResult<u32> {
        Ok(self.months_for_year(year)?.iter().sum())
    }

    /// Days from the start of year 0 to the start of `year`, negative for
    /// years before 0.
    ///
    /// Built-in leap rules answer in constant time; custom rules are summed
    /// year by year, validating every resolved table on the way.
    pub fn days_before_year(&self, year: i64) -> TemporalResult<f64> {
        let Some(rule) = &self.leap_rule else {
            return Ok(year as f64 * self.days_per_year());
        };
        if let Some(days) = rule.days_before_year(year) {
            return Ok(days as f64);
        }
        let mut days = 0.0;
        if year >= 0 {
            for y in 0..year {
                days += f64::from(self.days_in_year(y)?);
            }
        } else {
            for y in year..0 {
                days -= f64::from(self.days_in_year(y)?);
            }
        }
        Ok(days)
    }
}

impl Default for CalendarReferenceSystem {
    fn default() -> Self {
        Self::gregorian().clone()
    }
}

impl fmt::Display for CalendarReferenceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} months, {} d/y, {} h/d)",
            self.name,
            self.months.len(),
            self.days_per_year(),
            self.hours_per_day
        )
    }
}

/// Builder for [`CalendarReferenceSystem`].
#[derive(Debug, Clone)]
pub struct CalendarBuilder {
    name: String,
    seconds_per_minute: u32,
    minutes_per_hour: u32,
    hours_per_day: u32,
    months: Vec<u32>,
    leap_rule: Option<Arc<dyn LeapYearRule>>,
}

impl CalendarBuilder {
    pub fn seconds_per_minute(mut self, value: u32) -> Self {
        self.seconds_per_minute = value;
        self
    }

    pub fn minutes_per_hour(mut self, value: u32) -> Self {
        self.minutes_per_hour = value;
        self
    }

    pub fn hours_per_day(mut self, value: u32) -> Self {
        self.hours_per_day = value;
        self
    }

    pub fn months(mut self, months: Vec<u32>) -> Self {
        self.months = months;
        self
    }

    pub fn leap_rule(mut self, rule: impl LeapYearRule + 'static) -> Self {
        self.leap_rule = Some(Arc::new(rule));
        self
    }

    pub fn build(self) -> TemporalResult<CalendarReferenceSystem> {
        CalendarReferenceSystem::new(
            self.name,
            self.seconds_per_minute,
            self.minutes_per_hour,
            self.hours_per_day,
            self.months,
            self.leap_rule,
        )
    }
}
