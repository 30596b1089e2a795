// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Conversion engine.
//!
//! [`ConversionEngine`] moves between the three representations of time
//! under one [`CalendarReferenceSystem`]:
//!
//! ```text
//!   position (f64) ──position_to_coordinate──▶ TemporalCoordinate
//!        ▲                                          │
//!        └──────────coordinate_to_position──────────┘
//!
//!   duration (f64) ──duration_to_extent──▶ TemporalExtent
//!        ▲                                     │
//!        └────────extent_to_duration───────────┘
//! ```
//!
//! plus the canonicalizing operations [`normalize_coordinate`],
//! [`normalize_extent`] and [`extent_between_coordinates`].
//!
//! The engine only borrows its calendar; every operation reads immutable
//! descriptors and builds a fresh value, so one engine can be shared across
//! threads. [`ConversionEngine::default`] uses the Gregorian calendar.
//!
//! # Average-month approximation
//!
//! Month- and year-denominated *durations* are weighted with the average
//! month `days_per_year / months_per_year`. On calendars without an exact
//! metric this is an approximation: one Gregorian month is counted as
//! 30.4167 days, so a single month component is off by up to 2.42 days
//! (February) and a year component by up to one leap day. The engine logs
//! a `debug` event whenever it applies the approximation.
//!
//! [`normalize_coordinate`]: ConversionEngine::normalize_coordinate
//! [`normalize_extent`]: ConversionEngine::normalize_extent
//! [`extent_between_coordinates`]: ConversionEngine::extent_between_coordinates

use crate::calendar::CalendarReferenceSystem;
use crate::clock::{split_carry, Clock};
use crate::coordinate::{CoordinateMetadata, TemporalCoordinate};
use crate::error::{ensure_finite, year_index, TemporalError, TemporalResult};
use crate::extent::TemporalExtent;
use crate::position::PositionReferenceSystem;
use crate::unit::{TemporalUnit, UnitKind};
use qtty::Seconds;

/// Stateless conversions bound to one calendar.
#[derive(Debug, Clone, Copy)]
pub struct ConversionEngine<'c> {
    calendar: &'c CalendarReferenceSystem,
}

impl Default for ConversionEngine<'static> {
    fn default() -> Self {
        Self::new(CalendarReferenceSystem::gregorian())
    }
}

impl<'c> ConversionEngine<'c> {
    #[inline]
    pub const fn new(calendar: &'c CalendarReferenceSystem) -> Self {
        Self { calendar }
    }

    #[inline]
    pub const fn calendar(&self) -> &'c CalendarReferenceSystem {
        self.calendar
    }

    // ═══════════════════════════════════════════════════════════════════
    // Positions
    // ═══════════════════════════════════════════════════════════════════

    /// Places `position` on `trs` and decomposes it into a coordinate.
    ///
    /// Large-scale systems produce a year-only coordinate (the scaled
    /// position truncated toward zero and added to the origin year).
    /// Little-scale systems run the clock from the normalized origin.
    pub fn position_to_coordinate(
        &self,
        position: f64,
        trs: &PositionReferenceSystem,
    ) -> TemporalResult<TemporalCoordinate> {
        ensure_finite(position, "position")?;
        let cal = self.calendar;
        let origin = self.normalize_coordinate(trs.origin())?;
        let unit = trs.unit();
        let scaled = position * unit.scale();

        let mut metadata = CoordinateMetadata {
            trs: Some(trs.name().to_owned()),
            ..CoordinateMetadata::EMPTY
        };

        if trs.is_large_scale() {
            let years = cal.convert(scaled, unit.kind(), UnitKind::Year).trunc();
            let year = origin.year.unwrap_or(0.0) + years + 0.0;
            year_index(year)?;
            metadata.unit = Some(UnitKind::Year);
            tracing::trace!(position, years, "large-scale position");
            return Ok(TemporalCoordinate::from_raw(
                [Some(year), None, None, None, None, None],
                metadata,
            ));
        }

        let seconds = cal.convert(scaled, unit.kind(), UnitKind::Second);
        let mut clock = Clock::new(&origin, cal)?;
        if seconds > 0.0 {
            clock.forward(seconds)?;
        } else if seconds < 0.0 {
            clock.backward(-seconds)?;
        }
        metadata.unit = Some(UnitKind::Second);
        self.normalize_coordinate(&clock.into_coordinate(metadata))
    }

    /// Inverse of [`position_to_coordinate`](Self::position_to_coordinate).
    pub fn coordinate_to_position(
        &self,
        coordinate: &TemporalCoordinate,
        trs: &PositionReferenceSystem,
    ) -> TemporalResult<f64> {
        let unit = trs.unit();
        if unit.scale() == 0.0 {
            return Err(TemporalError::ZeroScaleFactor {
                operation: "coordinate_to_position",
            });
        }
        let cal = self.calendar;
        let origin = self.normalize_coordinate(trs.origin())?;
        let target = self.normalize_coordinate(coordinate)?;

        if trs.is_large_scale() {
            let years = target.year.unwrap_or(0.0) - origin.year.unwrap_or(0.0);
            return Ok(cal.convert(years, UnitKind::Year, unit.kind()) / unit.scale());
        }

        let seconds = self.absolute_seconds(&target)? - self.absolute_seconds(&origin)?;
        Ok(cal.convert(seconds, UnitKind::Second, unit.kind()) / unit.scale())
    }

    /// Seconds from the start of year zero to a normalized coordinate.
    ///
    /// Absent month and day read as 1, the same defaults normalization and
    /// the clock use. Whole years come from the calendar's leap-resolved
    /// year lengths; months are walked within the target year.
    fn absolute_seconds(&self, coordinate: &TemporalCoordinate) -> TemporalResult<f64> {
        let cal = self.calendar;
        let year = year_index(coordinate.year.unwrap_or(0.0).trunc())?;
        let month = coordinate.month.unwrap_or(1.0);
        let day = coordinate.day.unwrap_or(1.0);
        let [.., hour, minute, second] = coordinate.components();

        let mut days = cal.days_before_year(year)?;
        let months = cal.months_for_year(year)?;
        let walked = (month as usize).saturating_sub(1).min(months.len());
        days += months[..walked].iter().map(|&d| f64::from(d)).sum::<f64>();
        days += day;

        Ok(days * cal.seconds_per_day()
            + hour * cal.seconds_per_hour()
            + minute * f64::from(cal.seconds_per_minute())
            + second)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Coordinates
    // ═══════════════════════════════════════════════════════════════════

    /// Canonicalizes a coordinate by propagating carries upward.
    ///
    /// Every component except the second is truncated toward zero. Absent
    /// components stay absent unless a carry moves them off their default
    /// (year 0, month 1, day 1, zero time of day). The `month_of_year` and
    /// `day_of_year` annotations are recomputed.
    pub fn normalize_coordinate(
        &self,
        coordinate: &TemporalCoordinate,
    ) -> TemporalResult<TemporalCoordinate> {
        let cal = self.calendar;
        let months_per_year = f64::from(cal.months_per_year());

        let (minute_carry, second) = split_carry(
            coordinate.second.unwrap_or(0.0),
            f64::from(cal.seconds_per_minute()),
        );
        let (hour_carry, minute) = split_carry(
            coordinate.minute.unwrap_or(0.0).trunc() + minute_carry,
            f64::from(cal.minutes_per_hour()),
        );
        let (day_carry, hour) = split_carry(
            coordinate.hour.unwrap_or(0.0).trunc() + hour_carry,
            f64::from(cal.hours_per_day()),
        );

        let month_index = coordinate.month.unwrap_or(1.0).trunc().max(1.0) - 1.0;
        let mut year = year_index(
            coordinate.year.unwrap_or(0.0).trunc() + (month_index / months_per_year).floor(),
        )?;
        let mut month = (month_index.rem_euclid(months_per_year) + 1.0) as usize;
        let mut day = coordinate.day.unwrap_or(1.0).trunc().max(1.0) + day_carry;

        let mut months = cal.months_for_year(year)?;
        let mut steps = 0_u64;
        loop {
            if month == 1 {
                let mut length: f64 = months.iter().map(|&d| f64::from(d)).sum();
                while day > length {
                    day -= length;
                    year += 1;
                    months = cal.months_for_year(year)?;
                    length = months.iter().map(|&d| f64::from(d)).sum();
                    steps += 1;
                }
            }
            let length = f64::from(months[month - 1]);
            if day <= length {
                break;
            }
            day -= length;
            month += 1;
            steps += 1;
            if month > months.len() {
                month = 1;
                year += 1;
                months = cal.months_for_year(year)?;
            }
        }
        if steps > 0 {
            tracing::trace!(steps, year, month, day, "day overflow resolved");
        }

        let day_of_year = months[..month - 1].iter().sum::<u32>() + day as u32;
        let year = year as f64;
        let month = month as f64;

        let keep = |input: Option<f64>, value: f64, default: f64| {
            (input.is_some() || value != default).then_some(value)
        };
        let components = [
            keep(coordinate.year, year, 0.0),
            keep(coordinate.month, month, 1.0),
            keep(coordinate.day, day, 1.0),
            keep(coordinate.hour, hour, 0.0),
            keep(coordinate.minute, minute, 0.0),
            keep(coordinate.second, second, 0.0),
        ];

        let mut metadata = coordinate.metadata.clone();
        metadata.month_of_year = components[1].map(|m| m as u32);
        metadata.day_of_year = match (components[1], components[2]) {
            (Some(_), Some(_)) => Some(day_of_year),
            _ => None,
        };
        Ok(TemporalCoordinate::from_raw(components, metadata))
    }

    /// Moves a coordinate forward by `seconds ≥ 0`.
    pub fn tick_forward(
        &self,
        coordinate: &TemporalCoordinate,
        seconds: f64,
    ) -> TemporalResult<TemporalCoordinate> {
        self.tick(coordinate, seconds, true)
    }

    /// Moves a coordinate backward by `seconds ≥ 0`.
    pub fn tick_backward(
        &self,
        coordinate: &TemporalCoordinate,
        seconds: f64,
    ) -> TemporalResult<TemporalCoordinate> {
        self.tick(coordinate, seconds, false)
    }

    fn tick(
        &self,
        coordinate: &TemporalCoordinate,
        seconds: f64,
        forward: bool,
    ) -> TemporalResult<TemporalCoordinate> {
        ensure_finite(seconds, "seconds")?;
        if seconds < 0.0 {
            return Err(TemporalError::NegativeDuration(seconds));
        }
        let start = self.normalize_coordinate(coordinate)?;
        let mut clock = Clock::new(&start, self.calendar)?;
        if forward {
            clock.forward(seconds)?;
        } else {
            clock.backward(seconds)?;
        }
        self.normalize_coordinate(&clock.into_coordinate(start.metadata.clone()))
    }

    /// Weekday index in `0..7` under this calendar's leap rules. The first
    /// day of year zero has index 0.
    pub fn day_of_week(&self, coordinate: &TemporalCoordinate) -> TemporalResult<u32> {
        let normalized = self.normalize_coordinate(coordinate)?;
        let [year, month, day, ..] = normalized.components();
        let date = TemporalCoordinate::from_raw(
            [Some(year), Some(month), Some(day), None, None, None],
            CoordinateMetadata::EMPTY,
        );
        let days = (self.absolute_seconds(&date)? / self.calendar.seconds_per_day()).floor() - 1.0;
        Ok(days.rem_euclid(7.0) as u32)
    }

    /// Normalizes a coordinate and fills every annotation, weekday included.
    pub fn annotate(&self, coordinate: &TemporalCoordinate) -> TemporalResult<TemporalCoordinate> {
        let mut normalized = self.normalize_coordinate(coordinate)?;
        normalized.metadata.day_of_week = Some(self.day_of_week(&normalized)?);
        Ok(normalized)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extents
    // ═══════════════════════════════════════════════════════════════════

    /// Decomposes a non-negative scalar duration.
    ///
    /// Months and years are only filled when the calendar has an exact
    /// metric; otherwise the day count absorbs them. Retrograde units are
    /// read by magnitude: extents carry no direction.
    pub fn duration_to_extent(
        &self,
        duration: f64,
        unit: TemporalUnit,
    ) -> TemporalResult<TemporalExtent> {
        ensure_finite(duration, "duration")?;
        if duration < 0.0 {
            return Err(TemporalError::NegativeDuration(duration));
        }
        let seconds =
            self.calendar
                .convert(duration * unit.scale().abs(), unit.kind(), UnitKind::Second);
        Ok(self.decompose(seconds))
    }

    fn decompose(&self, seconds: f64) -> TemporalExtent {
        let cal = self.calendar;
        let (total_minutes, seconds) = split_carry(seconds, f64::from(cal.seconds_per_minute()));
        let (total_hours, minutes) = split_carry(total_minutes, f64::from(cal.minutes_per_hour()));
        let (total_days, hours) = split_carry(total_hours, f64::from(cal.hours_per_day()));

        let (years, months, days) = if cal.has_exact_metric() {
            let (total_months, days) = split_carry(total_days, f64::from(cal.months()[0]));
            let (years, months) = split_carry(total_months, f64::from(cal.months_per_year()));
            (Some(years), Some(months), days)
        } else {
            (None, None, total_days)
        };

        TemporalExtent::from_raw(
            [
                years,
                months,
                None,
                Some(days),
                Some(hours),
                Some(minutes),
                Some(seconds),
            ],
            Some(cal.name().to_owned()),
        )
    }

    /// Total length of an extent in this calendar's seconds.
    ///
    /// Weeks count seven days; months and years use the average month.
    pub fn extent_seconds(&self, extent: &TemporalExtent) -> Seconds {
        let cal = self.calendar;
        let [years, months, weeks, days, hours, minutes, seconds] = extent.components();
        if (years != 0.0 || months != 0.0) && !cal.has_exact_metric() {
            tracing::debug!(
                calendar = cal.name(),
                years,
                months,
                "average-month approximation applied to extent"
            );
        }
        Seconds::new(
            years * cal.seconds_per_year()
                + months * cal.seconds_per_average_month()
                + weeks * 7.0 * cal.seconds_per_day()
                + days * cal.seconds_per_day()
                + hours * cal.seconds_per_hour()
                + minutes * f64::from(cal.seconds_per_minute())
                + seconds,
        )
    }

    /// Collapses an extent into a scalar duration counted in `unit`.
    pub fn extent_to_duration(
        &self,
        extent: &TemporalExtent,
        unit: TemporalUnit,
    ) -> TemporalResult<f64> {
        if unit.scale() == 0.0 {
            return Err(TemporalError::ZeroScaleFactor {
                operation: "extent_to_duration",
            });
        }
        let seconds = self.extent_seconds(extent).value();
        Ok(self.calendar.convert(seconds, UnitKind::Second, unit.kind()) / unit.scale().abs())
    }

    /// Canonical form of an extent: reduced to seconds and re-expanded on
    /// the calendar without its leap rule, so that years, months and weeks
    /// fold into days unless the calendar has an exact metric.
    pub fn normalize_extent(&self, extent: &TemporalExtent) -> TemporalResult<TemporalExtent> {
        let seconds = self.extent_seconds(extent).value();
        let flat = self.calendar.without_leap_rule();
        Ok(ConversionEngine::new(&flat).decompose(seconds))
    }

    /// Non-negative extent between two coordinates.
    ///
    /// The pair is ordered first, so the result does not depend on argument
    /// order. Each coordinate is weighted with full-calendar constants
    /// (average month, base year) before taking the difference.
    pub fn extent_between_coordinates(
        &self,
        start: &TemporalCoordinate,
        end: &TemporalCoordinate,
    ) -> TemporalResult<TemporalExtent> {
        let mut start = self.normalize_coordinate(start)?;
        let mut end = self.normalize_coordinate(end)?;
        if start >= end {
            std::mem::swap(&mut start, &mut end);
        }
        let seconds = (self.weighted_seconds(&end) - self.weighted_seconds(&start)).abs();
        self.duration_to_extent(seconds, TemporalUnit::SECOND)
    }

    fn weighted_seconds(&self, coordinate: &TemporalCoordinate) -> f64 {
        let cal = self.calendar;
        let [year, month, day, hour, minute, second] = coordinate.components();
        day * cal.seconds_per_day()
            + month * cal.seconds_per_average_month()
            + year * cal.seconds_per_year()
            + hour * cal.seconds_per_hour()
            + minute * f64::from(cal.seconds_per_minute())
            + second
    }
}
