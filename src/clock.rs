// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Clock emulator used to carry overflow across calendar units.
//!
//! [`Clock`] owns a decomposed copy of a coordinate and moves it forward or
//! backward by a number of seconds. Seconds, minutes and hours are carried
//! in one division each; the remaining day count is walked month by month
//! because month lengths depend on the (leap-resolved) year.
//!
//! The clock must start from a normalized coordinate. It never hands out a
//! reference to its fields: callers get a fresh coordinate from
//! [`Clock::into_coordinate`].

use crate::calendar::CalendarReferenceSystem;
use crate::coordinate::{CoordinateMetadata, TemporalCoordinate};
use crate::error::{year_index, TemporalResult};
use std::borrow::Cow;

/// Splits `value` into `(carry, remainder)` with `remainder ∈ [0, base)`.
///
/// The carry is floored, so negative values borrow from the next unit.
pub(crate) fn split_carry(value: f64, base: f64) -> (f64, f64) {
    let mut rem = value.rem_euclid(base);
    if rem >= base {
        rem -= base;
    }
    let carry = ((value - rem) / base).round();
    (carry, rem)
}

/// Mutable clock state over one calendar.
pub(crate) struct Clock<'c> {
    calendar: &'c CalendarReferenceSystem,
    months: Cow<'c, [u32]>,
    year: i64,
    month: usize,
    day: f64,
    hour: f64,
    minute: f64,
    second: f64,
}

impl<'c> Clock<'c> {
    /// Loads a normalized coordinate; absent month/day read as 1, absent
    /// time-of-day fields as 0.
    pub(crate) fn new(
        coordinate: &TemporalCoordinate,
        calendar: &'c CalendarReferenceSystem,
    ) -> TemporalResult<Self> {
        let year = year_index(coordinate.year.unwrap_or(0.0).trunc())?;
        let months = calendar.months_for_year(year)?;
        let month = (coordinate.month.unwrap_or(1.0).trunc() as usize).clamp(1, months.len());
        Ok(Self {
            calendar,
            months,
            year,
            month,
            day: coordinate.day.unwrap_or(1.0).trunc().max(1.0),
            hour: coordinate.hour.unwrap_or(0.0).trunc(),
            minute: coordinate.minute.unwrap_or(0.0).trunc(),
            second: coordinate.second.unwrap_or(0.0),
        })
    }

    fn month_length(&self) -> f64 {
        f64::from(self.months[self.month - 1])
    }

    fn year_length(&self) -> f64 {
        self.months.iter().map(|&d| f64::from(d)).sum()
    }

    fn set_year(&mut self, year: i64) -> TemporalResult<()> {
        self.year = year;
        self.months = self.calendar.months_for_year(year)?;
        Ok(())
    }

    /// Moves the clock forward by `seconds ≥ 0`.
    pub(crate) fn forward(&mut self, seconds: f64) -> TemporalResult<()> {
        let days = self.carry_time_of_day(self.second + seconds);
        tracing::trace!(seconds, days, "clock forward");
        self.advance_days(days)
    }

    /// Moves the clock backward by `seconds ≥ 0`.
    pub(crate) fn backward(&mut self, seconds: f64) -> TemporalResult<()> {
        let days = self.carry_time_of_day(self.second - seconds);
        tracing::trace!(seconds, days, "clock backward");
        self.retreat_days(-days)
    }

    /// Stores `total_seconds` into second/minute/hour, returning the signed
    /// day carry.
    fn carry_time_of_day(&mut self, total_seconds: f64) -> f64 {
        let cal = self.calendar;
        let (minutes, second) = split_carry(total_seconds, f64::from(cal.seconds_per_minute()));
        let (hours, minute) = split_carry(self.minute + minutes, f64::from(cal.minutes_per_hour()));
        let (days, hour) = split_carry(self.hour + hours, f64::from(cal.hours_per_day()));
        self.second = second;
        self.minute = minute;
        self.hour = hour;
        days
    }

    fn advance_days(&mut self, mut remaining: f64) -> TemporalResult<()> {
        while remaining > 0.0 {
            if self.month == 1 && self.day == 1.0 {
                let mut length = self.year_length();
                while remaining >= length {
                    remaining -= length;
                    self.set_year(self.year + 1)?;
                    length = self.year_length();
                }
                if remaining == 0.0 {
                    break;
                }
            }
            let left = self.month_length() - self.day;
            if remaining <= left {
                self.day += remaining;
                remaining = 0.0;
            } else {
                remaining -= left + 1.0;
                self.day = 1.0;
                self.month += 1;
                if self.month > self.months.len() {
                    self.month = 1;
                    self.set_year(self.year + 1)?;
                }
            }
        }
        Ok(())
    }

    fn retreat_days(&mut self, mut remaining: f64) -> TemporalResult<()> {
        while remaining > 0.0 {
            if self.month == self.months.len() && self.day == self.month_length() {
                let mut length = self.year_length();
                while remaining >= length {
                    remaining -= length;
                    self.set_year(self.year - 1)?;
                    length = self.year_length();
                }
                self.day = self.month_length();
                if remaining == 0.0 {
                    break;
                }
            }
            if remaining < self.day {
                self.day -= remaining;
                remaining = 0.0;
            } else {
                remaining -= self.day;
                self.month -= 1;
                if self.month == 0 {
                    self.set_year(self.year - 1)?;
                    self.month = self.months.len();
                }
                self.day = self.month_length();
            }
        }
        Ok(())
    }

    pub(crate) fn into_coordinate(self, metadata: CoordinateMetadata) -> TemporalCoordinate {
        TemporalCoordinate::from_raw(
            [
                Some(self.year as f64),
                Some(self.month as f64),
                Some(self.day),
                Some(self.hour),
                Some(self.minute),
                Some(self.second),
            ],
            metadata,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_at(c: &TemporalCoordinate) -> Clock<'static> {
        Clock::new(c, CalendarReferenceSystem::gregorian()).unwrap()
    }

    fn coord(y: f64, mo: f64, d: f64, h: f64, mi: f64, s: f64) -> TemporalCoordinate {
        TemporalCoordinate::new(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_split_carry() {
        assert_eq!(split_carry(125.0, 60.0), (2.0, 5.0));
        assert_eq!(split_carry(-1.0, 60.0), (-1.0, 59.0));
        assert_eq!(split_carry(0.0, 60.0), (0.0, 0.0));
        let (carry, rem) = split_carry(61.25, 60.0);
        assert_eq!(carry, 1.0);
        assert!((rem - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_forward_reaches_leap_day() {
        let start = coord(2024.0, 2.0, 28.0, 23.0, 59.0, 0.0);
        let mut clock = clock_at(&start);
        clock.forward(120.0).unwrap();
        let end = clock.into_coordinate(Default::default());
        assert_eq!(end, coord(2024.0, 2.0, 29.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_forward_skips_absent_leap_day() {
        let start = coord(2023.0, 2.0, 28.0, 23.0, 59.0, 0.0);
        let mut clock = clock_at(&start);
        clock.forward(120.0).unwrap();
        let end = clock.into_coordinate(Default::default());
        assert_eq!(end, coord(2023.0, 3.0, 1.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_forward_whole_years() {
        let start = coord(2023.0, 1.0, 1.0, 0.0, 0.0, 0.0);
        let mut clock = clock_at(&start);
        clock.forward((365.0 + 366.0) * 86_400.0).unwrap();
        let end = clock.into_coordinate(Default::default());
        assert_eq!(end, coord(2025.0, 1.0, 1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_backward_lands_on_last_day_of_previous_month() {
        let start = coord(2024.0, 3.0, 1.0, 0.0, 0.0, 30.0);
        let mut clock = clock_at(&start);
        clock.backward(60.0).unwrap();
        let end = clock.into_coordinate(Default::default());
        assert_eq!(end, coord(2024.0, 2.0, 29.0, 23.0, 59.0, 30.0));
    }

    #[test]
    fn test_backward_across_year() {
        let start = coord(2024.0, 1.0, 1.0, 0.0, 0.0, 0.0);
        let mut clock = clock_at(&start);
        clock.backward(86_400.0 * 366.0).unwrap();
        let end = clock.into_coordinate(Default::default());
        assert_eq!(end, coord(2022.0, 12.0, 31.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_fractional_seconds_carry() {
        let start = coord(1970.0, 1.0, 1.0, 0.0, 0.0, 0.0);
        let mut clock = clock_at(&start);
        clock.forward(59.5).unwrap();
        clock.forward(1.0).unwrap();
        let end = clock.into_coordinate(Default::default());
        assert_eq!(end.minute(), Some(1.0));
        assert!((end.second().unwrap() - 0.5).abs() < 1e-12);
    }
}
