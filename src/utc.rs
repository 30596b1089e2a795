// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Conversions between [`TemporalCoordinate`] and `chrono::DateTime<Utc>`.
//!
//! The bridge goes through [`PositionReferenceSystem::unix_time`] on the
//! Gregorian calendar. Leap seconds are not modelled, matching chrono's
//! Unix timestamps. Because the Gregorian leap rule is inactive before
//! 1582, results differ from chrono's proleptic calendar for earlier dates.

use crate::conversion::ConversionEngine;
use crate::coordinate::TemporalCoordinate;
use crate::error::TemporalResult;
use crate::position::PositionReferenceSystem;
use chrono::{DateTime, Utc};
use qtty::Seconds;

/// Seconds since the Unix epoch, sub-second precision included.
pub fn unix_seconds(datetime: DateTime<Utc>) -> Seconds {
    Seconds::new(datetime.timestamp() as f64)
        + Seconds::new(datetime.timestamp_subsec_nanos() as f64 / 1e9)
}

impl TemporalCoordinate {
    /// Decomposes a UTC timestamp on the Gregorian calendar.
    pub fn from_utc(datetime: DateTime<Utc>) -> TemporalResult<Self> {
        ConversionEngine::default().position_to_coordinate(
            unix_seconds(datetime).value(),
            &PositionReferenceSystem::unix_time(),
        )
    }

    /// Reads this coordinate as a Gregorian UTC timestamp.
    ///
    /// Returns `None` if the coordinate cannot be placed on the Unix axis or
    /// falls outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let seconds = ConversionEngine::default()
            .coordinate_to_position(self, &PositionReferenceSystem::unix_time())
            .ok()?;
        let secs = seconds.floor() as i64;
        let nanos = ((seconds - secs as f64) * 1e9).round() as u32;
        if nanos >= 1_000_000_000 {
            return DateTime::<Utc>::from_timestamp(secs + 1, 0);
        }
        DateTime::<Utc>::from_timestamp(secs, nanos)
    }
}
