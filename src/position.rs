// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Position reference systems.
//!
//! A [`PositionReferenceSystem`] gives meaning to a scalar position: it is a
//! distance from an origin coordinate, counted in a [`TemporalUnit`], read
//! either with full clock semantics (little scale) or year granularity
//! (large scale).
//!
//! | System | Origin | Unit | Scale |
//! |--------|--------|------|-------|
//! | [`PositionReferenceSystem::unix_time`] | 1970-01-01T00:00:00 | second | little |
//! | [`PositionReferenceSystem::geologic_time`] | 1950-01-01T00:00:00 | million years ago | large |

use crate::coordinate::TemporalCoordinate;
use crate::error::{TemporalError, TemporalResult};
use crate::unit::TemporalUnit;
use std::fmt;

/// An epoch, a unit and a scale flag.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionReferenceSystem {
    name: String,
    origin: TemporalCoordinate,
    unit: TemporalUnit,
    large_scale: bool,
}

impl PositionReferenceSystem {
    pub fn new(
        name: impl Into<String>,
        origin: TemporalCoordinate,
        unit: TemporalUnit,
        large_scale: bool,
    ) -> Self {
        Self {
            name: name.into(),
            origin,
            unit,
            large_scale,
        }
    }

    pub fn builder(name: impl Into<String>) -> PositionBuilder {
        PositionBuilder {
            name: name.into(),
            origin: None,
            unit: None,
            large_scale: false,
        }
    }

    /// Seconds since 1970-01-01T00:00:00.
    pub fn unix_time() -> Self {
        Self::new(
            "unix-time",
            TemporalCoordinate::from_raw(
                [Some(1970.0), Some(1.0), Some(1.0), Some(0.0), Some(0.0), Some(0.0)],
                Default::default(),
            ),
            TemporalUnit::SECOND,
            false,
        )
    }

    /// Millions of years before 1950-01-01T00:00:00.
    pub fn geologic_time() -> Self {
        Self::new(
            "geologic-time",
            TemporalCoordinate::from_raw(
                [Some(1950.0), Some(1.0), Some(1.0), Some(0.0), Some(0.0), Some(0.0)],
                Default::default(),
            ),
            TemporalUnit::MILLION_YEARS_AGO,
            true,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> &TemporalCoordinate {
        &self.origin
    }

    pub const fn unit(&self) -> TemporalUnit {
        self.unit
    }

    /// `true` when only the year dimension is meaningful.
    pub const fn is_large_scale(&self) -> bool {
        self.large_scale
    }
}

impl fmt::Display for PositionReferenceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} since {}, {} scale)",
            self.name,
            self.unit,
            self.origin,
            if self.large_scale { "large" } else { "little" }
        )
    }
}

/// Builder for [`PositionReferenceSystem`]; origin and unit are required.
#[derive(Debug, Clone)]
pub struct PositionBuilder {
    name: String,
    origin: Option<TemporalCoordinate>,
    unit: Option<TemporalUnit>,
    large_scale: bool,
}

impl PositionBuilder {
    pub fn origin(mut self, origin: TemporalCoordinate) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn unit(mut self, unit: TemporalUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn large_scale(mut self, large_scale: bool) -> Self {
        self.large_scale = large_scale;
        self
    }

    pub fn build(self) -> TemporalResult<PositionReferenceSystem> {
        let origin = self.origin.ok_or(TemporalError::MissingOrigin)?;
        let unit = self.unit.ok_or(TemporalError::MissingUnit)?;
        Ok(PositionReferenceSystem::new(
            self.name,
            origin,
            unit,
            self.large_scale,
        ))
    }
}
