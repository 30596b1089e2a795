// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-agnostic temporal arithmetic.
//!
//! This crate converts between three representations of time and keeps them
//! consistent under any calendar, Earth-like or not.
//!
//! # Core types
//!
//! - [`TemporalUnit`]: a [`UnitKind`] with a real scale factor (negative for
//!   "ago" units, fractional for non-Earth days).
//! - [`CalendarReferenceSystem`]: clock metrics, month table and an optional
//!   [`LeapYearRule`].
//! - [`PositionReferenceSystem`]: origin, unit and scale flag giving meaning
//!   to a scalar position.
//! - [`TemporalCoordinate`]: a point in time decomposed into six optional
//!   components.
//! - [`TemporalExtent`]: a non-negative duration decomposed into seven
//!   optional components.
//! - [`ConversionEngine`]: every conversion and normalization, bound to one
//!   calendar.
//! - [`OrdinalReferenceSystem`] / [`Era`]: named eras and their hierarchy.
//! - [`RelationGraph`] and [`transitive_closure`]: the cycle-safe closure
//!   primitive behind hierarchy queries.
//! - [`TrsRegistry`]: an add-only, thread-safe table of named systems.
//!
//! # Built-in systems
//!
//! | Name | Kind | Notes |
//! |------|------|-------|
//! | `gregorian` | calendar | leap rule active from 1582 |
//! | `julian` | calendar | every fourth year |
//! | `unix-time` | position | seconds since 1970-01-01, little scale |
//! | `geologic-time` | position | million years before 1950, large scale |
//!
//! # Example
//!
//! ```
//! use chronoframe::{ConversionEngine, PositionReferenceSystem, TemporalCoordinate};
//!
//! let engine = ConversionEngine::default();
//! let unix = PositionReferenceSystem::unix_time();
//!
//! let c = engine.position_to_coordinate(951_782_400.0, &unix).unwrap();
//! assert_eq!(c, TemporalCoordinate::new(2000.0, 2.0, 29.0, 0.0, 0.0, 0.0).unwrap());
//!
//! let later = engine.tick_forward(&c, 86_400.0).unwrap();
//! assert_eq!(later.to_string(), "2000-03-01T00:00:00");
//! ```

mod calendar;
mod clock;
mod closure;
mod conversion;
mod coordinate;
mod era;
mod error;
mod extent;
mod position;
mod registry;
mod unit;
mod utc;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{
    CalendarBuilder, CalendarReferenceSystem, GregorianLeapRule, JulianLeapRule, LeapRuleFn,
    LeapYearRule, GREGORIAN_REFORM_YEAR, STANDARD_MONTHS,
};
pub use closure::{transitive_closure, RelationGraph};
pub use conversion::ConversionEngine;
pub use coordinate::{CoordinateMetadata, TemporalCoordinate};
pub use era::{Era, OrdinalReferenceSystem};
pub use error::{TemporalError, TemporalResult};
pub use extent::TemporalExtent;
pub use position::{PositionBuilder, PositionReferenceSystem};
pub use registry::TrsRegistry;
pub use unit::{TemporalUnit, UnitKind};
pub use utc::unix_seconds;
