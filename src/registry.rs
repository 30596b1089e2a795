// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Named units and reference systems.
//!
//! A [`TrsRegistry`] is an explicit, shareable lookup table. Entries are
//! add-only: a name, once registered, always resolves to the same value.
//! Each table sits behind its own [`parking_lot::RwLock`], so a lookup never
//! observes a partially inserted entry and concurrent registration from
//! several threads is safe.
//!
//! ```
//! use chronoframe::{TemporalUnit, TrsRegistry, UnitKind};
//!
//! let registry = TrsRegistry::with_builtins();
//! assert!(registry.calendar("gregorian").is_some());
//!
//! registry
//!     .register_unit("fortnight", TemporalUnit::new(UnitKind::Day, 14.0))
//!     .unwrap();
//! assert_eq!(registry.unit("fortnight").unwrap().scale(), 14.0);
//! assert!(registry.unit("lustrum").is_none());
//! ```

use crate::calendar::CalendarReferenceSystem;
use crate::error::{TemporalError, TemporalResult};
use crate::position::PositionReferenceSystem;
use crate::unit::TemporalUnit;
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

/// Add-only table of units, calendars and position systems.
#[derive(Debug, Default)]
pub struct TrsRegistry {
    units: RwLock<HashMap<String, TemporalUnit>>,
    calendars: RwLock<HashMap<String, Arc<CalendarReferenceSystem>>>,
    positions: RwLock<HashMap<String, Arc<PositionReferenceSystem>>>,
}

fn insert_once<V>(
    table: &RwLock<HashMap<String, V>>,
    kind: &'static str,
    name: String,
    value: V,
) -> TemporalResult<()> {
    let mut table = table.write();
    match table.entry(name) {
        Entry::Occupied(entry) => Err(TemporalError::AlreadyRegistered {
            kind,
            name: entry.key().clone(),
        }),
        Entry::Vacant(entry) => {
            tracing::debug!(kind, name = %entry.key(), "registered");
            entry.insert(value);
            Ok(())
        }
    }
}

fn sorted_names<V>(table: &RwLock<HashMap<String, V>>) -> Vec<String> {
    let mut names: Vec<String> = table.read().keys().cloned().collect();
    names.sort_unstable();
    names
}

impl TrsRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the Gregorian and Julian calendars, the Unix and
    /// geologic position systems, and every built-in unit.
    pub fn with_builtins() -> Self {
        let mut units = HashMap::new();
        for (name, unit) in TemporalUnit::BUILTINS {
            units.insert(name.to_owned(), unit);
        }

        let mut calendars = HashMap::new();
        for calendar in [
            CalendarReferenceSystem::gregorian(),
            CalendarReferenceSystem::julian(),
        ] {
            calendars.insert(calendar.name().to_owned(), Arc::new(calendar.clone()));
        }

        let mut positions = HashMap::new();
        for position in [
            PositionReferenceSystem::unix_time(),
            PositionReferenceSystem::geologic_time(),
        ] {
            positions.insert(position.name().to_owned(), Arc::new(position));
        }

        Self {
            units: RwLock::new(units),
            calendars: RwLock::new(calendars),
            positions: RwLock::new(positions),
        }
    }

    // ── units ─────────────────────────────────────────────────────────

    pub fn register_unit(&self, name: impl Into<String>, unit: TemporalUnit) -> TemporalResult<()> {
        insert_once(&self.units, "unit", name.into(), unit)
    }

    pub fn unit(&self, name: &str) -> Option<TemporalUnit> {
        self.units.read().get(name).copied()
    }

    pub fn contains_unit(&self, name: &str) -> bool {
        self.units.read().contains_key(name)
    }

    pub fn unit_names(&self) -> Vec<String> {
        sorted_names(&self.units)
    }

    // ── calendars ─────────────────────────────────────────────────────

    /// Registers a calendar under its own name.
    pub fn register_calendar(&self, calendar: CalendarReferenceSystem) -> TemporalResult<()> {
        let name = calendar.name().to_owned();
        insert_once(&self.calendars, "calendar", name, Arc::new(calendar))
    }

    pub fn calendar(&self, name: &str) -> Option<Arc<CalendarReferenceSystem>> {
        self.calendars.read().get(name).cloned()
    }

    pub fn contains_calendar(&self, name: &str) -> bool {
        self.calendars.read().contains_key(name)
    }

    pub fn calendar_names(&self) -> Vec<String> {
        sorted_names(&self.calendars)
    }

    // ── position systems ──────────────────────────────────────────────

    /// Registers a position system under its own name.
    pub fn register_position(&self, position: PositionReferenceSystem) -> TemporalResult<()> {
        let name = position.name().to_owned();
        insert_once(&self.positions, "position", name, Arc::new(position))
    }

    pub fn position(&self, name: &str) -> Option<Arc<PositionReferenceSystem>> {
        self.positions.read().get(name).cloned()
    }

    pub fn contains_position(&self, name: &str) -> bool {
        self.positions.read().contains_key(name)
    }

    pub fn position_names(&self) -> Vec<String> {
        sorted_names(&self.positions)
    }
}
