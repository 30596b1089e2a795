// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Ordinal reference systems.
//!
//! An [`OrdinalReferenceSystem`] is a set of named [`Era`]s plus a
//! membership relation (`super → sub`), e.g. an eon containing eras that
//! contain periods. Hierarchy queries go through
//! [`transitive_closure`](crate::transitive_closure).
//!
//! Era bounds are compared with the coordinate total order, so bounds and
//! query coordinates should be normalized under the same calendar.

use crate::closure::RelationGraph;
use crate::coordinate::TemporalCoordinate;
use crate::error::{TemporalError, TemporalResult};
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named half-open interval `[begin, end)`; an absent bound is open.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Era {
    pub name: String,
    pub begin: Option<TemporalCoordinate>,
    pub end: Option<TemporalCoordinate>,
}

impl Era {
    pub fn new(
        name: impl Into<String>,
        begin: Option<TemporalCoordinate>,
        end: Option<TemporalCoordinate>,
    ) -> Self {
        Self {
            name: name.into(),
            begin,
            end,
        }
    }

    /// `true` if `begin <= coordinate < end`.
    pub fn contains(&self, coordinate: &TemporalCoordinate) -> bool {
        self.begin.as_ref().map_or(true, |b| b <= coordinate)
            && self.end.as_ref().map_or(true, |e| coordinate < e)
    }

    /// `true` if the two eras share at least one instant. Touching bounds
    /// do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        let starts_before_other_ends = match (&self.begin, &other.end) {
            (Some(b), Some(e)) => b < e,
            _ => true,
        };
        let ends_after_other_starts = match (&self.end, &other.begin) {
            (Some(e), Some(b)) => b < e,
            _ => true,
        };
        starts_before_other_ends && ends_after_other_starts
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.name)?;
        match &self.begin {
            Some(b) => write!(f, "{b}")?,
            None => f.write_str("..")?,
        }
        f.write_str(", ")?;
        match &self.end {
            Some(e) => write!(f, "{e}")?,
            None => f.write_str("..")?,
        }
        f.write_str(")")
    }
}

/// Named eras and their containment hierarchy.
#[derive(Debug, Clone, Default)]
pub struct OrdinalReferenceSystem {
    name: String,
    eras: BTreeMap<String, Era>,
    members: RelationGraph<String>,
}

impl OrdinalReferenceSystem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds or replaces an era. Membership edges are kept.
    pub fn add_era(&mut self, era: Era) {
        tracing::debug!(ors = %self.name, era = %era.name, "era added");
        self.eras.insert(era.name.clone(), era);
    }

    /// Records `sub` as a direct member of `parent`.
    pub fn add_member(&mut self, parent: &str, sub: &str) -> TemporalResult<()> {
        for name in [parent, sub] {
            if !self.eras.contains_key(name) {
                return Err(TemporalError::UnknownEra(name.to_owned()));
            }
        }
        self.members.insert(parent.to_owned(), sub.to_owned());
        Ok(())
    }

    pub fn era(&self, name: &str) -> Option<&Era> {
        self.eras.get(name)
    }

    /// Eras sorted by name.
    pub fn eras(&self) -> impl Iterator<Item = &Era> {
        self.eras.values()
    }

    /// Eras contained in `era`, directly or through intermediate eras.
    pub fn sub_eras(&self, era: &str, transitive: bool) -> TemporalResult<Vec<&Era>> {
        self.walk(era, transitive, false)
    }

    /// Eras that contain `era`, directly or through intermediate eras.
    pub fn super_eras(&self, era: &str, transitive: bool) -> TemporalResult<Vec<&Era>> {
        self.walk(era, transitive, true)
    }

    fn walk(&self, era: &str, transitive: bool, upward: bool) -> TemporalResult<Vec<&Era>> {
        if !self.eras.contains_key(era) {
            return Err(TemporalError::UnknownEra(era.to_owned()));
        }
        let start = era.to_owned();
        let names = if upward {
            self.members.inverse_closure(&start, transitive)
        } else {
            self.members.closure(&start, transitive)
        };
        Ok(names.iter().filter_map(|n| self.eras.get(n)).collect())
    }

    /// Every era whose interval holds `coordinate`, sorted by name.
    pub fn eras_containing(&self, coordinate: &TemporalCoordinate) -> Vec<&Era> {
        self.eras
            .values()
            .filter(|era| era.contains(coordinate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(y: f64) -> Option<TemporalCoordinate> {
        Some(TemporalCoordinate::from_year(y).unwrap())
    }

    fn names(eras: Vec<&Era>) -> Vec<&str> {
        eras.into_iter().map(|e| e.name.as_str()).collect()
    }

    fn dynasties() -> OrdinalReferenceSystem {
        let mut ors = OrdinalReferenceSystem::new("china");
        ors.add_era(Era::new("imperial", year(221.0), year(1912.0)));
        ors.add_era(Era::new("han", year(206.0), year(220.0)));
        ors.add_era(Era::new("tang", year(618.0), year(907.0)));
        ors.add_era(Era::new("kaiyuan", year(713.0), year(741.0)));
        ors.add_member("imperial", "tang").unwrap();
        ors.add_member("tang", "kaiyuan").unwrap();
        ors
    }

    #[test]
    fn test_contains_is_half_open() {
        let era = Era::new("tang", year(618.0), year(907.0));
        assert!(era.contains(&year(618.0).unwrap()));
        assert!(era.contains(&year(906.0).unwrap()));
        assert!(!era.contains(&year(907.0).unwrap()));

        let open = Era::new("modern", year(1912.0), None);
        assert!(open.contains(&year(3000.0).unwrap()));
    }

    #[test]
    fn test_overlaps() {
        let a = Era::new("a", year(0.0), year(10.0));
        let b = Era::new("b", year(10.0), year(20.0));
        let c = Era::new("c", year(5.0), None);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(b.overlaps(&c));
    }

    #[test]
    fn test_sub_and_super_eras() {
        let ors = dynasties();
        assert_eq!(names(ors.sub_eras("imperial", false).unwrap()), vec!["tang"]);
        assert_eq!(
            names(ors.sub_eras("imperial", true).unwrap()),
            vec!["tang", "kaiyuan"]
        );
        assert_eq!(
            names(ors.super_eras("kaiyuan", true).unwrap()),
            vec!["tang", "imperial"]
        );
        assert!(ors.sub_eras("han", true).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_era() {
        let mut ors = dynasties();
        assert_eq!(
            ors.add_member("imperial", "song").unwrap_err(),
            TemporalError::UnknownEra("song".into())
        );
        assert!(ors.sub_eras("ming", true).is_err());
    }

    #[test]
    fn test_cyclic_membership_terminates() {
        let mut ors = dynasties();
        ors.add_member("kaiyuan", "imperial").unwrap();
        let subs = names(ors.sub_eras("imperial", true).unwrap());
        assert_eq!(subs, vec!["tang", "kaiyuan", "imperial"]);
    }

    #[test]
    fn test_eras_containing() {
        let ors = dynasties();
        let hits = names(ors.eras_containing(&year(720.0).unwrap()));
        assert_eq!(hits, vec!["imperial", "kaiyuan", "tang"]);
        assert!(ors.eras_containing(&year(100.0).unwrap()).is_empty());
    }

    #[test]
    fn test_display() {
        let era = Era::new("modern", year(1912.0), None);
        assert_eq!(era.to_string(), "modern [1912-----T--:--:--, ..)");
    }
}
