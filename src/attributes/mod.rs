//! # Physical and orbital attributes
//!
//! Name-keyed attributes (diameter, a, e, i) recovered from a loosely structured
//! TNO / Centaur physical-properties table.
//!
//! ## Overview
//! -----------------
//! * [`AttributeInfo`] – Optional values found for one body.
//! * [`AttributeTable`] – Lowercased name → [`AttributeInfo`] map, with the
//!   id fallbacks used when joining position objects.
//! * [`attribute_reader`] – The heuristic line extractor.
//!
//! ## Confidence
//! -----------------
//! Presence and values are heuristic. The orbital elements in particular are
//! assigned by position in the line, not by label, and must be treated as
//! low-confidence.
pub mod attribute_reader;

use std::collections::HashMap;

use ahash::RandomState;

use crate::constants::{AstronomicalUnit, Degree, Kilometer};

/// Values extracted for one body, every field optional.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttributeInfo {
    pub diameter_km: Option<Kilometer>,
    pub semimajor_axis_au: Option<AstronomicalUnit>,
    pub eccentricity: Option<f64>,
    pub inclination_deg: Option<Degree>,
}

impl AttributeInfo {
    /// `true` when no field was extracted.
    pub fn is_empty(&self) -> bool {
        self.diameter_km.is_none()
            && self.semimajor_axis_au.is_none()
            && self.eccentricity.is_none()
            && self.inclination_deg.is_none()
    }

    /// `(a, e, i)` when all three elements were extracted.
    pub fn elements(&self) -> Option<(AstronomicalUnit, f64, Degree)> {
        Some((
            self.semimajor_axis_au?,
            self.eccentricity?,
            self.inclination_deg?,
        ))
    }
}

/// Attribute entries keyed by lowercased body name.
#[derive(Debug, Clone, Default)]
pub struct AttributeTable {
    entries: HashMap<String, AttributeInfo, RandomState>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry; the name is lowercased, and a later entry for the
    /// same name replaces the earlier one.
    pub fn insert(&mut self, name: &str, info: AttributeInfo) {
        self.entries.insert(name.to_lowercase(), info);
    }

    pub fn get(&self, name: &str) -> Option<&AttributeInfo> {
        self.entries.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the attributes of a position object from its id.
    ///
    /// The lowercased id is tried first. Failing that, `_` and `-` are
    /// turned into spaces and the first resulting word is tried, so that
    /// `eris_barycenter` still finds `eris`.
    pub fn lookup(&self, object_id: &str) -> Option<&AttributeInfo> {
        let lowered = object_id.to_lowercase();
        if let Some(info) = self.entries.get(&lowered) {
            return Some(info);
        }
        let simple = lowered.replace(['_', '-'], " ");
        let first = simple.split_whitespace().next()?;
        self.entries.get(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_fallbacks() {
        let mut table = AttributeTable::new();
        table.insert(
            "Eris",
            AttributeInfo {
                diameter_km: Some(2326.0),
                ..Default::default()
            },
        );

        assert_eq!(table.lookup("ERIS").unwrap().diameter_km, Some(2326.0));
        assert_eq!(
            table.lookup("eris_barycenter").unwrap().diameter_km,
            Some(2326.0)
        );
        assert_eq!(table.lookup("Eris-2").unwrap().diameter_km, Some(2326.0));
        assert!(table.lookup("sedna").is_none());
        assert!(table.lookup("").is_none());
    }

    #[test]
    fn test_elements_need_all_three() {
        let partial = AttributeInfo {
            semimajor_axis_au: Some(67.8),
            eccentricity: Some(0.44),
            ..Default::default()
        };
        assert!(partial.elements().is_none());
        assert!(!partial.is_empty());
        assert!(AttributeInfo::default().is_empty());

        let full = AttributeInfo {
            inclination_deg: Some(44.0),
            ..partial
        };
        assert_eq!(full.elements(), Some((67.8, 0.44, 44.0)));
    }
}
