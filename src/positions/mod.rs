//! # Per-object position series
//!
//! Raw ephemeris samples as read from one position table, before any alignment.
//!
//! ## Overview
//! -----------------
//! * [`RawSeries`] – Samples `(time, position)` in file order, neither sorted nor deduplicated.
//! * [`ObjectRecord`] – One discovered object: id, category and its raw series.
//! * [`position_reader`] – Tolerant text-table decoder producing a [`RawSeries`].
//! * [`discovery`] – Data-directory walk yielding [`ObjectSource`](discovery::ObjectSource)s.
//!
//! ## See also
//! ------------
//! * [`crate::time_grid::TimeGrid`] – Consumes every record's time stamps.
//! * [`crate::resample::resample_object`] – Projects a record onto the unified grid.
pub mod discovery;
pub mod position_reader;

use nalgebra::Vector3;

use crate::{
    constants::{JD, TIME_EPS},
    positions::{discovery::ObjectSource, position_reader::PositionFormat},
    scene_errors::SceneError,
};

/// Time-ordered-as-read sequence of position samples of one object.
///
/// Fields
/// -----------------
/// * `times` – Sample epochs (JD TDB), file order.
/// * `positions` – Cartesian positions, index-aligned with `times`, units as found in the file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSeries {
    pub times: Vec<JD>,
    pub positions: Vec<Vector3<f64>>,
}

impl RawSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample at the end of the series.
    pub fn push(&mut self, time: JD, position: Vector3<f64>) {
        self.times.push(time);
        self.positions.push(position);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Copy of the series sorted by ascending time.
    ///
    /// The sort is stable, and when several samples share a time (within
    /// [`TIME_EPS`]) only the first one read is kept.
    ///
    /// Return
    /// ----------
    /// * A new [`RawSeries`] whose `times` are strictly ascending.
    pub fn sorted_unique(&self) -> RawSeries {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| self.times[a].total_cmp(&self.times[b]));

        let mut out = RawSeries::new();
        for idx in order {
            let t = self.times[idx];
            if let Some(&last) = out.times.last() {
                if (t - last).abs() <= TIME_EPS {
                    continue;
                }
            }
            out.push(t, self.positions[idx]);
        }
        out
    }

    /// Smallest and largest observed time, `None` for an empty series.
    pub fn time_span(&self) -> Option<(JD, JD)> {
        self.times.iter().fold(None, |acc, &t| match acc {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        })
    }
}

/// A discovered object together with its parsed positions.
///
/// `id` is the source file stem (case preserved); `category` is the
/// grouping used for coloring and subsampling. Records are never mutated
/// once created.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecord {
    pub id: String,
    pub category: String,
    pub series: RawSeries,
}

impl ObjectRecord {
    pub fn new(id: impl Into<String>, category: impl Into<String>, series: RawSeries) -> Self {
        ObjectRecord {
            id: id.into(),
            category: category.into(),
            series,
        }
    }

    /// Read the position table behind `source` and build the record.
    ///
    /// Arguments
    /// -----------------
    /// * `source` – Discovered file with its id and category.
    /// * `format` – Column schema used to decode each line.
    ///
    /// Return
    /// ----------
    /// * The record, or [`SceneError::NoPositionData`] when no line qualified.
    pub fn load(source: &ObjectSource, format: &PositionFormat) -> Result<Self, SceneError> {
        let series = position_reader::parse_position_table(&source.path, format)?;
        Ok(ObjectRecord::new(&source.id, &source.category, series))
    }
}
