//! # Unified time grid
//!
//! Builds the single time axis on which every object is resampled.
//!
//! ## Construction
//! -----------------
//! 1. Union of every observed epoch of every object.
//! 2. Ascending sort, then removal of values closer than [`TIME_EPS`] to the
//!    previously kept one.
//! 3. When a maximum cardinality is configured and exceeded, uniform
//!    **index-based** downsampling: evenly spaced positions of the sorted grid
//!    are kept, the first and last always included. Instants are discarded,
//!    never averaged.
//!
//! ## Invariants
//! -----------------
//! * strictly ascending, no two values within [`TIME_EPS`];
//! * `len() <= max_points` whenever a cap is set.
use itertools::Itertools;
use serde::Serialize;

use crate::{
    constants::{JD, TIME_EPS},
    positions::ObjectRecord,
};

/// Sorted, deduplicated epochs shared read-only by the resampler.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct TimeGrid {
    times: Vec<JD>,
}

impl TimeGrid {
    /// Build the grid from raw epochs.
    ///
    /// Arguments
    /// -----------------
    /// * `times` – Any epochs, any order, duplicates allowed.
    /// * `max_points` – Optional cap on the grid length. A cap below 2 is
    ///   raised to 2 so that both ends survive.
    ///
    /// Return
    /// ----------
    /// * The unified grid.
    pub fn from_times(times: impl IntoIterator<Item = JD>, max_points: Option<usize>) -> Self {
        let unique: Vec<JD> = times
            .into_iter()
            .sorted_by(|a, b| a.total_cmp(b))
            .dedup_by(|a, b| (a - b).abs() <= TIME_EPS)
            .collect();

        let times = match max_points {
            Some(max) if unique.len() > max => downsample_indices(unique.len(), max)
                .into_iter()
                .map(|i| unique[i])
                .collect(),
            _ => unique,
        };

        TimeGrid { times }
    }

    /// Build the grid from every record's observed epochs.
    pub fn from_records(records: &[ObjectRecord], max_points: Option<usize>) -> Self {
        Self::from_times(
            records
                .iter()
                .flat_map(|r| r.series.times.iter().copied()),
            max_points,
        )
    }

    pub fn as_slice(&self) -> &[JD] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn first(&self) -> Option<JD> {
        self.times.first().copied()
    }

    pub fn last(&self) -> Option<JD> {
        self.times.last().copied()
    }
}

/// Evenly spaced positions in `0..len`, `max` of them, first and last included.
///
/// Position `i` maps to `round(i * (len - 1) / (max - 1))`; repeated
/// positions are kept once.
pub fn downsample_indices(len: usize, max: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let max = max.max(2);
    if len <= max {
        return (0..len).collect();
    }

    let span = len - 1;
    let steps = max - 1;
    (0..max)
        .map(|i| (i * span + steps / 2) / steps)
        .dedup()
        .collect()
}
