//! # Piecewise-linear resampling
//!
//! Projects one object's raw trajectory onto the unified [`TimeGrid`].
//!
//! ## Policy (per grid epoch `t`, per component)
//! -----------------
//! * `t` outside `[min(times), max(times)]` → `None`. There is no extrapolation,
//!   not even by [`TIME_EPS`] past an end point.
//! * `t` within [`TIME_EPS`] of an observed epoch → the observed value, bit for bit.
//! * otherwise → `v0 + (t - t0) / (t1 - t0) * (v1 - v0)` between the bracketing samples.
//!
//! X, Y and Z are interpolated independently through the same [`interpolate`]
//! routine; they share bracket indices only because they share the epochs.
//!
//! Missing samples are `None`, never a numeric placeholder.
use crate::{
    constants::{JD, TIME_EPS},
    positions::ObjectRecord,
    time_grid::TimeGrid,
};

/// Resampled coordinates of one object, each index-aligned with the grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResampledSeries {
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub z: Vec<Option<f64>>,
}

fn value_at(t: JD, times: &[JD], values: &[f64]) -> Option<f64> {
    let (&first, &last) = (times.first()?, times.last()?);
    if !(first..=last).contains(&t) {
        return None;
    }

    let i = times.partition_point(|&s| s < t);
    for k in [i, i.wrapping_sub(1)] {
        if let Some(&tk) = times.get(k) {
            if (tk - t).abs() <= TIME_EPS {
                return Some(values[k]);
            }
        }
    }

    let (t0, t1) = (times[i - 1], times[i]);
    let (v0, v1) = (values[i - 1], values[i]);
    Some(v0 + (t - t0) / (t1 - t0) * (v1 - v0))
}

/// Linear interpolation of one component onto a grid.
///
/// Arguments
/// -----------------
/// * `grid` – Target epochs.
/// * `times` – Observed epochs, strictly ascending (see [`RawSeries::sorted_unique`](crate::positions::RawSeries::sorted_unique)).
/// * `values` – Observed values, index-aligned with `times`.
///
/// Return
/// ----------
/// * One entry per grid epoch, `None` where the grid falls outside the observed span.
pub fn interpolate(grid: &[JD], times: &[JD], values: &[f64]) -> Vec<Option<f64>> {
    debug_assert_eq!(times.len(), values.len());
    grid.iter().map(|&t| value_at(t, times, values)).collect()
}

/// Resample a whole object onto the grid.
///
/// The raw series is first sorted by time (duplicates keep the first sample
/// read), so unordered tables are handled.
pub fn resample_object(grid: &TimeGrid, record: &ObjectRecord) -> ResampledSeries {
    let series = record.series.sorted_unique();
    let component =
        |axis: usize| -> Vec<f64> { series.positions.iter().map(|p| p[axis]).collect() };

    ResampledSeries {
        x: interpolate(grid.as_slice(), &series.times, &component(0)),
        y: interpolate(grid.as_slice(), &series.times, &component(1)),
        z: interpolate(grid.as_slice(), &series.times, &component(2)),
    }
}
