//! # Post-processing: pruning and seeded subsampling
//!
//! Two independent policies applied, in this order, to the resampled objects.
//!
//! ## Pruning
//! -----------------
//! An object whose X array holds fewer than `min_valid_samples` non-missing
//! values is dropped.
//!
//! ## Subsampling
//! -----------------
//! For each configured category (configuration order), its members are
//! shuffled with the caller's generator and the first
//! `max(1, floor(n * fraction))` are kept. One generator stream is shared by
//! all categories and never reseeded in between, so the outcome only depends
//! on the seed and the input order.
//!
//! Unconfigured categories pass through untouched. Kept members of a
//! subsampled category take, in shuffled order, the place of that category's
//! first member; every other object keeps its relative position.
use std::collections::BTreeMap;

use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};

use crate::params::SceneParams;

/// What the post-processor needs to know about an object.
pub trait Categorized {
    fn category(&self) -> &str;

    /// Number of non-missing resampled samples.
    fn valid_samples(&self) -> usize;
}

/// Drop objects with fewer than `min_valid_samples` valid samples.
pub fn prune<T: Categorized>(objects: Vec<T>, min_valid_samples: usize) -> Vec<T> {
    objects
        .into_iter()
        .filter(|o| o.valid_samples() >= min_valid_samples)
        .collect()
}

/// Number of members kept out of `n` for a keep-fraction.
pub fn kept_count(n: usize, fraction: f64) -> usize {
    if n == 0 {
        return 0;
    }
    let keep = (n as f64 * fraction).floor() as usize;
    keep.clamp(1, n)
}

/// Seeded per-category subsampling.
///
/// Arguments
/// -----------------
/// * `objects` – Surviving objects in discovery order.
/// * `params` – Provides the subsampled categories and their fractions.
/// * `rng` – The single generator of the run, seeded once by the caller.
///
/// Return
/// ----------
/// * The thinned object list.
pub fn subsample<T: Categorized, R: Rng + ?Sized>(
    objects: Vec<T>,
    params: &SceneParams,
    rng: &mut R,
) -> Vec<T> {
    let mut slots: Vec<Option<T>> = objects.into_iter().map(Some).collect();
    let mut groups: BTreeMap<usize, Vec<T>> = BTreeMap::new();

    for category in params.subsample_categories.iter().unique() {
        let Some(fraction) = params.fraction_for(category) else {
            continue;
        };

        let positions: Vec<usize> = slots
            .iter()
            .positions(|s| s.as_ref().is_some_and(|o| o.category() == category))
            .collect();
        let Some(&first) = positions.first() else {
            continue;
        };

        let mut members: Vec<T> = positions.iter().filter_map(|&i| slots[i].take()).collect();
        members.shuffle(rng);
        members.truncate(kept_count(members.len(), fraction));
        groups.insert(first, members);
    }

    let mut out = Vec::with_capacity(slots.len());
    for (i, slot) in slots.into_iter().enumerate() {
        match slot {
            Some(obj) => out.push(obj),
            None => {
                if let Some(group) = groups.remove(&i) {
                    out.extend(group);
                }
            }
        }
    }
    out
}
