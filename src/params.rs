//! # Scene-building parameters
//!
//! Every tunable of the pipeline lives in one explicit [`SceneParams`] value
//! passed to [`build_scene`](crate::pipeline::build_scene). Nothing is read from
//! process-wide state, so tests can vary any knob freely.
//!
//! Use [`SceneParams::builder`] for validated construction.
use std::fmt;

use crate::{
    constants::{DEFAULT_COLOR, DEFAULT_SKIP_DIRS, DEFAULT_UNITS},
    positions::position_reader::PositionFormat,
    scene_errors::SceneError,
};

/// Configuration of the scene pipeline.
///
/// Fields
/// -----------------
/// * `max_time_points` – Cap on the unified grid length (`None` = unbounded).
/// * `min_valid_samples` – Objects with fewer non-missing X samples are pruned.
/// * `subsample_categories` – Categories thinned by seeded subsampling.
/// * `subsample_fractions` – Keep-fraction per category, index-aligned with
///   `subsample_categories`; the last fraction is reused for the categories
///   beyond the end of this list.
/// * `seed` – Seed of the single generator used for subsampling.
/// * `position_format` – Column schema of the position tables.
/// * `units` – Length unit written in the metadata (asserted, never checked).
/// * `default_color` – Color of categories absent from the color table.
/// * `skip_dirs` – Data subdirectories that never hold objects.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneParams {
    pub max_time_points: Option<usize>,
    pub min_valid_samples: usize,
    pub subsample_categories: Vec<String>,
    pub subsample_fractions: Vec<f64>,
    pub seed: u64,
    pub position_format: PositionFormat,
    pub units: String,
    pub default_color: String,
    pub skip_dirs: Vec<String>,
}

impl Default for SceneParams {
    fn default() -> Self {
        SceneParams {
            max_time_points: None,
            min_valid_samples: 2,
            subsample_categories: Vec::new(),
            subsample_fractions: Vec::new(),
            seed: 42,
            position_format: PositionFormat::default(),
            units: DEFAULT_UNITS.to_string(),
            default_color: DEFAULT_COLOR.to_string(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SceneParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a validated fluent construction.
    ///
    /// # Example
    ///
    /// ```rust
    /// use orbit_scene::params::SceneParams;
    ///
    /// let params = SceneParams::builder()
    ///     .max_time_points(1000)
    ///     .min_valid_samples(10)
    ///     .subsample("asteroids", 0.1)
    ///     .seed(7)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(params.fraction_for("asteroids"), Some(0.1));
    /// ```
    pub fn builder() -> SceneParamsBuilder {
        SceneParamsBuilder::new()
    }

    /// Keep-fraction of `category`, `None` when it is not subsampled.
    pub fn fraction_for(&self, category: &str) -> Option<f64> {
        let idx = self
            .subsample_categories
            .iter()
            .position(|c| c == category)?;
        self.subsample_fractions
            .get(idx)
            .or(self.subsample_fractions.last())
            .copied()
    }
}

/// Builder for [`SceneParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct SceneParamsBuilder {
    params: SceneParams,
}

impl SceneParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_time_points(mut self, v: usize) -> Self {
        self.params.max_time_points = Some(v);
        self
    }
    pub fn unbounded_time_points(mut self) -> Self {
        self.params.max_time_points = None;
        self
    }
    pub fn min_valid_samples(mut self, v: usize) -> Self {
        self.params.min_valid_samples = v;
        self
    }

    /// Add one subsampled category with its keep-fraction.
    pub fn subsample(mut self, category: impl Into<String>, fraction: f64) -> Self {
        self.params.subsample_categories.push(category.into());
        self.params.subsample_fractions.push(fraction);
        self
    }

    /// Set categories and fractions as two independent lists.
    pub fn subsample_lists(mut self, categories: Vec<String>, fractions: Vec<f64>) -> Self {
        self.params.subsample_categories = categories;
        self.params.subsample_fractions = fractions;
        self
    }

    pub fn seed(mut self, v: u64) -> Self {
        self.params.seed = v;
        self
    }
    pub fn position_format(mut self, v: PositionFormat) -> Self {
        self.params.position_format = v;
        self
    }
    pub fn units(mut self, v: impl Into<String>) -> Self {
        self.params.units = v.into();
        self
    }
    pub fn default_color(mut self, v: impl Into<String>) -> Self {
        self.params.default_color = v.into();
        self
    }
    pub fn skip_dirs(mut self, v: Vec<String>) -> Self {
        self.params.skip_dirs = v;
        self
    }

    /// Validate and return the parameters.
    ///
    /// Errors
    /// -----------------
    /// [`SceneError::InvalidSceneParameter`] when:
    /// * `max_time_points` is set below 2 (both grid ends must fit);
    /// * categories are given without any fraction;
    /// * a fraction is not in `(0, 1]`.
    pub fn build(self) -> Result<SceneParams, SceneError> {
        let p = &self.params;

        if let Some(max) = p.max_time_points {
            if max < 2 {
                return Err(SceneError::InvalidSceneParameter(
                    "max_time_points must be >= 2".into(),
                ));
            }
        }

        if !p.subsample_categories.is_empty() && p.subsample_fractions.is_empty() {
            return Err(SceneError::InvalidSceneParameter(
                "subsample categories given without any fraction".into(),
            ));
        }

        if let Some(bad) = p
            .subsample_fractions
            .iter()
            .find(|f| !(f.is_finite() && **f > 0.0 && **f <= 1.0))
        {
            return Err(SceneError::InvalidSceneParameter(format!(
                "subsample fraction must be in (0, 1], got {bad}"
            )));
        }

        Ok(self.params)
    }
}

impl fmt::Display for SceneParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max = self
            .max_time_points
            .map_or_else(|| "unbounded".to_string(), |m| m.to_string());

        if f.alternate() {
            const PARAM_COL: usize = 40;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = " ".repeat(PARAM_COL.saturating_sub(s.len()).max(1));
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            writeln!(f, "Scene Parameters")?;
            writeln!(f, "----------------")?;
            line!("max_time_points = {}", max, "cap on the unified grid")?;
            line!(
                "min_valid_samples = {}",
                self.min_valid_samples,
                "pruning threshold"
            )?;
            line!(
                "subsample_categories = {:?}",
                self.subsample_categories,
                "thinned categories"
            )?;
            line!(
                "subsample_fractions = {:?}",
                self.subsample_fractions,
                "keep-fractions (last reused)"
            )?;
            line!("seed = {}", self.seed, "subsampling generator seed")?;
            line!(
                "position_format = {}",
                self.position_format,
                "position table schema"
            )?;
            line!("units = {:?}", self.units, "asserted length unit")?;
            line!(
                "default_color = {}",
                self.default_color,
                "color of unknown categories"
            )?;
            line!("skip_dirs = {:?}", self.skip_dirs, "non-object directories")
        } else {
            write!(
                f,
                "SceneParams(max_time_points={}, min_valid_samples={}, subsample={:?}/{:?}, seed={}, format={})",
                max,
                self.min_valid_samples,
                self.subsample_categories,
                self.subsample_fractions,
                self.seed,
                self.position_format
            )
        }
    }
}
