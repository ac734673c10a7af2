//! # Scene pipeline
//!
//! Wires the stages together, leaf to root:
//!
//! 1. [`discover_objects`] + [`ObjectRecord::load`] – one raw series per position table;
//! 2. [`parse_attribute_table`] – the name-keyed attribute map;
//! 3. [`TimeGrid::from_records`] – the unified grid;
//! 4. [`resample_object`] – every object on the grid;
//! 5. [`prune`] then [`subsample`] – bounded, reproducible object set.
//!
//! ## Error semantics
//! -----------------
//! * An unreadable or empty position table only drops that object (warning).
//! * An attribute or color table failing to load degrades to an empty table (warning).
//! * No object parsed at all → [`SceneError::NoObjectsParsed`].
//! * Stages 3 to 5 are total functions and never fail.
//!
//! ## Example
//! -----------------
//! ```no_run
//! use camino::Utf8Path;
//! use orbit_scene::{params::SceneParams, pipeline::ScenePipeline};
//!
//! # fn demo() -> Result<(), orbit_scene::scene_errors::SceneError> {
//! let params = SceneParams::builder().max_time_points(2000).build()?;
//! let scene = ScenePipeline::from_data_dir(Utf8Path::new("data"), params).run()?;
//! scene.write_json(Utf8Path::new("d3/data/scene.json"))?;
//! # Ok(()) }
//! ```
use camino::{Utf8Path, Utf8PathBuf};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::{
    attributes::{attribute_reader::parse_attribute_table, AttributeTable},
    colors::CategoryColors,
    params::SceneParams,
    positions::{discovery::discover_objects, ObjectRecord},
    post_process::{prune, subsample},
    resample::resample_object,
    scene::{Metadata, Scene, SceneObject},
    scene_errors::SceneError,
    time_grid::TimeGrid,
};

/// Location of the attribute table relative to the data root.
pub const ATTRIBUTE_TABLE_PATH: &str =
    "diameters/tno-centaur_diam-albedo-density/data/tno_centaur_diam_alb_dens.tab";

/// Location of the category color table relative to the data root.
pub const COLOR_TABLE_PATH: &str = "plotting_functions/cat colors.csv";

/// Build the scene from already parsed inputs.
///
/// Arguments
/// -----------------
/// * `records` – Parsed objects, in discovery order.
/// * `attributes` – Name-keyed attributes (may be empty).
/// * `colors` – Category colors; unlisted categories get `params.default_color`.
/// * `params` – Grid cap, pruning threshold and subsampling setup.
/// * `rng` – Generator used by the subsampling stage, seeded by the caller.
///
/// Return
/// ----------
/// * The [`Scene`], or [`SceneError::NoObjectsParsed`] when `records` is empty.
pub fn build_scene<R: Rng + ?Sized>(
    records: &[ObjectRecord],
    attributes: &AttributeTable,
    colors: &CategoryColors,
    params: &SceneParams,
    rng: &mut R,
) -> Result<Scene, SceneError> {
    if records.is_empty() {
        return Err(SceneError::NoObjectsParsed);
    }

    let grid = TimeGrid::from_records(records, params.max_time_points);
    info!("Unified grid length: {}", grid.len());

    let objects: Vec<SceneObject> = records
        .iter()
        .map(|record| {
            let resampled = resample_object(&grid, record);
            let attrs = attributes.lookup(&record.id);
            if attrs.is_none() {
                debug!("No attributes found for {}", record.id);
            }
            SceneObject::assemble(
                record,
                resampled,
                attrs,
                colors.color_for(&record.category, &params.default_color),
            )
        })
        .collect();

    let before = objects.len();
    let objects = prune(objects, params.min_valid_samples);
    info!(
        "Pruned {} objects with fewer than {} valid samples",
        before - objects.len(),
        params.min_valid_samples
    );

    let before = objects.len();
    let objects = subsample(objects, params, rng);
    info!(
        "Subsampling kept {} of {} objects",
        objects.len(),
        before
    );

    Ok(Scene {
        metadata: Metadata::new(params.units.clone(), grid.len()),
        times_jd: grid.as_slice().to_vec(),
        objects,
    })
}

/// File-system driven pipeline run.
#[derive(Debug, Clone)]
pub struct ScenePipeline {
    pub data_dir: Utf8PathBuf,
    pub attribute_table: Utf8PathBuf,
    pub color_table: Utf8PathBuf,
    pub params: SceneParams,
}

impl ScenePipeline {
    /// Pipeline reading the conventional table locations under `data_dir`.
    pub fn from_data_dir(data_dir: &Utf8Path, params: SceneParams) -> Self {
        ScenePipeline {
            data_dir: data_dir.to_path_buf(),
            attribute_table: data_dir.join(ATTRIBUTE_TABLE_PATH),
            color_table: data_dir.join(COLOR_TABLE_PATH),
            params,
        }
    }

    pub fn with_attribute_table(mut self, path: &Utf8Path) -> Self {
        self.attribute_table = path.to_path_buf();
        self
    }

    pub fn with_color_table(mut self, path: &Utf8Path) -> Self {
        self.color_table = path.to_path_buf();
        self
    }

    /// Discover and parse every position table, dropping the unusable ones.
    pub fn load_objects(&self) -> Result<Vec<ObjectRecord>, SceneError> {
        info!("Discovering objects in: {}", self.data_dir);
        let sources = discover_objects(&self.data_dir, &self.params.skip_dirs)?;
        info!("Found {} object files", sources.len());

        let records = sources
            .iter()
            .filter_map(
                |source| match ObjectRecord::load(source, &self.params.position_format) {
                    Ok(record) => {
                        debug!(
                            "{}: {} samples spanning {:?}",
                            record.id,
                            record.series.len(),
                            record.series.time_span()
                        );
                        Some(record)
                    }
                    Err(err) => {
                        warn!("No data parsed for {}: {err}", source.path);
                        None
                    }
                },
            )
            .collect();
        Ok(records)
    }

    /// Attribute table, or an empty one if it cannot be read.
    pub fn load_attributes(&self) -> AttributeTable {
        info!("Parsing attribute table (heuristic) ...");
        match parse_attribute_table(&self.attribute_table) {
            Ok(table) => {
                info!("Found {} attribute entries via heuristics", table.len());
                table
            }
            Err(err) => {
                warn!(
                    "Attribute table {} unusable, continuing without: {err}",
                    self.attribute_table
                );
                AttributeTable::new()
            }
        }
    }

    /// Color table, or an empty one if it cannot be read.
    pub fn load_colors(&self) -> CategoryColors {
        let colors = CategoryColors::from_path(&self.color_table).unwrap_or_else(|err| {
            warn!(
                "Color table {} unusable, using default colors: {err}",
                self.color_table
            );
            CategoryColors::new()
        });
        info!("Parsed {} colors", colors.len());
        colors
    }

    /// Run the whole pipeline with a generator seeded from the parameters.
    pub fn run(&self) -> Result<Scene, SceneError> {
        let mut rng = StdRng::seed_from_u64(self.params.seed);
        self.run_with_rng(&mut rng)
    }

    /// Run the whole pipeline with a caller-provided generator.
    pub fn run_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Scene, SceneError> {
        let records = self.load_objects()?;
        if records.is_empty() {
            warn!("No objects parsed, nothing to do");
            return Err(SceneError::NoObjectsParsed);
        }

        let attributes = self.load_attributes();
        let colors = self.load_colors();

        build_scene(&records, &attributes, &colors, &self.params, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attributes::AttributeInfo, positions::RawSeries};
    use nalgebra::Vector3;

    fn record(id: &str, category: &str, times: &[f64]) -> ObjectRecord {
        let mut s = RawSeries::new();
        for &t in times {
            s.push(t, Vector3::new(t, 2.0 * t, 3.0 * t));
        }
        ObjectRecord::new(id, category, s)
    }

    #[test]
    fn test_empty_input_is_nothing_to_do() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = build_scene(
            &[],
            &AttributeTable::new(),
            &CategoryColors::new(),
            &SceneParams::new(),
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err, SceneError::NoObjectsParsed);
    }

    #[test]
    fn test_build_scene_joins_and_prunes() {
        let records = vec![
            record("Eris", "tnos", &[1.0, 2.0, 3.0]),
            record("Lonely", "tnos", &[10.0]),
            record("Triton", "moons", &[2.0, 3.0, 4.0]),
        ];
        let mut attributes = AttributeTable::new();
        attributes.insert(
            "eris",
            AttributeInfo {
                diameter_km: Some(2326.0),
                ..Default::default()
            },
        );
        let mut colors = CategoryColors::new();
        colors.insert("tnos", "#00ff00");

        let params = SceneParams::builder().min_valid_samples(2).build().unwrap();
        let mut rng = StdRng::seed_from_u64(params.seed);
        let scene = build_scene(&records, &attributes, &colors, &params, &mut rng).unwrap();

        assert_eq!(scene.times_jd, vec![1.0, 2.0, 3.0, 4.0, 10.0]);
        assert_eq!(scene.metadata.time_count, 5);
        assert!(scene.is_aligned());

        let ids: Vec<&str> = scene.objects.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["Eris", "Triton"]);
        assert_eq!(scene.objects[0].diameter_km, Some(2326.0));
        assert_eq!(scene.objects[0].color, "#00ff00");
        assert_eq!(scene.objects[1].color, "#CCCCCC");
        assert_eq!(scene.objects[1].x[0], None);
        assert_eq!(scene.objects[1].y[2], Some(6.0));
    }

    #[test]
    fn test_unlisted_category_uses_configured_default_color() {
        let records = vec![record("Triton", "moons", &[1.0, 2.0])];
        let params = SceneParams::builder()
            .default_color("#000000")
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(params.seed);
        let scene = build_scene(
            &records,
            &AttributeTable::new(),
            &CategoryColors::new(),
            &params,
            &mut rng,
        )
        .unwrap();
        assert_eq!(scene.objects[0].color, "#000000");
    }
}
