//! # Scene artifact
//!
//! The single externally visible result of the pipeline, serialized to JSON
//! for the visualization front-end:
//!
//! ```text
//! {
//!   "metadata": { "units": .., "notes": .., "time_count": .. },
//!   "times_jd": [..],
//!   "objects": [ { "id", "category", "diameter_km", "color", "elements", "x", "y", "z" } ]
//! }
//! ```
//!
//! Every object's `x`, `y`, `z` arrays have exactly `times_jd.len()` entries;
//! missing samples are `null`.
use std::io::Write;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::{
    attributes::AttributeInfo,
    constants::{AstronomicalUnit, Degree, Kilometer, JD, SCENE_NOTES},
    positions::ObjectRecord,
    post_process::Categorized,
    resample::ResampledSeries,
    scene_errors::SceneError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub units: String,
    pub notes: String,
    pub time_count: usize,
}

impl Metadata {
    pub fn new(units: impl Into<String>, time_count: usize) -> Self {
        Metadata {
            units: units.into(),
            notes: SCENE_NOTES.to_string(),
            time_count,
        }
    }
}

/// Orbital elements attached to an object (low confidence, see [`crate::attributes`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    #[serde(rename = "a_AU")]
    pub a_au: AstronomicalUnit,
    pub e: f64,
    pub i_deg: Degree,
}

/// One object of the scene, resampled on the shared grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: String,
    pub category: String,
    pub diameter_km: Option<Kilometer>,
    pub color: String,
    pub elements: Option<OrbitalElements>,
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub z: Vec<Option<f64>>,
}

impl SceneObject {
    /// Join a resampled record with its attributes and color.
    ///
    /// Elements are attached only when a, e and i were all extracted.
    pub fn assemble(
        record: &ObjectRecord,
        resampled: ResampledSeries,
        attributes: Option<&AttributeInfo>,
        color: &str,
    ) -> Self {
        let elements = attributes
            .and_then(AttributeInfo::elements)
            .map(|(a_au, e, i_deg)| OrbitalElements { a_au, e, i_deg });

        SceneObject {
            id: record.id.clone(),
            category: record.category.clone(),
            diameter_km: attributes.and_then(|a| a.diameter_km),
            color: color.to_string(),
            elements,
            x: resampled.x,
            y: resampled.y,
            z: resampled.z,
        }
    }
}

impl Categorized for SceneObject {
    fn category(&self) -> &str {
        &self.category
    }

    fn valid_samples(&self) -> usize {
        self.x.iter().filter(|v| v.is_some()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub metadata: Metadata,
    pub times_jd: Vec<JD>,
    pub objects: Vec<SceneObject>,
}

impl Scene {
    /// `true` when every coordinate array has the grid's length.
    pub fn is_aligned(&self) -> bool {
        let n = self.times_jd.len();
        self.objects
            .iter()
            .all(|o| o.x.len() == n && o.y.len() == n && o.z.len() == n)
    }

    pub fn to_json_pretty(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the scene as indented JSON, creating parent directories.
    pub fn write_json(&self, path: &Utf8Path) -> Result<(), SceneError> {
        if let Some(parent) = path.parent() {
            if !parent.as_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
