//! # Constants and type definitions for the scene builder
//!
//! This module centralizes the **numerical tolerances**, **plausibility bounds**, and
//! **common type aliases** used throughout the pipeline.
//!
//! ## Overview
//!
//! - Floating-point tolerances used when matching time stamps
//! - Physical plausibility range for heuristically extracted diameters
//! - Output defaults (neutral color, assumed units)
//! - Type aliases documenting the unit carried by plain `f64` values

// -------------------------------------------------------------------------------------------------
// Tolerances and bounds
// -------------------------------------------------------------------------------------------------

/// Absolute tolerance (days) under which two Julian dates are considered identical
pub const TIME_EPS: f64 = 1e-9;

/// Smallest diameter (km) accepted by the attribute heuristic
pub const MIN_DIAMETER_KM: f64 = 0.05;

/// Largest diameter (km) accepted by the attribute heuristic
pub const MAX_DIAMETER_KM: f64 = 50_000.0;

/// Number of tokens after the designation boundary searched for orbital elements
pub const ELEMENT_SEARCH_WINDOW: usize = 10;

/// Minimum count of numeric tokens for a line to be a position sample
pub const MIN_POSITION_TOKENS: usize = 4;

// -------------------------------------------------------------------------------------------------
// Output defaults
// -------------------------------------------------------------------------------------------------

/// Color used for categories missing from the color table
pub const DEFAULT_COLOR: &str = "#CCCCCC";

/// Units written in the scene metadata when none are configured
pub const DEFAULT_UNITS: &str = "km (assumed)";

/// Free-text notes written in the scene metadata
pub const SCENE_NOTES: &str = "Positions parsed from CSV files. Times are JDTDB (Julian Date, \
    Barycentric Dynamical Time). Diameters were parsed heuristically from the diameters table; \
    many bodies may lack diameter entries. Orbital elements are positional guesses and low confidence.";

/// Data subdirectories which never hold position tables
pub const DEFAULT_SKIP_DIRS: [&str; 3] = ["diameters", "plotting_functions", "d3"];

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Julian Date, Barycentric Dynamical Time (days)
pub type JD = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Angle in degrees
pub type Degree = f64;
