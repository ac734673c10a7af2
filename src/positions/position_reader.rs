//! # Position table decoder
//!
//! Turns a free-form ASCII ephemeris table (JPL Horizons-like CSV/text export)
//! into a [`RawSeries`].
//!
//! ## Overview
//! -----------------
//! Every non-blank line is scanned for signed decimal / scientific-notation
//! numbers. The resulting numeric tokens are then mapped to `(time, x, y, z)`
//! through a [`PositionFormat`]:
//!
//! * [`PositionFormat::Columns`] – Declared schema: explicit numeric-token
//!   indices for time and the three position components. Negative indices
//!   count from the end of the line.
//! * [`PositionFormat::FirstAndLastThree`] – Fallback decoder: the first
//!   number is the time, the last three are X, Y, Z, whatever lies between.
//!   Lines with fewer than [`MIN_POSITION_TOKENS`] numbers are skipped.
//!
//! Lines that do not satisfy the format (headers, comments, footers) are
//! silently skipped. There is no header detection.
//!
//! ## Units & Conventions
//! -----------------
//! * **Time:** Julian Date, TDB, taken as-is.
//! * **Positions:** whatever length unit the table carries; nothing is converted.
//!
//! ## Error Handling
//! -----------------
//! A table yielding zero qualifying lines is reported as
//! [`SceneError::NoPositionData`], so that the caller can drop the object
//! and keep going.
use std::{fmt, str::FromStr, sync::LazyLock};

use camino::Utf8Path;
use nalgebra::Vector3;
use regex::Regex;

use crate::{constants::MIN_POSITION_TOKENS, positions::RawSeries, scene_errors::SceneError};

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[+-]?\d+\.\d+(?:[Ee][+-]?\d+)?|[+-]?\d+(?:[Ee][+-]?\d+)?")
        .expect("valid number regex")
});

/// Mapping from the numeric tokens of a line to a position sample.
///
/// Variants
/// -----------------
/// * `FirstAndLastThree` – First token is time, last three are X, Y, Z.
/// * `Columns` – Explicit token indices; negative values index from the end
///   (`-1` is the last numeric token).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionFormat {
    #[default]
    FirstAndLastThree,
    Columns {
        time: isize,
        x: isize,
        y: isize,
        z: isize,
    },
}

impl PositionFormat {
    /// Decode one vector of numeric tokens into `(time, position)`.
    ///
    /// Return
    /// ----------
    /// * `None` when the tokens do not satisfy this format.
    pub fn decode(&self, numbers: &[f64]) -> Option<(f64, Vector3<f64>)> {
        match *self {
            PositionFormat::FirstAndLastThree => {
                if numbers.len() < MIN_POSITION_TOKENS {
                    return None;
                }
                let n = numbers.len();
                Some((
                    numbers[0],
                    Vector3::new(numbers[n - 3], numbers[n - 2], numbers[n - 1]),
                ))
            }
            PositionFormat::Columns { time, x, y, z } => {
                let at = |idx: isize| resolve_index(idx, numbers.len()).map(|i| numbers[i]);
                Some((at(time)?, Vector3::new(at(x)?, at(y)?, at(z)?)))
            }
        }
    }
}

fn resolve_index(idx: isize, len: usize) -> Option<usize> {
    if idx >= 0 {
        let i = idx as usize;
        (i < len).then_some(i)
    } else {
        len.checked_sub(idx.unsigned_abs())
    }
}

impl FromStr for PositionFormat {
    type Err = SceneError;

    /// Accepts `heuristic` or `columns:T,X,Y,Z`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("heuristic") {
            return Ok(PositionFormat::FirstAndLastThree);
        }

        let invalid = || {
            SceneError::InvalidSceneParameter(format!(
                "position format must be 'heuristic' or 'columns:T,X,Y,Z', got '{s}'"
            ))
        };

        let spec = s.strip_prefix("columns:").ok_or_else(invalid)?;
        let idx = spec
            .split(',')
            .map(|p| p.trim().parse::<isize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        match idx.as_slice() {
            &[time, x, y, z] => Ok(PositionFormat::Columns { time, x, y, z }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for PositionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionFormat::FirstAndLastThree => write!(f, "heuristic"),
            PositionFormat::Columns { time, x, y, z } => {
                write!(f, "columns:{time},{x},{y},{z}")
            }
        }
    }
}

/// Extract every number of a line, in reading order.
pub fn numeric_tokens(line: &str) -> Vec<f64> {
    NUMBER_RE
        .find_iter(line)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// Decode the full text of a position table.
///
/// Arguments
/// -----------------
/// * `content` – Whole table text.
/// * `format` – Column schema applied to each line.
///
/// Return
/// ----------
/// * The samples in file order, possibly empty.
pub fn parse_position_str(content: &str, format: &PositionFormat) -> RawSeries {
    let mut series = RawSeries::new();
    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some((time, position)) = format.decode(&numeric_tokens(line)) {
            series.push(time, position);
        }
    }
    series
}

/// Read and decode one position table from disk.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
///
/// Return
/// ----------
/// * The decoded [`RawSeries`], or [`SceneError::NoPositionData`] when no
///   line qualifies (an empty file included).
pub fn parse_position_table(
    path: &Utf8Path,
    format: &PositionFormat,
) -> Result<RawSeries, SceneError> {
    let bytes = std::fs::read(path)?;
    let series = parse_position_str(&String::from_utf8_lossy(&bytes), format);
    if series.is_empty() {
        return Err(SceneError::NoPositionData(path.to_string()));
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_tokens() {
        let toks = numeric_tokens("2459000.5, A.D. 2020-May-31, -1.5E+03, +2e-2, 7");
        assert_eq!(toks, vec![2459000.5, 2020.0, -31.0, -1.5e3, 2e-2, 7.0]);
    }

    #[test]
    fn test_first_and_last_three() {
        let content = "\
$$SOE header with 1 number
2459000.5 1 2 100.0 200.0 300.0
2459001.5 1 2 110.0 210.0 310.0

$$EOE 3 4 5";
        let s = parse_position_str(content, &PositionFormat::FirstAndLastThree);
        assert_eq!(s.times, vec![2459000.5, 2459001.5]);
        assert_eq!(s.positions[0], Vector3::new(100.0, 200.0, 300.0));
        assert_eq!(s.positions[1].x, 110.0);
    }

    #[test]
    fn test_short_lines_are_skipped() {
        let s = parse_position_str("1 2 3\nfoo\n", &PositionFormat::FirstAndLastThree);
        assert!(s.is_empty());
    }

    #[test]
    fn test_declared_columns() {
        let fmt = PositionFormat::Columns {
            time: 0,
            x: 2,
            y: 3,
            z: 4,
        };
        let s = parse_position_str("10.0 9 1.0 2.0 3.0 0.1 0.2\n11.0 8\n", &fmt);
        assert_eq!(s.times, vec![10.0]);
        assert_eq!(s.positions[0], Vector3::new(1.0, 2.0, 3.0));

        let from_end = PositionFormat::Columns {
            time: 0,
            x: -3,
            y: -2,
            z: -1,
        };
        assert_eq!(
            from_end.decode(&[1.0, 2.0, 3.0]),
            Some((1.0, Vector3::new(1.0, 2.0, 3.0)))
        );
        assert_eq!(from_end.decode(&[1.0, 2.0]), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(
            "heuristic".parse::<PositionFormat>().unwrap(),
            PositionFormat::FirstAndLastThree
        );
        assert_eq!(
            "columns:0,-3,-2,-1".parse::<PositionFormat>().unwrap(),
            PositionFormat::Columns {
                time: 0,
                x: -3,
                y: -2,
                z: -1
            }
        );
        assert!("columns:0,1".parse::<PositionFormat>().is_err());
        assert!("whatever".parse::<PositionFormat>().is_err());
        assert_eq!(
            PositionFormat::Columns {
                time: 0,
                x: 1,
                y: 2,
                z: 3
            }
            .to_string(),
            "columns:0,1,2,3"
        );
    }
}
