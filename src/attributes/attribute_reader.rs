//! # Heuristic attribute extractor
//!
//! Reads the whitespace-delimited TNO / Centaur diameter-albedo-density table,
//! whose records look like
//!
//! ```text
//! 136199 Eris 2003 UB313 ... 2326.0 ...
//! <id>   <name...> <year> <designation> <data columns...>
//! ```
//!
//! ## Line algorithm
//! -----------------
//! 1. Lines not starting with an integer id are commentary and are skipped.
//! 2. The first whitespace token made of exactly four digits is the
//!    provisional-designation year. It separates the free-text name from the
//!    data columns.
//! 3. When that boundary is missing, or sits at token 0 or 1, the name is
//!    token 1 alone and the data search starts at token 2. Otherwise the name
//!    is every token between the id and the boundary, and the search starts
//!    right after the boundary.
//! 4. Orbital elements: among the next [`ELEMENT_SEARCH_WINDOW`] tokens, the
//!    first three numeric ones are, in order, a (AU), e, i (deg).
//! 5. Diameter: from the search start to end of line, the first token with a
//!    decimal point lying in [[`MIN_DIAMETER_KM`], [`MAX_DIAMETER_KM`]] wins;
//!    a bare integer in that range is only used when no decimal token is.
//! 6. Lines yielding nothing are dropped.
//!
//! Steps 4 and 5 are positional. A shifted or missing column silently yields a
//! wrong value rather than an error, so the search order and window must stay
//! exactly as described.
use std::sync::LazyLock;

use camino::Utf8Path;
use regex::Regex;

use crate::{
    attributes::{AttributeInfo, AttributeTable},
    constants::{ELEMENT_SEARCH_WINDOW, MAX_DIAMETER_KM, MIN_DIAMETER_KM},
    scene_errors::SceneError,
};

static LEADING_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+").expect("valid id regex"));

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("valid year regex"));

static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[Ee][+-]?\d+)?$").expect("valid numeric regex")
});

static DECIMAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d+\.\d+(?:[Ee][+-]?\d+)?$").expect("valid decimal regex")
});

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").expect("valid integer regex"));

fn plausible_diameter(v: f64) -> bool {
    (MIN_DIAMETER_KM..=MAX_DIAMETER_KM).contains(&v)
}

fn first_diameter(tokens: &[&str], shape: &Regex) -> Option<f64> {
    tokens
        .iter()
        .filter(|t| shape.is_match(t))
        .filter_map(|t| t.parse::<f64>().ok())
        .find(|&v| plausible_diameter(v))
}

/// Extract `(name, attributes)` from one record line.
///
/// Return
/// ----------
/// * `None` for commentary, lines without a name, or lines where no
///   attribute could be found. The returned name is lowercased.
pub fn parse_attribute_line(line: &str) -> Option<(String, AttributeInfo)> {
    let line = line.trim();
    if !LEADING_ID_RE.is_match(line) {
        return None;
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }

    let boundary = tokens.iter().position(|t| YEAR_RE.is_match(t));
    let (name_tokens, search_start) = match boundary {
        Some(idx) if idx >= 2 => (&tokens[1..idx], idx + 1),
        _ => (&tokens[1..2], 2),
    };

    let name = name_tokens.join(" ").trim().to_lowercase();
    if name.is_empty() {
        return None;
    }

    let tail = tokens.get(search_start..).unwrap_or(&[]);

    let mut elements = tail
        .iter()
        .take(ELEMENT_SEARCH_WINDOW)
        .filter(|t| NUMERIC_RE.is_match(t))
        .filter_map(|t| t.parse::<f64>().ok());

    let info = AttributeInfo {
        semimajor_axis_au: elements.next(),
        eccentricity: elements.next(),
        inclination_deg: elements.next(),
        diameter_km: first_diameter(tail, &DECIMAL_RE)
            .or_else(|| first_diameter(tail, &INTEGER_RE)),
    };

    (!info.is_empty()).then_some((name, info))
}

/// Build an [`AttributeTable`] from the whole table text.
pub fn parse_attribute_str(content: &str) -> AttributeTable {
    let mut table = AttributeTable::new();
    for (name, info) in content.lines().filter_map(parse_attribute_line) {
        table.insert(&name, info);
    }
    table
}

/// Read the attribute table from disk.
///
/// A missing file is not an error: it yields an empty table. Invalid UTF-8
/// sequences are replaced rather than rejected.
pub fn parse_attribute_table(path: &Utf8Path) -> Result<AttributeTable, SceneError> {
    if !path.exists() {
        return Ok(AttributeTable::new());
    }
    let bytes = std::fs::read(path)?;
    Ok(parse_attribute_str(&String::from_utf8_lossy(&bytes)))
}
