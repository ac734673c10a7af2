//! Category → display color table.
//!
//! The table is a small comma-separated file, `category, color, ...`; only
//! the first two fields are read. Its first line is a header unless it
//! already carries a `#rrggbb`-style color in the second field.
use std::{collections::HashMap, io::Read};

use ahash::RandomState;
use camino::Utf8Path;
use csv::{ReaderBuilder, Trim};

use crate::scene_errors::SceneError;

#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    colors: HashMap<String, String, RandomState>,
}

impl CategoryColors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, color: impl Into<String>) {
        self.colors.insert(category.into(), color.into());
    }

    /// Color listed for `category`, if any.
    pub fn get(&self, category: &str) -> Option<&str> {
        self.colors.get(category).map(String::as_str)
    }

    /// Color of `category`, or `default` when the table has no entry for it.
    pub fn color_for<'a>(&'a self, category: &str, default: &'a str) -> &'a str {
        self.get(category).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Parse a color table from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SceneError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut table = CategoryColors::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record?;
            let (Some(category), Some(color)) = (record.get(0), record.get(1)) else {
                continue;
            };
            if idx == 0 && !color.starts_with('#') {
                continue;
            }
            if category.is_empty() {
                continue;
            }
            table.insert(category, color);
        }
        Ok(table)
    }

    /// Read the color table at `path`; a missing file gives an empty table.
    pub fn from_path(path: &Utf8Path) -> Result<Self, SceneError> {
        if !path.exists() {
            return Ok(CategoryColors::new());
        }
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }
}
