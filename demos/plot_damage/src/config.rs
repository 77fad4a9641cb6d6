use std::{fs, path::Path};

use anyhow::{Context, Result};
use region_damage::{HarmonicFill, Rect};
use serde::Deserialize;

/// Damage layout and restoration settings, optionally read from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// `[row_start, row_end, col_start, col_end]` per region.
    pub rects: Vec<[i32; 4]>,
    pub iterations: usize,
    pub tolerance: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        let fill = HarmonicFill::default();
        Self {
            // left, middle and right defect
            rects: vec![[20, 60, 0, 20], [200, 300, 150, 170], [50, 100, 400, 430]],
            iterations: fill.max_iterations,
            tolerance: fill.tolerance,
        }
    }
}

impl DemoConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn rects(&self) -> Result<Vec<Rect>> {
        self.rects
            .iter()
            .map(|coords| Rect::try_from(*coords).map_err(anyhow::Error::from))
            .collect()
    }

    pub fn restorer(&self) -> HarmonicFill {
        HarmonicFill::new(self.iterations, self.tolerance)
    }
}
