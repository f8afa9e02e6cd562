use anyhow::{bail, Context, Result};
use chrono::FixedOffset;
use gly_core::GlucoseUnit;
use gly_data::pipeline::ChartConfig;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// User preferences read from a JSON settings file.
///
/// ```json
/// { "display_unit": "mmol/L", "chart": { "threshold": 150 }, "utc_offset_minutes": -300 }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub display_unit: GlucoseUnit,
    pub chart: ChartConfig,
    /// Fixed zone for hours and dates; the system zone when absent
    pub utc_offset_minutes: Option<i32>,
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("settings: {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    pub fn fixed_offset(&self) -> Result<Option<FixedOffset>> {
        match self.utc_offset_minutes {
            None => Ok(None),
            Some(minutes) => match FixedOffset::east_opt(minutes * 60) {
                Some(offset) => Ok(Some(offset)),
                None => bail!("utc_offset_minutes out of range: {minutes}"),
            },
        }
    }
}
