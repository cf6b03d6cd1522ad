//! Scene configuration loaded from JSON
//!
//! Relative paths inside the file are resolved against the file's directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::level::Thresholds;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    /// Master seed; overridden by a query-string seed, and replaced by a
    /// non-deterministic one when absent
    #[serde(default)]
    pub seed: Option<i64>,
    pub level: LevelConfig,
    #[serde(default)]
    pub terrain_sheet: Option<TerrainSheetConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub tile_width: u32,
    pub tile_height: u32,
    pub grid_width: usize,
    pub grid_height: usize,
    pub map_generation: MapGenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapGenerationConfig {
    pub scale_x: f64,
    pub scale_y: f64,
    /// Upper bound of the range thresholds are expressed in (`[0, amplitude]`)
    pub amplitude: f64,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerrainSheetConfig {
    /// JSON file holding the sheet layout rules
    pub sheet_config: PathBuf,
    #[serde(default)]
    pub sheet_image: Option<PathBuf>,
}

impl SceneConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_json(&text, base_dir)
            .map_err(|e| match e {
                Error::Json { source, .. } => Error::Json { path: path.to_path_buf(), source },
                other => other,
            })
    }

    pub fn from_json(text: &str, base_dir: &Path) -> Result<Self> {
        let mut config: SceneConfig = serde_json::from_str(text)
            .map_err(|source| Error::Json { path: PathBuf::from("<inline>"), source })?;
        if let Some(sheet) = config.terrain_sheet.as_mut() {
            sheet.sheet_config = base_dir.join(&sheet.sheet_config);
            sheet.sheet_image = sheet.sheet_image.as_ref().map(|p| base_dir.join(p));
        }
        config.level.validate()?;
        Ok(config)
    }
}

impl LevelConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(Error::InvalidConfig("tile size must be non-zero".into()));
        }
        let generation = &self.map_generation;
        if !(generation.scale_x > 0.0 && generation.scale_y > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "spatial scale must be positive, got ({}, {})",
                generation.scale_x, generation.scale_y
            )));
        }
        if !generation.amplitude.is_finite() {
            return Err(Error::InvalidConfig("amplitude must be finite".into()));
        }
        Ok(())
    }
}
