//! Advisor Configuration
//!
//! Locates the reference data files and the optional scoring parameter
//! overrides. Mirrors the server setup: a data directory taken from the
//! environment (`DATA_DIR`) with file names fixed relative to it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::i18n::Language;
use crate::scoring::ScoringParams;

/// Default data directory when `DATA_DIR` is unset
pub const DEFAULT_DATA_DIR: &str = "data";

/// Locations of every reference file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub nutrients: PathBuf,
    pub weather: PathBuf,
    pub crop_requirements: PathBuf,
    pub cultivation_details: PathBuf,
    pub market_prices: PathBuf,
    pub lang_pack: PathBuf,
    pub agency_directory: PathBuf,
    /// Optional; canonical constants apply when absent
    pub scoring_params: PathBuf,
}

impl DataPaths {
    /// Standard file names inside a data directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            nutrients: dir.join("processed_nutrients.csv"),
            weather: dir.join("forecasting_data.csv"),
            crop_requirements: dir.join("crop_requirements.json"),
            cultivation_details: dir.join("cultivation_details.json"),
            market_prices: dir.join("msp.csv"),
            lang_pack: dir.join("lang_pack.json"),
            agency_directory: dir.join("agency_directory.csv"),
            scoring_params: dir.join("scoring.json"),
        }
    }
}

/// Process-level configuration
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub data_dir: PathBuf,
    pub language: Language,
}

impl AdvisorConfig {
    /// Read `DATA_DIR` and `ADVISOR_LANG` from the environment
    pub fn from_env() -> Result<Self> {
        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());

        let language = match env::var("ADVISOR_LANG") {
            Ok(lang) => lang
                .parse::<Language>()
                .with_context(|| "Invalid ADVISOR_LANG")?,
            Err(_) => Language::default(),
        };

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            language,
        })
    }

    pub fn paths(&self) -> DataPaths {
        DataPaths::in_dir(&self.data_dir)
    }
}

/// Load scoring parameter overrides, or the canonical set if the file is absent
pub fn load_scoring_params(path: &Path) -> Result<ScoringParams> {
    if !path.exists() {
        info!("No scoring overrides at {:?} - using canonical constants", path);
        return Ok(ScoringParams::default());
    }

    info!("Loading scoring overrides: {:?}", path);
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scoring parameters: {:?}", path))?;

    let params: ScoringParams = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse scoring parameters: {:?}", path))?;
    params
        .validate()
        .with_context(|| format!("Invalid scoring parameters: {:?}", path))?;

    Ok(params)
}
