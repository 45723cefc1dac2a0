//! Reference Data Loading and Management
//!
//! Loads every static table the advisor needs, once, into an explicit
//! read-only store that is passed by reference to the scoring engine.
//!
//! - CSV tables (nutrients, weather, prices, agency directory) via Polars
//! - JSON tables (crop requirements, cultivation advice, language pack) via serde_json
//!
//! Loading fails fast: a missing file, column or numeric cell rejects the
//! whole data set rather than letting the engine run on partial tables.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{info, warn};

use crate::config::DataPaths;
use crate::i18n::LangPack;
use crate::models::{CropRequirement, MarketPriceRecord, RegionNutrientProfile, RegionWeatherProfile};
use crate::scoring::market::MarketPrices;
use crate::scoring::season::Month;
use crate::utils::region::{is_region_header, normalize_region_id};

/// Annual rainfall assumed when the weather table has no rainfall column
pub const DEFAULT_ANNUAL_RAINFALL_MM: f64 = 1000.0;

/// Main data holder for crop advisory
///
/// Region-keyed tables use the canonical region id (trimmed, uppercase).
pub struct ReferenceData {
    /// Crop requirement profiles in file order
    crops: Vec<CropRequirement>,

    /// Crop name → index into `crops`
    crop_index: FxHashMap<String, usize>,

    /// Region → soil nutrient baseline
    nutrients: FxHashMap<String, RegionNutrientProfile>,

    /// Region → climate baseline
    weather: FxHashMap<String, RegionWeatherProfile>,

    /// Minimum support prices
    prices: MarketPrices,

    /// Crop key → cultivation advice, in file order
    cultivation: Vec<(String, String)>,

    /// UI label translations
    lang_pack: LangPack,

    /// Agency directory (arbitrary columns)
    agencies: DataFrame,

    /// Name of the region column in `agencies`
    agency_region_column: String,
}

impl ReferenceData {
    /// Load all tables from their configured paths
    pub fn load(paths: &DataPaths) -> Result<Self> {
        info!("Loading reference data...");

        let crops = load_crop_requirements(&paths.crop_requirements)?;
        let nutrients = load_nutrients(&paths.nutrients)?;
        let weather = load_weather(&paths.weather)?;
        let prices = MarketPrices::new(load_market_prices(&paths.market_prices)?);
        let cultivation = load_cultivation_details(&paths.cultivation_details)?;
        let lang_pack = LangPack::load(&paths.lang_pack)?;
        let (agencies, agency_region_column) = load_agency_directory(&paths.agency_directory)?;

        let crop_index = crops
            .iter()
            .enumerate()
            .map(|(idx, req)| (req.name.clone(), idx))
            .collect();

        let data = ReferenceData {
            crops,
            crop_index,
            nutrients,
            weather,
            prices,
            cultivation,
            lang_pack,
            agencies,
            agency_region_column,
        };

        info!("  Crops: {}", data.crops.len());
        info!("  Nutrient regions: {}", data.nutrients.len());
        info!("  Weather regions: {}", data.weather.len());
        info!("  Eligible regions: {}", data.eligible_regions().len());
        info!("  Market prices: {}", data.prices.len());
        info!("  Cultivation plans: {}", data.cultivation.len());
        info!("  Agencies: {}", data.agencies.height());

        Ok(data)
    }

    /// Load from the standard file names inside a directory
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Self::load(&DataPaths::in_dir(dir))
    }

    // ========================================================================
    // Crops
    // ========================================================================

    /// Crop names in requirements-file order
    pub fn crop_names(&self) -> Vec<&str> {
        self.crops.iter().map(|req| req.name.as_str()).collect()
    }

    pub fn crops(&self) -> &[CropRequirement] {
        &self.crops
    }

    /// Requirement profile by crop name (exact, then case-insensitive)
    pub fn requirement(&self, crop: &str) -> Option<&CropRequirement> {
        if let Some(&idx) = self.crop_index.get(crop) {
            return self.crops.get(idx);
        }

        let wanted = crop.trim();
        self.crops
            .iter()
            .find(|req| req.name.eq_ignore_ascii_case(wanted))
    }

    // ========================================================================
    // Regions
    // ========================================================================

    pub fn nutrient_profile(&self, region: &str) -> Option<&RegionNutrientProfile> {
        self.nutrients.get(&normalize_region_id(region))
    }

    pub fn weather_profile(&self, region: &str) -> Option<&RegionWeatherProfile> {
        self.weather.get(&normalize_region_id(region))
    }

    /// Regions present in both the nutrient and weather tables, sorted
    pub fn eligible_regions(&self) -> Vec<String> {
        let nutrient_regions: BTreeSet<&String> = self.nutrients.keys().collect();
        self.weather
            .keys()
            .filter(|region| nutrient_regions.contains(region))
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    // ========================================================================
    // Prices, advice, translation, directory
    // ========================================================================

    pub fn prices(&self) -> &MarketPrices {
        &self.prices
    }

    /// Cultivation advice for a crop.
    ///
    /// Picks the first entry (file order) whose key appears, case-insensitively,
    /// inside the crop name, so "Rice" covers "Rice (Basmati)".
    pub fn cultivation_plan(&self, crop: &str) -> Option<&str> {
        let crop = crop.to_lowercase();
        self.cultivation
            .iter()
            .find(|(key, _)| crop.contains(&key.to_lowercase()))
            .map(|(_, plan)| plan.as_str())
    }

    pub fn lang_pack(&self) -> &LangPack {
        &self.lang_pack
    }

    /// Agency directory rows for a region
    pub fn agencies_in(&self, region: &str) -> Result<DataFrame> {
        let key = normalize_region_id(region);

        let states = self
            .agencies
            .column(&self.agency_region_column)?
            .cast(&DataType::String)?;
        let mask: BooleanChunked = states
            .str()?
            .into_iter()
            .map(|opt| opt.map_or(false, |s| normalize_region_id(s) == key))
            .collect();

        Ok(self.agencies.filter(&mask)?)
    }
}

// ============================================================================
// CSV helpers
// ============================================================================

fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.into()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load CSV: {:?}", path))
}

/// First header (trimmed) satisfying the predicate
fn find_column(df: &DataFrame, predicate: impl Fn(&str) -> bool) -> Option<String> {
    df.get_column_names()
        .into_iter()
        .find(|name| predicate(name.as_str().trim()))
        .map(|name| name.to_string())
}

fn region_column(df: &DataFrame, path: &Path) -> Result<String> {
    find_column(df, is_region_header)
        .with_context(|| format!("No state/region column in {:?}", path))
}

/// Header equal to `wanted` ignoring case and surrounding whitespace
fn named_column(df: &DataFrame, wanted: &str, path: &Path) -> Result<String> {
    find_column(df, |name| name.eq_ignore_ascii_case(wanted))
        .with_context(|| format!("Column '{}' not found in {:?}", wanted, path))
}

fn string_values(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>> {
    let cast = df
        .column(column)
        .with_context(|| format!("Column '{}' not found", column))?
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' is not convertible to text", column))?;

    let values = cast
        .str()
        .with_context(|| format!("Column '{}' is not string type", column))?
        .into_iter()
        .map(|opt| opt.map(str::to_string))
        .collect();

    Ok(values)
}

fn f64_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let cast = df
        .column(column)
        .with_context(|| format!("Column '{}' not found", column))?
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", column))?;

    let values = cast
        .f64()
        .with_context(|| format!("Column '{}' is not f64 type", column))?
        .into_iter()
        .collect();

    Ok(values)
}

/// Canonical region ids, one per row. Blank or missing ids are rejected.
fn region_keys(df: &DataFrame, column: &str, path: &Path) -> Result<Vec<String>> {
    string_values(df, column)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| -> Result<String> {
            let key = value.as_deref().map(normalize_region_id).unwrap_or_default();
            if key.is_empty() {
                bail!("Missing region id in {:?} (row {})", path, row + 1);
            }
            Ok(key)
        })
        .collect()
}

fn required_cell(values: &[Option<f64>], row: usize, column: &str, region: &str) -> Result<f64> {
    values
        .get(row)
        .copied()
        .flatten()
        .with_context(|| format!("Missing '{}' value for region {}", column, region))
}

// ============================================================================
// Table loaders
// ============================================================================

/// Load per-region N/P/K baselines. The first row for a region wins.
fn load_nutrients(path: &Path) -> Result<FxHashMap<String, RegionNutrientProfile>> {
    let df = read_csv(path)?;
    let regions = region_keys(&df, &region_column(&df, path)?, path)?;

    let n_col = named_column(&df, "Nitrogen", path)?;
    let p_col = named_column(&df, "Phosphorus", path)?;
    let k_col = named_column(&df, "Potassium", path)?;
    let nitrogen = f64_values(&df, &n_col)?;
    let phosphorus = f64_values(&df, &p_col)?;
    let potassium = f64_values(&df, &k_col)?;

    let mut profiles = FxHashMap::default();
    for (row, region) in regions.into_iter().enumerate() {
        if profiles.contains_key(&region) {
            continue;
        }

        let profile = RegionNutrientProfile {
            nitrogen: required_cell(&nitrogen, row, &n_col, &region)?,
            phosphorus: required_cell(&phosphorus, row, &p_col, &region)?,
            potassium: required_cell(&potassium, row, &k_col, &region)?,
        };
        profiles.insert(region, profile);
    }

    Ok(profiles)
}

/// Load per-region monthly temperatures and annual rainfall.
///
/// Month columns are identified by exact month-token headers ("Jan",
/// "June", "September", ...); all twelve must be present.
fn load_weather(path: &Path) -> Result<FxHashMap<String, RegionWeatherProfile>> {
    let df = read_csv(path)?;
    let regions = region_keys(&df, &region_column(&df, path)?, path)?;

    let mut month_columns: [Option<String>; 12] = Default::default();
    for name in df.get_column_names() {
        if let Some(month) = Month::from_token(name.as_str()) {
            let slot = &mut month_columns[month.index()];
            if slot.is_none() {
                *slot = Some(name.to_string());
            }
        }
    }

    let mut monthly_values = Vec::with_capacity(12);
    for month in Month::ALL {
        let column = month_columns[month.index()]
            .clone()
            .with_context(|| format!("Column for month '{}' not found in {:?}", month.label(), path))?;
        let values = f64_values(&df, &column)?;
        monthly_values.push((column, values));
    }

    let rainfall = match find_column(&df, |name| name.to_lowercase().contains("rainfall")) {
        Some(column) => Some((f64_values(&df, &column)?, column)),
        None => {
            warn!(
                "No rainfall column in {:?} - assuming {} mm for every region",
                path, DEFAULT_ANNUAL_RAINFALL_MM
            );
            None
        }
    };

    let mut profiles = FxHashMap::default();
    for (row, region) in regions.into_iter().enumerate() {
        if profiles.contains_key(&region) {
            continue;
        }

        let mut monthly_temperature = [0.0; 12];
        for (slot, (column, values)) in monthly_temperature.iter_mut().zip(&monthly_values) {
            *slot = required_cell(values, row, column, &region)?;
        }

        let annual_rainfall = match &rainfall {
            Some((values, column)) => required_cell(values, row, column, &region)?,
            None => DEFAULT_ANNUAL_RAINFALL_MM,
        };

        profiles.insert(
            region,
            RegionWeatherProfile {
                monthly_temperature,
                annual_rainfall,
            },
        );
    }

    Ok(profiles)
}

/// Load the minimum support price table
fn load_market_prices(path: &Path) -> Result<Vec<MarketPriceRecord>> {
    let df = read_csv(path)?;
    let crop_col = named_column(&df, "Crop", path)?;
    let price_col = named_column(&df, "MSP_INR_per_Quintal", path)?;

    let crops = string_values(&df, &crop_col)?;
    let prices = f64_values(&df, &price_col)?;

    crops
        .into_iter()
        .enumerate()
        .map(|(row, crop)| -> Result<MarketPriceRecord> {
            let crop = crop
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .with_context(|| format!("Missing crop name in {:?} (row {})", path, row + 1))?;
            let price_per_quintal = required_cell(&prices, row, &price_col, &crop)?;
            Ok(MarketPriceRecord {
                crop,
                price_per_quintal,
            })
        })
        .collect()
}

/// Agency directory: kept as a DataFrame, filtered per region on request
fn load_agency_directory(path: &Path) -> Result<(DataFrame, String)> {
    let df = read_csv(path)?;
    let column = region_column(&df, path)?;
    Ok((df, column))
}

// ============================================================================
// JSON loaders
// ============================================================================

fn read_json_object(path: &Path) -> Result<serde_json::Map<String, serde_json::Value>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse JSON object: {:?}", path))
}

/// Load crop requirement profiles, preserving file order
fn load_crop_requirements(path: &Path) -> Result<Vec<CropRequirement>> {
    let raw = read_json_object(path)?;
    if raw.is_empty() {
        bail!("No crop requirement profiles in {:?}", path);
    }

    raw.into_iter()
        .map(|(name, value)| -> Result<CropRequirement> {
            let mut req: CropRequirement = serde_json::from_value(value)
                .with_context(|| format!("Invalid requirement profile for '{}' in {:?}", name, path))?;
            req.name = name;
            Ok(req)
        })
        .collect()
}

/// Load crop → cultivation advice text, preserving file order
fn load_cultivation_details(path: &Path) -> Result<Vec<(String, String)>> {
    read_json_object(path)?
        .into_iter()
        .map(|(crop, value)| -> Result<(String, String)> {
            match value {
                serde_json::Value::String(plan) => Ok((crop, plan)),
                _ => bail!("Cultivation advice for '{}' is not text in {:?}", crop, path),
            }
        })
        .collect()
}
