//! Reference Data Models
//!
//! Typed records for the static agronomic tables: per-crop requirement
//! profiles, per-region soil and weather baselines, and the minimum support
//! price table. All of these are created once at load time and never mutated.

use serde::{Deserialize, Serialize};

use crate::scoring::season::{Month, Season};

/// Agronomic requirement profile for one crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRequirement {
    /// Crop name as listed in the requirements file (e.g., "Rice")
    #[serde(default)]
    pub name: String,

    /// Nitrogen target (kg/ha)
    pub n: f64,

    /// Phosphorus target (kg/ha)
    pub p: f64,

    /// Potassium target (kg/ha)
    pub k: f64,

    /// Minimum viable temperature (°C)
    pub t_min: f64,

    /// Maximum viable temperature (°C)
    pub t_max: f64,

    /// Minimum viable rainfall (mm)
    pub r_min: f64,

    /// Growing season, free text (e.g., "June-July-Aug-Sep-Oct")
    #[serde(default)]
    pub months: String,
}

impl CropRequirement {
    /// Resolve the growing season months (falls back to mid-year when empty)
    pub fn season(&self) -> Season {
        Season::parse(&self.months)
    }

    /// Check whether a temperature lies within [t_min, t_max]
    pub fn tolerates_temperature(&self, temperature: f64) -> bool {
        temperature >= self.t_min && temperature <= self.t_max
    }
}

/// Baseline soil nutrient readings for a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionNutrientProfile {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

/// Baseline climate readings for a region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionWeatherProfile {
    /// Average temperature per calendar month (°C), January first
    pub monthly_temperature: [f64; 12],

    /// Average annual rainfall (mm)
    pub annual_rainfall: f64,
}

impl RegionWeatherProfile {
    /// Average temperature for one month
    pub fn temperature(&self, month: Month) -> f64 {
        self.monthly_temperature[month.index()]
    }

    /// Mean temperature over the months of a season
    pub fn seasonal_average(&self, season: &Season) -> f64 {
        let months = season.months();
        let total: f64 = months.iter().map(|&m| self.temperature(m)).sum();
        total / months.len() as f64
    }
}

/// Minimum support price for one crop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketPriceRecord {
    /// Crop label as it appears in the price table
    pub crop: String,

    /// Guaranteed purchase price (INR per quintal)
    pub price_per_quintal: f64,
}
