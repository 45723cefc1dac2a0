//! Crop Advisor - Main coordinator for advisory requests
//!
//! Resolves a (crop, region) request against the reference data, fills in
//! region defaults for any reading the caller did not override, scores the
//! result and attaches advice text.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::advice::{narration, nutrient_gaps, NutrientGap};
use crate::data::ReferenceData;
use crate::i18n::{Language, Translator};
use crate::models::CropRequirement;
use crate::scoring::{ScoringEngine, ScoringInputs, ScoringParams, Season, SuitabilityResult};
use crate::utils::region::normalize_region_id;

/// Request-level failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdvisoryError {
    /// No requirement profile for the crop
    #[error("No requirement profile for crop '{0}'")]
    UnknownCrop(String),

    /// Region missing from the nutrient or weather baselines
    #[error("Region '{0}' has no nutrient and weather baseline")]
    UnknownRegion(String),
}

/// Caller overrides for the region defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputOverrides {
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub temperature: Option<f64>,
    pub rainfall: Option<f64>,
}

impl InputOverrides {
    /// Replace defaults with any overridden reading
    pub fn apply(&self, defaults: ScoringInputs) -> ScoringInputs {
        ScoringInputs {
            nitrogen: self.nitrogen.unwrap_or(defaults.nitrogen),
            phosphorus: self.phosphorus.unwrap_or(defaults.phosphorus),
            potassium: self.potassium.unwrap_or(defaults.potassium),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            rainfall: self.rainfall.unwrap_or(defaults.rainfall),
        }
    }
}

/// One advisory request from the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    pub crop: String,
    pub region: String,
    #[serde(default)]
    pub overrides: InputOverrides,
}

impl AdvisoryRequest {
    pub fn new(crop: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            crop: crop.into(),
            region: region.into(),
            overrides: InputOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: InputOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Complete advisory for one crop in one region
#[derive(Debug, Clone, Serialize)]
pub struct Advisory {
    /// Crop name as listed in the requirements file
    pub crop: String,

    /// Canonical region id
    pub region: String,

    pub requirement: CropRequirement,

    /// Growing season used for the default temperature
    pub season: Season,

    /// Readings actually scored (defaults plus overrides)
    pub inputs: ScoringInputs,

    pub result: SuitabilityResult,

    /// N, P, K gap rows
    pub gaps: [NutrientGap; 3],

    /// Cultivation advice, if the crop has any
    pub cultivation_plan: Option<String>,

    /// Spoken summary
    pub narration: String,
}

/// Advisory facade over the reference data and scoring engine
pub struct CropAdvisor<'a> {
    data: &'a ReferenceData,
    engine: ScoringEngine,
}

impl<'a> CropAdvisor<'a> {
    pub fn new(data: &'a ReferenceData, params: ScoringParams) -> Self {
        Self {
            data,
            engine: ScoringEngine::new(params),
        }
    }

    pub fn data(&self) -> &'a ReferenceData {
        self.data
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Crop names offered for selection
    pub fn crop_names(&self) -> Vec<&'a str> {
        self.data.crop_names()
    }

    /// Crop names paired with their display label in `lang`
    pub fn crop_labels(&self, lang: Language) -> Vec<(&'a str, &'a str)> {
        let pack = self.data.lang_pack();
        self.data
            .crop_names()
            .into_iter()
            .map(|name| (name, pack.translate(lang, name)))
            .collect()
    }

    /// Regions with both nutrient and weather baselines
    pub fn eligible_regions(&self) -> Vec<String> {
        self.data.eligible_regions()
    }

    /// Agency directory rows for a region
    pub fn agencies(&self, region: &str) -> anyhow::Result<DataFrame> {
        self.data.agencies_in(region)
    }

    fn requirement(&self, crop: &str) -> Result<&'a CropRequirement, AdvisoryError> {
        self.data
            .requirement(crop)
            .ok_or_else(|| AdvisoryError::UnknownCrop(crop.to_string()))
    }

    /// Region baselines for a crop: N/P/K, seasonal average temperature and
    /// annual rainfall
    pub fn default_inputs(&self, crop: &str, region: &str) -> Result<ScoringInputs, AdvisoryError> {
        let req = self.requirement(crop)?;
        let (inputs, _) = self.region_defaults(req, region)?;
        Ok(inputs)
    }

    fn region_defaults(
        &self,
        req: &CropRequirement,
        region: &str,
    ) -> Result<(ScoringInputs, Season), AdvisoryError> {
        let unknown = || AdvisoryError::UnknownRegion(region.to_string());
        let soil = self.data.nutrient_profile(region).ok_or_else(unknown)?;
        let weather = self.data.weather_profile(region).ok_or_else(unknown)?;

        let season = req.season();
        if season.is_fallback() {
            debug!(crop = %req.name, months = %req.months, "No season months recognized, using mid-year default");
        }

        let inputs = ScoringInputs {
            nitrogen: soil.nitrogen,
            phosphorus: soil.phosphorus,
            potassium: soil.potassium,
            temperature: weather.seasonal_average(&season),
            rainfall: weather.annual_rainfall,
        };

        Ok((inputs, season))
    }

    /// Score a request and attach advice
    pub fn advise(&self, request: &AdvisoryRequest) -> Result<Advisory, AdvisoryError> {
        let req = self.requirement(&request.crop)?;
        let (defaults, season) = self.region_defaults(req, &request.region)?;
        let inputs = request.overrides.apply(defaults);

        let result = self
            .engine
            .evaluate_with_prices(req, &inputs, self.data.prices());

        debug!(
            crop = %req.name,
            region = %request.region,
            score = result.score,
            "Advisory generated"
        );

        Ok(Advisory {
            crop: req.name.clone(),
            region: normalize_region_id(&request.region),
            requirement: req.clone(),
            season,
            inputs,
            gaps: nutrient_gaps(req, &inputs),
            cultivation_plan: self.data.cultivation_plan(&req.name).map(str::to_string),
            narration: narration(&result),
            result,
        })
    }
}
