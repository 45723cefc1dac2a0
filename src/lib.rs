//! Crop Advisor Rust Implementation
//!
//! Crop suitability scoring and advisory generation for Indian states.
//!
//! Module layout:
//! - `config`: Data file locations and environment configuration
//! - `data`: Reference data loading with Polars
//! - `models`: Crop requirements and regional baselines
//! - `scoring`: Suitability engine, season parsing and market earnings
//! - `utils`: Crop name aliasing and region id normalization
//! - `i18n`: Output languages and the label translation pack
//! - `advice`: NPK gap analysis and markdown report rendering
//! - `advisor`: Request facade tying data, scoring and advice together
//! - `logging`: tracing subscriber setup

pub mod advice;
pub mod advisor;
pub mod config;
pub mod data;
pub mod i18n;
pub mod logging;
pub mod models;
pub mod scoring;
pub mod utils;

// Re-export commonly used types
pub use advisor::{Advisory, AdvisoryError, AdvisoryRequest, CropAdvisor, InputOverrides};
pub use config::{AdvisorConfig, DataPaths};
pub use data::ReferenceData;
pub use i18n::{LangPack, Language, Translator};
pub use models::{CropRequirement, MarketPriceRecord, RegionNutrientProfile, RegionWeatherProfile};
pub use scoring::{
    Earnings, MarketPrices, Month, ScoringEngine, ScoringInputs, ScoringParams, Season,
    SuitabilityResult,
};
