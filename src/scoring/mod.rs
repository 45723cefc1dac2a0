//! Suitability & Yield Scoring
//!
//! Pure, stateless scoring of a crop requirement profile against soil and
//! climate readings.
//!
//! ## Architecture
//! - `season.rs` - Month tokens and growing season resolution
//! - `engine.rs` - Canonical constants, penalties, score and yield
//! - `market.rs` - Price table lookup and earnings estimate
//! - `result.rs` - SuitabilityResult output structs

pub mod season;
pub mod engine;
pub mod market;
pub mod result;

// Re-export public API
pub use season::{Month, Season, FALLBACK_SEASON};
pub use engine::{ScoringEngine, ScoringInputs, ScoringParams, sufficiency_ratio};
pub use market::{Earnings, MarketPrices, QUINTALS_PER_TON};
pub use result::{NutrientShortfall, PenaltyBreakdown, SuitabilityResult};
