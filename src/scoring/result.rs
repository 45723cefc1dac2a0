//! Suitability result types

use serde::Serialize;

use super::market::Earnings;

/// Per-nutrient shortfall penalties (score points)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NutrientShortfall {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

impl NutrientShortfall {
    pub fn total(&self) -> f64 {
        self.nitrogen + self.phosphorus + self.potassium
    }
}

/// Score points deducted by each rule
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PenaltyBreakdown {
    /// Temperature outside the viable range
    pub temperature: f64,
    /// Rainfall below the minimum
    pub rainfall: f64,
    /// Soil nutrient shortfall
    pub nutrients: NutrientShortfall,
}

impl PenaltyBreakdown {
    /// Total deduction before rounding and clamping
    pub fn total(&self) -> f64 {
        self.temperature + self.rainfall + self.nutrients.total()
    }
}

/// Outcome of one suitability evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuitabilityResult {
    /// Suitability score, always within [5, 100]
    pub score: u8,

    /// Estimated yield (tons/hectare)
    pub yield_estimate: f64,

    /// Estimated earnings per hectare, or unavailable when no price matched
    pub earnings: Earnings,

    /// Deductions that produced the score
    pub penalties: PenaltyBreakdown,
}

impl SuitabilityResult {
    /// Score as a fraction in [0.05, 1.0]
    pub fn fraction(&self) -> f64 {
        f64::from(self.score) / 100.0
    }
}
