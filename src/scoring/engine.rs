//! Suitability Scoring Engine
//!
//! Scores how well a set of soil and climate readings match a crop's
//! requirement profile, then scales a single global yield ceiling by the
//! resulting suitability fraction.
//!
//! ## Algorithm
//! 1. Start at 100
//! 2. Temperature outside [t_min, t_max]: subtract the temperature penalty
//! 3. Rainfall below r_min: subtract the rainfall penalty
//! 4. Nutrient shortfall: for N, P, K subtract `(1 - min(1, actual/target)) × weight`
//! 5. Round, clamp to [5, 100]
//! 6. Yield = score / 100 × yield ceiling

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::market::{Earnings, MarketPrices};
use super::result::{NutrientShortfall, PenaltyBreakdown, SuitabilityResult};
use crate::models::{CropRequirement, MarketPriceRecord};

// ============================================================================
// Canonical constants
// ============================================================================

/// Penalty when temperature falls outside the crop's viable range
pub const TEMPERATURE_PENALTY: f64 = 20.0;

/// Penalty when rainfall is below the crop's minimum
pub const RAINFALL_PENALTY: f64 = 20.0;

/// Maximum nitrogen shortfall penalty (N weighted twice P and K)
pub const NITROGEN_WEIGHT: f64 = 30.0;

/// Maximum phosphorus shortfall penalty
pub const PHOSPHORUS_WEIGHT: f64 = 15.0;

/// Maximum potassium shortfall penalty
pub const POTASSIUM_WEIGHT: f64 = 15.0;

/// Yield at 100% suitability (tons/hectare)
pub const YIELD_CEILING_T_PER_HA: f64 = 9.0;

/// Score floor
pub const MIN_SCORE: u8 = 5;

/// Score ceiling
pub const MAX_SCORE: u8 = 100;

/// Scoring parameters
///
/// `Default` is the canonical constant set. A data directory may carry a
/// `scoring.json` overriding any subset of fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringParams {
    pub temperature_penalty: f64,
    pub rainfall_penalty: f64,
    pub nitrogen_weight: f64,
    pub phosphorus_weight: f64,
    pub potassium_weight: f64,
    pub yield_ceiling: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            temperature_penalty: TEMPERATURE_PENALTY,
            rainfall_penalty: RAINFALL_PENALTY,
            nitrogen_weight: NITROGEN_WEIGHT,
            phosphorus_weight: PHOSPHORUS_WEIGHT,
            potassium_weight: POTASSIUM_WEIGHT,
            yield_ceiling: YIELD_CEILING_T_PER_HA,
        }
    }
}

impl ScoringParams {
    /// Every penalty, weight and the yield ceiling must be finite and non-negative
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("temperature_penalty", self.temperature_penalty),
            ("rainfall_penalty", self.rainfall_penalty),
            ("nitrogen_weight", self.nitrogen_weight),
            ("phosphorus_weight", self.phosphorus_weight),
            ("potassium_weight", self.potassium_weight),
            ("yield_ceiling", self.yield_ceiling),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                bail!("Scoring parameter '{}' must be a finite non-negative number, got {}", name, value);
            }
        }

        Ok(())
    }
}

/// Soil and climate readings fed to the engine
///
/// Defaults come from the region baselines; every field can be overridden
/// by the caller before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringInputs {
    /// Soil nitrogen (kg/ha)
    pub nitrogen: f64,
    /// Soil phosphorus (kg/ha)
    pub phosphorus: f64,
    /// Soil potassium (kg/ha)
    pub potassium: f64,
    /// Seasonal average temperature (°C)
    pub temperature: f64,
    /// Annual rainfall (mm)
    pub rainfall: f64,
}

/// Fraction of a nutrient target that is met, in [0, 1].
///
/// A target of zero (or below) means no requirement, so the ratio is 1.
pub fn sufficiency_ratio(actual: f64, target: f64) -> f64 {
    if target > 0.0 {
        (actual / target).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Stateless scoring engine
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    params: ScoringParams,
}

impl ScoringEngine {
    pub fn new(params: ScoringParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// Compute the penalty breakdown for a requirement and inputs
    pub fn penalties(&self, req: &CropRequirement, inputs: &ScoringInputs) -> PenaltyBreakdown {
        let temperature = if req.tolerates_temperature(inputs.temperature) {
            0.0
        } else {
            self.params.temperature_penalty
        };

        let rainfall = if inputs.rainfall < req.r_min {
            self.params.rainfall_penalty
        } else {
            0.0
        };

        let nutrients = NutrientShortfall {
            nitrogen: (1.0 - sufficiency_ratio(inputs.nitrogen, req.n)) * self.params.nitrogen_weight,
            phosphorus: (1.0 - sufficiency_ratio(inputs.phosphorus, req.p))
                * self.params.phosphorus_weight,
            potassium: (1.0 - sufficiency_ratio(inputs.potassium, req.k))
                * self.params.potassium_weight,
        };

        PenaltyBreakdown {
            temperature,
            rainfall,
            nutrients,
        }
    }

    /// Suitability score in [5, 100]
    pub fn score(&self, req: &CropRequirement, inputs: &ScoringInputs) -> u8 {
        let penalties = self.penalties(req, inputs);
        clamp_score(f64::from(MAX_SCORE) - penalties.total())
    }

    /// Yield estimate (t/ha) for a score
    pub fn yield_for_score(&self, score: u8) -> f64 {
        (f64::from(score) / 100.0) * self.params.yield_ceiling
    }

    /// Score, yield and earnings against an already-resolved price record
    pub fn evaluate(
        &self,
        req: &CropRequirement,
        inputs: &ScoringInputs,
        price: Option<&MarketPriceRecord>,
    ) -> SuitabilityResult {
        let penalties = self.penalties(req, inputs);
        let score = clamp_score(f64::from(MAX_SCORE) - penalties.total());
        let yield_estimate = self.yield_for_score(score);
        let earnings = Earnings::estimate(yield_estimate, price);

        debug!(
            crop = %req.name,
            score,
            yield_estimate,
            earnings_available = earnings.is_available(),
            "Evaluated crop suitability"
        );

        SuitabilityResult {
            score,
            yield_estimate,
            earnings,
            penalties,
        }
    }

    /// Evaluate, resolving the price record from the crop name
    pub fn evaluate_with_prices(
        &self,
        req: &CropRequirement,
        inputs: &ScoringInputs,
        prices: &MarketPrices,
    ) -> SuitabilityResult {
        self.evaluate(req, inputs, prices.find_for_crop(&req.name))
    }
}

fn clamp_score(raw: f64) -> u8 {
    let rounded = raw.round();
    if rounded.is_nan() {
        return MIN_SCORE;
    }
    rounded.clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rice() -> CropRequirement {
        CropRequirement {
            name: "Rice".to_string(),
            n: 80.0,
            p: 40.0,
            k: 40.0,
            t_min: 20.0,
            t_max: 35.0,
            r_min: 1000.0,
            months: "June-July-Aug-Sep-Oct".to_string(),
        }
    }

    fn on_target() -> ScoringInputs {
        ScoringInputs {
            nitrogen: 80.0,
            phosphorus: 40.0,
            potassium: 40.0,
            temperature: 27.0,
            rainfall: 1100.0,
        }
    }

    #[test]
    fn test_all_requirements_met() {
        let engine = ScoringEngine::default();
        let result = engine.evaluate(&rice(), &on_target(), None);
        assert_eq!(result.score, 100);
        assert_relative_eq!(result.yield_estimate, 9.0);
        assert_relative_eq!(result.penalties.total(), 0.0);
    }

    #[test]
    fn test_temperature_out_of_range_applied_once() {
        let engine = ScoringEngine::default();
        let inputs = ScoringInputs { temperature: 10.0, ..on_target() };
        let result = engine.evaluate(&rice(), &inputs, None);
        assert_eq!(result.score, 80);
        assert_eq!(result.yield_estimate, (80.0 / 100.0) * 9.0);

        // Too hot is penalized the same as too cold
        let hot = ScoringInputs { temperature: 40.0, ..on_target() };
        assert_eq!(engine.score(&rice(), &hot), 80);
    }

    #[test]
    fn test_rainfall_shortfall() {
        let engine = ScoringEngine::default();
        let inputs = ScoringInputs { rainfall: 999.0, ..on_target() };
        assert_eq!(engine.score(&rice(), &inputs), 80);

        let exact = ScoringInputs { rainfall: 1000.0, ..on_target() };
        assert_eq!(engine.score(&rice(), &exact), 100);
    }

    #[test]
    fn test_nutrient_weights() {
        let engine = ScoringEngine::default();

        // Half the nitrogen target: 0.5 × 30 = 15
        let half_n = ScoringInputs { nitrogen: 40.0, ..on_target() };
        assert_eq!(engine.score(&rice(), &half_n), 85);

        // Half the phosphorus target: 0.5 × 15 = 7.5, and 92.5 rounds half away from zero
        let half_p = ScoringInputs { phosphorus: 20.0, ..on_target() };
        assert_eq!(engine.score(&rice(), &half_p), 93);

        // No potassium at all: full 15
        let no_k = ScoringInputs { potassium: 0.0, ..on_target() };
        assert_eq!(engine.score(&rice(), &no_k), 85);
    }

    #[test]
    fn test_zero_target_guard() {
        let engine = ScoringEngine::default();
        let req = CropRequirement { n: 0.0, ..rice() };
        for nitrogen in [0.0, 5.0, 500.0] {
            let inputs = ScoringInputs { nitrogen, ..on_target() };
            let penalties = engine.penalties(&req, &inputs);
            assert_relative_eq!(penalties.nutrients.nitrogen, 0.0);
        }
    }

    #[test]
    fn test_score_floor() {
        let engine = ScoringEngine::default();
        let worst = ScoringInputs {
            nitrogen: 0.0,
            phosphorus: 0.0,
            potassium: 0.0,
            temperature: -5.0,
            rainfall: 0.0,
        };
        // 100 - 20 - 20 - 60 = 0, floored
        let result = engine.evaluate(&rice(), &worst, None);
        assert_eq!(result.score, MIN_SCORE);
        assert_relative_eq!(result.yield_estimate, 0.45, epsilon = 1e-12);
    }

    #[test]
    fn test_score_bounds_over_grid() {
        let engine = ScoringEngine::default();
        for nitrogen in [0.0, 20.0, 80.0, 200.0] {
            for temperature in [-10.0, 20.0, 50.0] {
                for rainfall in [0.0, 1000.0, 5000.0] {
                    let inputs = ScoringInputs {
                        nitrogen,
                        temperature,
                        rainfall,
                        ..on_target()
                    };
                    let score = engine.score(&rice(), &inputs);
                    assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
                }
            }
        }
    }

    #[test]
    fn test_nutrient_monotonicity() {
        let engine = ScoringEngine::default();
        let req = rice();

        let sweeps: [(&str, f64, fn(f64) -> ScoringInputs); 3] = [
            ("N", req.n, |v| ScoringInputs { nitrogen: v, ..on_target() }),
            ("P", req.p, |v| ScoringInputs { phosphorus: v, ..on_target() }),
            ("K", req.k, |v| ScoringInputs { potassium: v, ..on_target() }),
        ];

        for (label, target, inputs_with) in sweeps {
            let mut previous = 0;
            for step in 0..=20 {
                let amount = target * f64::from(step) / 10.0;
                let score = engine.score(&req, &inputs_with(amount));
                assert!(score >= previous, "score dropped at {}={}", label, amount);
                if amount >= target {
                    // No extra credit past the target
                    assert_eq!(score, 100, "{}={} past target", label, amount);
                }
                previous = score;
            }
        }
    }

    #[test]
    fn test_score_bounds_over_nutrient_grid() {
        let engine = ScoringEngine::default();
        for nitrogen in [0.0, 40.0, 200.0] {
            for phosphorus in [0.0, 20.0, 100.0] {
                for potassium in [0.0, 20.0, 100.0] {
                    let inputs = ScoringInputs {
                        nitrogen,
                        phosphorus,
                        potassium,
                        ..on_target()
                    };
                    let score = engine.score(&rice(), &inputs);
                    assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
                }
            }
        }
    }

    #[test]
    fn test_yield_matches_score_fraction() {
        let engine = ScoringEngine::default();
        for score in [MIN_SCORE, 37, 80, MAX_SCORE] {
            assert_eq!(engine.yield_for_score(score), (f64::from(score) / 100.0) * 9.0);
        }
    }

    #[test]
    fn test_custom_params() {
        let params = ScoringParams {
            temperature_penalty: 30.0,
            ..ScoringParams::default()
        };
        let engine = ScoringEngine::new(params);
        let inputs = ScoringInputs { temperature: 10.0, ..on_target() };
        assert_eq!(engine.score(&rice(), &inputs), 70);
    }

    #[test]
    fn test_params_partial_json() {
        let params: ScoringParams = serde_json::from_str(r#"{"rainfall_penalty": 25}"#).unwrap();
        assert_relative_eq!(params.rainfall_penalty, 25.0);
        assert_relative_eq!(params.temperature_penalty, TEMPERATURE_PENALTY);
        assert_relative_eq!(params.yield_ceiling, YIELD_CEILING_T_PER_HA);
    }

    #[test]
    fn test_params_reject_unknown_key() {
        let parsed = serde_json::from_str::<ScoringParams>(r#"{"temprature_penalty": 30}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_params_validation() {
        assert!(ScoringParams::default().validate().is_ok());

        let negative_ceiling = ScoringParams { yield_ceiling: -9.0, ..ScoringParams::default() };
        assert!(negative_ceiling.validate().is_err());

        let nan_weight = ScoringParams { nitrogen_weight: f64::NAN, ..ScoringParams::default() };
        assert!(nan_weight.validate().is_err());

        let zero_penalty = ScoringParams { rainfall_penalty: 0.0, ..ScoringParams::default() };
        assert!(zero_penalty.validate().is_ok());
    }

    #[test]
    fn test_sufficiency_ratio() {
        assert_relative_eq!(sufficiency_ratio(40.0, 80.0), 0.5);
        assert_relative_eq!(sufficiency_ratio(160.0, 80.0), 1.0);
        assert_relative_eq!(sufficiency_ratio(-10.0, 80.0), 0.0);
        assert_relative_eq!(sufficiency_ratio(10.0, 0.0), 1.0);
    }
}
