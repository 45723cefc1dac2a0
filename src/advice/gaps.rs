//! NPK gap analysis
//!
//! Compares the soil readings used for scoring against the crop's nutrient
//! targets. A negative gap is a deficit to make up with fertilizer.

use serde::Serialize;

use crate::models::CropRequirement;
use crate::scoring::ScoringInputs;

/// Soil macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Nutrient {
    Nitrogen,
    Phosphorus,
    Potassium,
}

impl Nutrient {
    /// English label (also the language pack key)
    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Nitrogen => "Nitrogen",
            Nutrient::Phosphorus => "Phosphorus",
            Nutrient::Potassium => "Potassium",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Nutrient::Nitrogen => "N",
            Nutrient::Phosphorus => "P",
            Nutrient::Potassium => "K",
        }
    }
}

/// One row of the gap analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutrientGap {
    pub nutrient: Nutrient,
    /// Reading used for scoring (kg/ha)
    pub actual: f64,
    /// Crop target (kg/ha)
    pub target: f64,
}

impl NutrientGap {
    /// actual - target (kg/ha)
    pub fn gap(&self) -> f64 {
        self.actual - self.target
    }

    pub fn is_deficit(&self) -> bool {
        self.gap() < 0.0
    }
}

/// Gap rows for N, P and K, in that order
pub fn nutrient_gaps(req: &CropRequirement, inputs: &ScoringInputs) -> [NutrientGap; 3] {
    [
        NutrientGap {
            nutrient: Nutrient::Nitrogen,
            actual: inputs.nitrogen,
            target: req.n,
        },
        NutrientGap {
            nutrient: Nutrient::Phosphorus,
            actual: inputs.phosphorus,
            target: req.p,
        },
        NutrientGap {
            nutrient: Nutrient::Potassium,
            actual: inputs.potassium,
            target: req.k,
        },
    ]
}
