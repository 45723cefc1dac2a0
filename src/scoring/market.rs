//! Market Earnings Estimation
//!
//! Converts a yield estimate into per-hectare earnings at the crop's minimum
//! support price. Prices are quoted per quintal; 1 ton = 10 quintals.
//!
//! A crop with no matching price record yields `Earnings::Unavailable`,
//! which is kept distinct from a computed amount of zero.

use serde::Serialize;

use crate::models::MarketPriceRecord;
use crate::utils::crop_names::market_lookup_key;

/// Quintals per metric ton
pub const QUINTALS_PER_TON: f64 = 10.0;

/// Earnings estimate for one hectare
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Earnings {
    /// Price record found
    Available {
        /// Estimated earnings (INR per hectare)
        amount: f64,
        /// Price used (INR per quintal)
        price_per_quintal: f64,
        /// Crop label of the matched price record
        matched_crop: String,
    },
    /// No price record matched the crop
    Unavailable,
}

impl Earnings {
    /// Estimate earnings for a yield (t/ha) against an optional price record
    pub fn estimate(yield_t_per_ha: f64, price: Option<&MarketPriceRecord>) -> Self {
        match price {
            Some(record) => Earnings::Available {
                amount: yield_t_per_ha * QUINTALS_PER_TON * record.price_per_quintal,
                price_per_quintal: record.price_per_quintal,
                matched_crop: record.crop.clone(),
            },
            None => Earnings::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Earnings::Available { .. })
    }

    /// Earnings amount, if available
    pub fn amount(&self) -> Option<f64> {
        match self {
            Earnings::Available { amount, .. } => Some(*amount),
            Earnings::Unavailable => None,
        }
    }
}

/// Minimum support price table, in file order
#[derive(Debug, Clone, Default)]
pub struct MarketPrices {
    records: Vec<MarketPriceRecord>,
}

impl MarketPrices {
    pub fn new(records: Vec<MarketPriceRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[MarketPriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose crop label contains the lookup key (case-insensitive)
    pub fn find_by_key(&self, key: &str) -> Option<&MarketPriceRecord> {
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }

        self.records
            .iter()
            .find(|record| record.crop.to_lowercase().contains(&key))
    }

    /// Normalize and alias a crop name, then find its price record
    pub fn find_for_crop(&self, crop_name: &str) -> Option<&MarketPriceRecord> {
        self.find_by_key(&market_lookup_key(crop_name))
    }
}
