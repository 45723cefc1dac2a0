//! Utility modules for crop advisory
//!
//! Contains shared functionality used across loading and scoring:
//! - Crop names: Parenthetical stripping and regional alias resolution
//! - Region: Canonical region keys shared by every table

pub mod crop_names;
pub mod region;

// Re-export commonly used functions
pub use crop_names::{market_lookup_key, strip_parentheticals, CROP_ALIASES};
pub use region::normalize_region_id;
