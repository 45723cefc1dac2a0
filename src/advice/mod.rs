//! Advice Generation
//!
//! Turns a scored advisory into something a grower can act on.
//!
//! ## Architecture
//! - `gaps.rs` - NPK gap analysis against crop targets
//! - `report.rs` - Markdown report, narration text and currency formatting

pub mod gaps;
pub mod report;

// Re-export public API
pub use gaps::{nutrient_gaps, Nutrient, NutrientGap};
pub use report::{format_earnings, format_inr, narration, render_report, NOT_AVAILABLE};
