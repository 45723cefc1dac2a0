//! Region identifier normalization
//!
//! Every table is keyed by the same canonical form so joins between the
//! nutrient, weather and agency tables never silently drop a region.

/// Canonical region key: trimmed, uppercased
pub fn normalize_region_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Check whether a column header names the region column
pub fn is_region_header(header: &str) -> bool {
    header.trim().to_lowercase().contains("state")
}
