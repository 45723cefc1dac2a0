//! Advisory Integration Tests
//!
//! Runs the full pipeline (CSV/JSON loading, default inputs, scoring,
//! earnings, report rendering) against the sample data set in `data/`.

use std::path::PathBuf;

use approx::assert_relative_eq;
use crop_advisor_rust::advice::render_report;
use crop_advisor_rust::scoring::FALLBACK_SEASON;
use crop_advisor_rust::{
    AdvisoryError, AdvisoryRequest, CropAdvisor, Earnings, InputOverrides, Language, ReferenceData,
    ScoringParams,
};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn load() -> ReferenceData {
    crop_advisor_rust::logging::init_test();
    ReferenceData::load_dir(data_dir()).expect("sample data should load")
}

fn advise(data: &ReferenceData, crop: &str, region: &str) -> crop_advisor_rust::Advisory {
    CropAdvisor::new(data, ScoringParams::default())
        .advise(&AdvisoryRequest::new(crop, region))
        .expect("advisory")
}

// =========================================================================
// Reference data
// =========================================================================

#[test]
fn test_sample_data_loads() {
    let data = load();
    let advisor = CropAdvisor::new(&data, ScoringParams::default());

    let crops = advisor.crop_names();
    assert_eq!(crops.first(), Some(&"Rice"));
    assert!(crops.contains(&"Arhar (Pigeon Pea)"));

    let regions = advisor.eligible_regions();
    assert_eq!(regions.len(), 28);
    assert_eq!(regions.first().map(String::as_str), Some("ANDHRA PRADESH"));
    assert!(regions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_crop_labels_translated() {
    let data = load();
    let advisor = CropAdvisor::new(&data, ScoringParams::default());

    let hindi = advisor.crop_labels(Language::Hindi);
    assert_eq!(hindi[0], ("Rice", "चावल"));
    assert!(hindi.contains(&("Maize", "Maize")));

    let english = advisor.crop_labels(Language::English);
    assert!(english.iter().all(|(name, label)| name == label));
}

#[test]
fn test_default_inputs_from_region_baselines() {
    let data = load();
    let advisor = CropAdvisor::new(&data, ScoringParams::default());

    let inputs = advisor.default_inputs("Wheat", "Punjab").unwrap();
    assert_relative_eq!(inputs.nitrogen, 130.0);
    assert_relative_eq!(inputs.phosphorus, 65.0);
    assert_relative_eq!(inputs.potassium, 65.0);
    // Nov, Dec, Jan, Feb, Mar
    assert_relative_eq!(inputs.temperature, 21.8, epsilon = 1e-9);
    assert_relative_eq!(inputs.rainfall, 600.0);
}

// =========================================================================
// End-to-end scoring
// =========================================================================

#[test]
fn test_wheat_in_punjab_is_fully_suitable() {
    let data = load();
    let advisory = advise(&data, "Wheat", "punjab");

    assert_eq!(advisory.region, "PUNJAB");
    assert_eq!(advisory.result.score, 100);
    assert_relative_eq!(advisory.result.yield_estimate, 9.0);
    assert_relative_eq!(advisory.result.earnings.amount().unwrap(), 204_750.0, epsilon = 1e-6);
}

#[test]
fn test_rice_in_punjab_loses_rainfall_penalty() {
    let data = load();
    let advisory = advise(&data, "Rice", "PUNJAB");

    assert_relative_eq!(advisory.result.penalties.rainfall, 20.0);
    assert_relative_eq!(advisory.result.penalties.temperature, 0.0);
    assert_eq!(advisory.result.score, 80);
    assert_relative_eq!(advisory.result.yield_estimate, 7.2, epsilon = 1e-9);
}

#[test]
fn test_rice_in_kerala_nutrient_shortfall() {
    let data = load();
    let advisory = advise(&data, "Rice", "Kerala");

    // N 65/80 and P 35/40: 5.625 + 1.875 = 7.5 points
    assert_relative_eq!(advisory.result.penalties.nutrients.total(), 7.5, epsilon = 1e-9);
    assert_eq!(advisory.result.score, 93);

    match &advisory.result.earnings {
        Earnings::Available {
            amount,
            price_per_quintal,
            matched_crop,
        } => {
            assert_eq!(matched_crop, "Rice (Paddy Common)");
            assert_relative_eq!(*price_per_quintal, 2183.0);
            assert_relative_eq!(*amount, 0.93 * 9.0 * 10.0 * 2183.0, epsilon = 1e-6);
        }
        Earnings::Unavailable => panic!("Rice has a support price"),
    }

    let [n, p, k] = advisory.gaps;
    assert_relative_eq!(n.gap(), -15.0);
    assert_relative_eq!(p.gap(), -5.0);
    assert_relative_eq!(k.gap(), 20.0);
}

#[test]
fn test_sugarcane_without_price_is_unavailable() {
    let data = load();
    let advisory = advise(&data, "Sugarcane", "Mizoram");

    // N 55/150, P 30/80, K 30/80: 19 + 9.375 + 9.375 = 37.75 points
    assert_eq!(advisory.result.score, 62);
    assert_eq!(advisory.result.earnings, Earnings::Unavailable);

    let json = serde_json::to_value(&advisory).unwrap();
    assert_eq!(json["result"]["earnings"]["status"], "unavailable");
}

#[test]
fn test_aliased_crop_finds_price() {
    let data = load();
    let advisory = advise(&data, "Arhar (Pigeon Pea)", "Kerala");

    match &advisory.result.earnings {
        Earnings::Available { matched_crop, .. } => assert_eq!(matched_crop, "PigeonPea (Arhar/Tur)"),
        Earnings::Unavailable => panic!("Arhar should resolve to the PigeonPea price"),
    }
    assert!(advisory.cultivation_plan.as_deref().unwrap().starts_with("Sow on ridges"));
}

#[test]
fn test_unrecognized_season_uses_fallback() {
    let data = load();
    let advisory = advise(&data, "Ragi", "Karnataka");

    assert!(advisory.season.is_fallback());
    assert_eq!(advisory.season.months(), FALLBACK_SEASON.as_slice());
    // June 32, July 28, Aug 27
    assert_relative_eq!(advisory.inputs.temperature, 29.0);
    assert_eq!(advisory.result.score, 100);
    assert!(advisory.cultivation_plan.is_none());
}

#[test]
fn test_overrides_replace_defaults() {
    let data = load();
    let advisor = CropAdvisor::new(&data, ScoringParams::default());
    let request = AdvisoryRequest::new("Rice", "Kerala").with_overrides(InputOverrides {
        temperature: Some(40.0),
        ..InputOverrides::default()
    });

    let advisory = advisor.advise(&request).unwrap();
    assert_relative_eq!(advisory.inputs.temperature, 40.0);
    assert_relative_eq!(advisory.inputs.nitrogen, 65.0);
    assert_eq!(advisory.result.score, 73);
}

#[test]
fn test_unknown_crop_and_region() {
    let data = load();
    let advisor = CropAdvisor::new(&data, ScoringParams::default());

    let err = advisor.advise(&AdvisoryRequest::new("Saffron", "Kerala")).unwrap_err();
    assert_eq!(err, AdvisoryError::UnknownCrop("Saffron".to_string()));

    let err = advisor.advise(&AdvisoryRequest::new("Rice", "Atlantis")).unwrap_err();
    assert_eq!(err, AdvisoryError::UnknownRegion("Atlantis".to_string()));
}

// =========================================================================
// Presentation
// =========================================================================

#[test]
fn test_report_in_hindi() {
    let data = load();
    let advisory = advise(&data, "Rice", "Kerala");

    let report = render_report(&advisory, Language::Hindi, data.lang_pack());
    assert!(report.starts_with("## Rice · KERALA"));
    assert!(report.contains("उपयुक्तता"));
    assert!(report.contains("| 93% | 8.37 T/Ha | ₹182,717 |"));
    assert!(report.contains("Suitability is 93 percent."));
}

#[test]
fn test_report_shows_na_without_price() {
    let data = load();
    let advisory = advise(&data, "Sugarcane", "Mizoram");

    let report = render_report(&advisory, Language::English, data.lang_pack());
    assert!(report.contains("| 62% | 5.58 T/Ha | N/A |"));
}

#[test]
fn test_agency_directory_filtered_by_region() {
    let data = load();

    let punjab = data.agencies_in("punjab").unwrap();
    assert_eq!(punjab.height(), 2);

    let goa = data.agencies_in("Goa").unwrap();
    assert_eq!(goa.height(), 0);

    let advisor = CropAdvisor::new(&data, ScoringParams::default());
    assert_eq!(advisor.agencies(" Kerala ").unwrap().height(), 2);
}
