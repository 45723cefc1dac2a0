//! Advisory Report Generation
//!
//! Renders an advisory as markdown with translated labels, plus the short
//! narration handed to a speech synthesizer.

use super::gaps::NutrientGap;
use crate::advisor::Advisory;
use crate::i18n::{Language, Translator};
use crate::scoring::{Earnings, SuitabilityResult};

/// Placeholder for values that cannot be computed
pub const NOT_AVAILABLE: &str = "N/A";

/// Spoken summary of a result
pub fn narration(result: &SuitabilityResult) -> String {
    format!(
        "Suitability is {} percent. Yield is {:.2} tons per hectare.",
        result.score, result.yield_estimate
    )
}

/// Group an integer with thousands separators ("1234567" → "1,234,567")
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Whole rupees with thousands separators, fraction truncated
pub fn format_inr(amount: f64) -> String {
    let whole = amount.trunc();
    if whole < 0.0 {
        format!("-₹{}", group_thousands(whole.abs() as u64))
    } else {
        format!("₹{}", group_thousands(whole as u64))
    }
}

/// Earnings for display: rupees, or "N/A" when no price matched
pub fn format_earnings(earnings: &Earnings) -> String {
    match earnings.amount() {
        Some(amount) => format_inr(amount),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Generate the complete markdown report for an advisory
pub fn render_report<T: Translator>(advisory: &Advisory, lang: Language, translator: &T) -> String {
    let tr = |text: &'static str| translator.translate(lang, text);
    let result = &advisory.result;

    let mut lines = Vec::new();

    lines.push(format!("## {} · {}", advisory.crop, advisory.region));
    lines.push(String::new());

    // Headline metrics
    let earnings_header = if result.earnings.is_available() {
        format!("{} (per Hectare)", tr("Potential Earnings"))
    } else {
        tr("Potential Earnings").to_string()
    };
    lines.push(format!(
        "| {} | {} | {} |",
        tr("Suitability"),
        tr("Yield Estimate"),
        earnings_header
    ));
    lines.push("|---|---|---|".to_string());
    lines.push(format!(
        "| {}% | {:.2} T/Ha | {} |",
        result.score,
        result.yield_estimate,
        format_earnings(&result.earnings)
    ));
    lines.push(String::new());

    // Action plan
    lines.push(format!("### {}", tr("Action Plan")));
    lines.push(String::new());
    let plan = advisory.cultivation_plan.as_deref().unwrap_or(NOT_AVAILABLE);
    lines.push(translator.translate(lang, plan).to_string());
    lines.push(String::new());

    // Soil health
    lines.push(format!("### {}", tr("Soil Health")));
    lines.push(String::new());
    lines.push(format!("#### {}", tr("Detailed NPK Gap Analysis")));
    lines.push(String::new());
    lines.push(format!("| | kg/ha | Target | {} |", tr("gap")));
    lines.push("|---|---|---|---|".to_string());
    for gap in &advisory.gaps {
        lines.push(gap_row(gap, lang, translator));
    }
    lines.push(String::new());

    let req = &advisory.requirement;
    lines.push(format!("**{} {}:**", tr("Requirement for"), advisory.crop));
    lines.push(format!(
        "Target N: `{} kg/ha` | Target P: `{} kg/ha` | Target K: `{} kg/ha`",
        req.n, req.p, req.k
    ));
    lines.push(String::new());

    lines.push(season_line(advisory));
    lines.push(String::new());

    let penalties = penalty_lines(result);
    if !penalties.is_empty() {
        lines.extend(penalties);
        lines.push(String::new());
    }

    // Narration
    lines.push(format!("### {}", tr("Audio")));
    lines.push(String::new());
    lines.push(format!("> {}", translator.translate(lang, &advisory.narration)));

    lines.join("\n")
}

fn gap_row<T: Translator>(gap: &NutrientGap, lang: Language, translator: &T) -> String {
    format!(
        "| {} ({}) | {:.0} | {:.0} | {:+.0} |",
        translator.translate(lang, gap.nutrient.label()),
        gap.nutrient.symbol(),
        gap.actual,
        gap.target,
        gap.gap()
    )
}

fn season_line(advisory: &Advisory) -> String {
    let months: Vec<&str> = advisory.season.months().iter().map(|m| m.label()).collect();
    let mut line = format!(
        "Season: {} (average {:.1}°C)",
        months.join("-"),
        advisory.inputs.temperature
    );
    if advisory.season.is_fallback() {
        line.push_str(" - no season months recognized, mid-year default used");
    }
    line
}

fn penalty_lines(result: &SuitabilityResult) -> Vec<String> {
    let p = &result.penalties;
    let mut lines = Vec::new();

    if p.temperature > 0.0 {
        lines.push(format!("- Temperature outside viable range: -{:.0}", p.temperature));
    }
    if p.rainfall > 0.0 {
        lines.push(format!("- Rainfall below minimum: -{:.0}", p.rainfall));
    }
    if p.nutrients.total() > 0.0 {
        lines.push(format!(
            "- Nutrient shortfall: -{:.1} (N {:.1}, P {:.1}, K {:.1})",
            p.nutrients.total(),
            p.nutrients.nitrogen,
            p.nutrients.phosphorus,
            p.nutrients.potassium
        ));
    }

    lines
}
