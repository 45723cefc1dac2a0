//! Growing Season Resolution
//!
//! Turns a crop's free-text season description (e.g., "June-July-Aug-Sep-Oct")
//! into a set of canonical calendar months. Matching is done on whole tokens,
//! so "Mar" never matches inside "Marathi" and "Jun" never needs to be a
//! substring of "June".

use serde::Serialize;

/// Calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All months in calendar order
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Zero-based position in the calendar year
    pub fn index(self) -> usize {
        self as usize
    }

    /// Header label used by the weather table
    pub fn label(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "June",
            Month::Jul => "July",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    fn full_name(self) -> &'static str {
        match self {
            Month::Jan => "january",
            Month::Feb => "february",
            Month::Mar => "march",
            Month::Apr => "april",
            Month::May => "may",
            Month::Jun => "june",
            Month::Jul => "july",
            Month::Aug => "august",
            Month::Sep => "september",
            Month::Oct => "october",
            Month::Nov => "november",
            Month::Dec => "december",
        }
    }

    /// Match a single token against full names, three-letter abbreviations
    /// and "sept". Case-insensitive, surrounding whitespace ignored.
    pub fn from_token(token: &str) -> Option<Month> {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return None;
        }
        if token == "sept" {
            return Some(Month::Sep);
        }

        Month::ALL.into_iter().find(|m| {
            let full = m.full_name();
            token == full || token == full[..3]
        })
    }
}

/// Months used when a season string names no recognizable month
pub const FALLBACK_SEASON: [Month; 3] = [Month::Jun, Month::Jul, Month::Aug];

/// Resolved growing season
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Season {
    months: Vec<Month>,
    fallback: bool,
}

impl Season {
    /// Parse a free-text season description.
    ///
    /// Tokens are the alphabetic runs of the input. Recognized months are
    /// deduplicated and kept in calendar order. If nothing is recognized the
    /// mid-year fallback (June, July, August) is used.
    pub fn parse(description: &str) -> Self {
        let mut found = [false; 12];
        for token in description.split(|c: char| !c.is_alphabetic()) {
            if let Some(month) = Month::from_token(token) {
                found[month.index()] = true;
            }
        }

        let months: Vec<Month> = Month::ALL
            .into_iter()
            .filter(|m| found[m.index()])
            .collect();

        if months.is_empty() {
            Self {
                months: FALLBACK_SEASON.to_vec(),
                fallback: true,
            }
        } else {
            Self {
                months,
                fallback: false,
            }
        }
    }

    /// Months of the season in calendar order (never empty)
    pub fn months(&self) -> &[Month] {
        &self.months
    }

    /// True when the description matched no month
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}
