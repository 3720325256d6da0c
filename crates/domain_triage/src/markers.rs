//! Clinical marker extraction from free-form report text

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Numeric clinical markers extracted from a hematology report
///
/// A `None` field means the marker was not found in the report, never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalMarkers {
    /// White blood cell count (x10^9/L)
    pub wbc: Option<f64>,
    /// C-reactive protein (mg/L)
    pub crp: Option<f64>,
    /// Neutrophil percentage
    pub neutrophils: Option<f64>,
}

impl ClinicalMarkers {
    /// Returns true when no marker was found at all
    pub fn is_empty(&self) -> bool {
        self.wbc.is_none() && self.crp.is_none() && self.neutrophils.is_none()
    }
}

static WBC_PRIMARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)WBC\s+Count:\s*([\d.,]+)").unwrap());
static WBC_FALLBACK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)WBC[^:]*:\s*([\d.,]+)").unwrap());
static CRP_PRIMARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)CRP\)?:\s*([\d.,]+)").unwrap());
static CRP_FALLBACK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)C-reactive protein[^:]*:\s*([\d.,]+)\s*mg").unwrap());
static NEUTROPHILS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Neutrophils:\s*([\d.,]+)\s*%").unwrap());

/// Extracts clinical markers from report text.
///
/// Each marker tries a primary pattern and then a looser fallback; the first
/// successful numeric parse wins. Unparsable or absent values yield `None`
/// fields, never an error.
pub fn extract_markers(report_text: &str) -> ClinicalMarkers {
    let wbc = parse_value(report_text, &WBC_PRIMARY)
        .or_else(|| parse_value(report_text, &WBC_FALLBACK));
    let crp = parse_value(report_text, &CRP_PRIMARY)
        .or_else(|| parse_value(report_text, &CRP_FALLBACK));
    let neutrophils = parse_value(report_text, &NEUTROPHILS);

    ClinicalMarkers {
        wbc,
        crp,
        neutrophils,
    }
}

/// First capture group parsed as a finite float; decimal commas are
/// normalized to decimal points before parsing.
fn parse_value(text: &str, pattern: &Regex) -> Option<f64> {
    let capture = pattern.captures(text)?.get(1)?;
    let normalized = capture.as_str().replace(',', ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
