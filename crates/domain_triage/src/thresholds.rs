//! Threshold rule engine for hematology markers
//!
//! Fixed clinical thresholds turn extracted markers into a verdict. The
//! primary rule is used first; the fallback rule is the guaranteed-available
//! decision path with zero external dependencies, used when no reference
//! material exists or the text-classification collaborator misbehaves.

use crate::markers::ClinicalMarkers;
use crate::verdict::Verdict;

/// WBC count above this is elevated (x10^9/L)
pub const WBC_ELEVATED: f64 = 11.0;
/// CRP at or above this is markedly raised (mg/L)
pub const CRP_HIGH: f64 = 50.0;
/// CRP at or below this is normal; between this and [`CRP_HIGH`] is mid-range
pub const CRP_NORMAL_MAX: f64 = 10.0;
/// Neutrophil percentage above this is elevated
pub const NEUTROPHILS_ELEVATED: f64 = 75.0;

/// Outcome of a rule evaluation: the verdict plus the markers that drove it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub verdict: Verdict,
    /// Names of elevated markers, in fixed order
    pub elevated: Vec<&'static str>,
}

/// Returns the markers exceeding their primary thresholds.
///
/// A missing marker never counts as elevated.
pub fn elevated_markers(markers: &ClinicalMarkers) -> Vec<&'static str> {
    let mut elevated = Vec::new();
    if markers.wbc.map_or(false, |v| v > WBC_ELEVATED) {
        elevated.push("wbc");
    }
    if markers.crp.map_or(false, |v| v >= CRP_HIGH) {
        elevated.push("crp");
    }
    if markers.neutrophils.map_or(false, |v| v > NEUTROPHILS_ELEVATED) {
        elevated.push("neutrophils");
    }
    elevated
}

/// Primary rule.
///
/// `true` on two or more elevated markers; `false` when the present markers
/// are all within normal bounds; `uncertain` otherwise. A missing marker
/// never blocks the all-normal determination, but a report with no markers
/// at all is uncertain: nothing is confirmed normal.
pub fn evaluate(markers: &ClinicalMarkers) -> RuleOutcome {
    let elevated = elevated_markers(markers);

    let all_normal = !markers.is_empty()
        && markers.wbc.map_or(true, |v| v <= WBC_ELEVATED)
        && markers.crp.map_or(true, |v| v <= CRP_NORMAL_MAX)
        && markers.neutrophils.map_or(true, |v| v <= NEUTROPHILS_ELEVATED);

    let verdict = if elevated.len() >= 2 {
        Verdict::Positive
    } else if all_normal {
        Verdict::Negative
    } else {
        Verdict::Uncertain
    };

    RuleOutcome { verdict, elevated }
}

/// Fallback rule, always available standalone.
///
/// `true` when at least two of {wbc elevated, crp high, neutrophils elevated}
/// hold; `false` when crp is confirmed normal and neither wbc nor neutrophils
/// are elevated; `uncertain` otherwise. The elevated set additionally reports
/// `crp_mid` for a mid-range CRP.
pub fn evaluate_fallback(markers: &ClinicalMarkers) -> RuleOutcome {
    let wbc_elevated = markers.wbc.map_or(false, |v| v > WBC_ELEVATED);
    let crp_high = markers.crp.map_or(false, |v| v >= CRP_HIGH);
    let crp_mid = markers
        .crp
        .map_or(false, |v| v > CRP_NORMAL_MAX && v < CRP_HIGH);
    let crp_normal = markers.crp.map_or(false, |v| v <= CRP_NORMAL_MAX);
    let neut_elevated = markers.neutrophils.map_or(false, |v| v > NEUTROPHILS_ELEVATED);

    let mut elevated = Vec::new();
    if wbc_elevated {
        elevated.push("wbc");
    }
    if crp_high {
        elevated.push("crp");
    }
    if crp_mid {
        elevated.push("crp_mid");
    }
    if neut_elevated {
        elevated.push("neutrophils");
    }

    let strong_signals = [wbc_elevated, crp_high, neut_elevated]
        .iter()
        .filter(|signal| **signal)
        .count();

    let verdict = if strong_signals >= 2 {
        Verdict::Positive
    } else if crp_normal && !wbc_elevated && !neut_elevated {
        Verdict::Negative
    } else {
        Verdict::Uncertain
    };

    RuleOutcome { verdict, elevated }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(wbc: Option<f64>, crp: Option<f64>, neutrophils: Option<f64>) -> ClinicalMarkers {
        ClinicalMarkers {
            wbc,
            crp,
            neutrophils,
        }
    }

    #[test]
    fn test_boundary_values_are_not_elevated() {
        // Thresholds are strict except the CRP high bound
        let at_bounds = markers(Some(11.0), Some(10.0), Some(75.0));
        assert!(elevated_markers(&at_bounds).is_empty());
        assert_eq!(evaluate(&at_bounds).verdict, Verdict::Negative);
    }

    #[test]
    fn test_crp_high_bound_is_inclusive() {
        let m = markers(None, Some(50.0), None);
        assert_eq!(elevated_markers(&m), vec!["crp"]);
    }

    #[test]
    fn test_all_null_is_uncertain() {
        let outcome = evaluate(&markers(None, None, None));
        assert_eq!(outcome.verdict, Verdict::Uncertain);
        assert!(outcome.elevated.is_empty());
    }

    #[test]
    fn test_single_present_normal_marker_is_negative() {
        let outcome = evaluate(&markers(Some(6.0), None, None));
        assert_eq!(outcome.verdict, Verdict::Negative);
    }

    #[test]
    fn test_fallback_mid_crp_blocks_negative() {
        let outcome = evaluate_fallback(&markers(Some(6.0), Some(30.0), Some(50.0)));
        assert_eq!(outcome.verdict, Verdict::Uncertain);
        assert_eq!(outcome.elevated, vec!["crp_mid"]);
    }

    #[test]
    fn test_fallback_two_strong_signals_is_positive() {
        let outcome = evaluate_fallback(&markers(Some(14.0), Some(55.0), None));
        assert_eq!(outcome.verdict, Verdict::Positive);
        assert_eq!(outcome.elevated, vec!["wbc", "crp"]);
    }

    #[test]
    fn test_fallback_all_null_is_uncertain() {
        // No CRP means normality is never confirmed
        let outcome = evaluate_fallback(&markers(None, None, None));
        assert_eq!(outcome.verdict, Verdict::Uncertain);
    }
}
