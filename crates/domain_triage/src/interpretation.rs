//! Human-readable interpretation of rule outcomes
//!
//! Renders the short clinical narrative stored on each report alongside the
//! structured evaluation.

use crate::markers::ClinicalMarkers;
use crate::verdict::Verdict;

/// Explanation used when the imaging collaborator produces no text
pub const NO_IMAGING_EXPLANATION: &str = "No imaging explanation generated.";

/// Renders a short clinical interpretation of a hematology verdict.
pub fn hematology_interpretation(
    verdict: Verdict,
    markers: &ClinicalMarkers,
    elevated: &[&'static str],
) -> String {
    match verdict {
        Verdict::Positive => {
            let mut text =
                String::from("The hematology results suggest that pneumonia is likely.");
            let reasons = positive_reasons(markers, elevated);
            if reasons.is_empty() {
                text.push_str(
                    " Inflammatory markers and blood counts are consistent with infection.",
                );
            } else {
                text.push_str(&format!(
                    " This is because {}, which together point to a bacterial infection such as pneumonia.",
                    reasons.join(", ")
                ));
            }
            text
        }
        Verdict::Negative => String::from(
            "The hematology results do not suggest pneumonia. \
             White blood count, CRP, and neutrophils are within or near normal limits, \
             with no significant inflammatory pattern to support a bacterial lung infection.",
        ),
        Verdict::Uncertain => {
            let mut text = String::from("The results are inconclusive for pneumonia.");
            let reasons = borderline_reasons(markers, elevated);
            if reasons.is_empty() {
                text.push_str(
                    " Values are in a grey zone; clinical and imaging correlation are needed to decide.",
                );
            } else {
                text.push_str(&format!(
                    " Some markers are raised ({}), but the overall picture is borderline.",
                    reasons.join(", ")
                ));
            }
            text
        }
    }
}

fn positive_reasons(markers: &ClinicalMarkers, elevated: &[&'static str]) -> Vec<String> {
    let mut reasons = Vec::new();
    if elevated.contains(&"wbc") {
        if let Some(wbc) = markers.wbc {
            reasons.push(format!("white blood count is elevated ({wbc})"));
        }
    }
    if elevated.contains(&"crp") {
        if let Some(crp) = markers.crp {
            reasons.push(format!("CRP is markedly raised ({crp} mg/L)"));
        }
    }
    if elevated.contains(&"neutrophils") {
        if let Some(neutrophils) = markers.neutrophils {
            reasons.push(format!("neutrophils are high ({neutrophils}%)"));
        }
    }
    reasons
}

fn borderline_reasons(markers: &ClinicalMarkers, elevated: &[&'static str]) -> Vec<String> {
    let mut reasons = Vec::new();
    if elevated.contains(&"wbc") {
        if let Some(wbc) = markers.wbc {
            reasons.push(format!("WBC is elevated ({wbc})"));
        }
    }
    if elevated.contains(&"crp") || elevated.contains(&"crp_mid") {
        if let Some(crp) = markers.crp {
            reasons.push(format!("CRP is {crp} mg/L"));
        }
    }
    if elevated.contains(&"neutrophils") {
        if let Some(neutrophils) = markers.neutrophils {
            reasons.push(format!("neutrophils are {neutrophils}%"));
        }
    }
    reasons
}
