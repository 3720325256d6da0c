//! Per-report agent pipelines
//!
//! Each pipeline turns one report into an [`AgentResult`]. Every failure path
//! is contained here: an unreachable collaborator, a malformed reply, or an
//! unreadable file degrades the result to uncertain with an explanatory
//! message. A pipeline never returns an error to the worker.

use std::path::Path;

use tracing::warn;

use domain_triage::fusion::AgentResult;
use domain_triage::imaging::decision_from_probability;
use domain_triage::interpretation::{hematology_interpretation, NO_IMAGING_EXPLANATION};
use domain_triage::markers::extract_markers;
use domain_triage::ports::{ImagingInference, TextClassifier};
use domain_triage::thresholds;
use domain_triage::{AgentDecision, AgentKind, Verdict};
use infra_agents::ReferenceLibrary;

/// Runs the imaging pipeline for one stored image.
///
/// A failed inference call forces an uncertain result; a failed explanation
/// call keeps the computed decision and substitutes a stock message.
pub async fn run_imaging<I: ImagingInference>(imaging: &I, image_path: &Path) -> AgentResult {
    let outcome = match imaging.infer(image_path).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(image = %image_path.display(), error = %err, "imaging inference failed");
            return AgentResult {
                agent: AgentKind::Imaging,
                decision: AgentDecision::Uncertain,
                probability: None,
                explanation: format!("Imaging: inference unavailable: {err}"),
            };
        }
    };

    let decision = decision_from_probability(outcome.probability);
    let explanation = match imaging.explain(image_path, &outcome).await {
        Ok(text) => text,
        Err(err) => {
            warn!(image = %image_path.display(), error = %err, "imaging explanation failed");
            NO_IMAGING_EXPLANATION.to_string()
        }
    };

    AgentResult {
        agent: AgentKind::Imaging,
        decision,
        probability: Some(outcome.probability),
        explanation: format!("Imaging: {explanation}"),
    }
}

/// Runs the hematology pipeline for one report text.
///
/// The threshold rules decide outright when they can. An ambiguous report is
/// referred to the text classifier when reference material exists; a missing
/// library, an unreachable classifier, or a garbage reply all degrade to the
/// zero-dependency fallback rule. The pipeline always resolves to a verdict.
pub async fn run_hematology<C: TextClassifier>(
    classifier: &C,
    reference: &ReferenceLibrary,
    report_text: &str,
) -> AgentResult {
    let markers = extract_markers(report_text);
    let primary = thresholds::evaluate(&markers);

    let outcome = if primary.verdict != Verdict::Uncertain {
        primary
    } else {
        let examples = reference.load();
        if examples.is_empty() {
            thresholds::evaluate_fallback(&markers)
        } else {
            match classifier.classify(report_text, &examples).await {
                Ok(verdict) => thresholds::RuleOutcome {
                    verdict,
                    elevated: primary.elevated,
                },
                Err(err) => {
                    warn!(error = %err, "text classification failed, using fallback rule");
                    thresholds::evaluate_fallback(&markers)
                }
            }
        }
    };

    let interpretation = hematology_interpretation(outcome.verdict, &markers, &outcome.elevated);

    AgentResult {
        agent: AgentKind::Hematology,
        decision: outcome.verdict.into_decision(),
        probability: None,
        explanation: format!("Hematology: {interpretation}"),
    }
}

/// Result recorded when a report file cannot be read at all
pub fn unreadable_report_result(kind: AgentKind, filename: &str, err: &std::io::Error) -> AgentResult {
    AgentResult {
        agent: kind,
        decision: AgentDecision::Uncertain,
        probability: None,
        explanation: format!("{kind} report {filename} could not be read: {err}"),
    }
}
