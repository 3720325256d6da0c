//! Claim-level decision fusion
//!
//! Combines the per-agent results of one processing pass into a single claim
//! status. Unanimity is required on both axes: every decision must agree and
//! every probability that exists must corroborate it, so a single strong
//! numeric signal can never override a dissenting categorical decision, and
//! vice versa.

use serde::{Deserialize, Serialize};

use crate::verdict::{AgentDecision, AgentKind};

/// Probabilities must exceed this to corroborate a unanimous accept
pub const ACCEPT_CORROBORATION: f64 = 0.9;
/// Probabilities must stay below this to corroborate a unanimous reject
pub const REJECT_CORROBORATION: f64 = 0.7;

/// Message recorded when no agent could be invoked for a claim
pub const NO_AGENT_MESSAGE: &str = "No agent produced a result for this claim.";

/// Normalized output of one analysis agent for one processing pass
///
/// Created fresh each pass, never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    pub agent: AgentKind,
    pub decision: AgentDecision,
    pub probability: Option<f64>,
    pub explanation: String,
}

/// Fused claim-level outcome
#[derive(Debug, Clone, PartialEq)]
pub struct FusedOutcome {
    pub status: AgentDecision,
    /// Set when fusion itself has something to record (e.g. no agent ran)
    pub note: Option<String>,
}

/// Combines per-agent decisions and probabilities into one claim status.
///
/// The probability clause applies only to probabilities that are present; a
/// unanimous set with no probabilities at all fuses on decisions alone.
pub fn fuse_decisions(results: &[AgentResult]) -> FusedOutcome {
    if results.is_empty() {
        return FusedOutcome {
            status: AgentDecision::Uncertain,
            note: Some(NO_AGENT_MESSAGE.to_string()),
        };
    }

    let probabilities: Vec<f64> = results.iter().filter_map(|r| r.probability).collect();
    let all_accept = results.iter().all(|r| r.decision == AgentDecision::Accept);
    let all_reject = results.iter().all(|r| r.decision == AgentDecision::Reject);

    let status = if all_accept && probabilities.iter().all(|p| *p > ACCEPT_CORROBORATION) {
        AgentDecision::Accept
    } else if all_reject && probabilities.iter().all(|p| *p < REJECT_CORROBORATION) {
        AgentDecision::Reject
    } else {
        AgentDecision::Uncertain
    };

    FusedOutcome { status, note: None }
}
