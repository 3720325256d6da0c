//! Verdict and decision vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hematology-specific three-valued clinical classification
///
/// Serialized as the tokens `true` / `false` / `uncertain`, the vocabulary
/// shared with the text-classification collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Pathology indicators present
    #[serde(rename = "true")]
    Positive,
    /// Normal picture
    #[serde(rename = "false")]
    Negative,
    /// Insufficient or conflicting signal
    #[serde(rename = "uncertain")]
    Uncertain,
}

impl Verdict {
    /// Returns the wire token for this verdict
    pub fn as_token(&self) -> &'static str {
        match self {
            Verdict::Positive => "true",
            Verdict::Negative => "false",
            Verdict::Uncertain => "uncertain",
        }
    }

    /// Parses a free-text classifier reply into a verdict.
    ///
    /// The token must appear as a standalone word, or the reply must begin
    /// with it. Anything else is `None`; callers degrade to the fallback rule.
    pub fn parse_token(text: &str) -> Option<Verdict> {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return None;
        }
        for verdict in [Verdict::Positive, Verdict::Negative, Verdict::Uncertain] {
            let token = verdict.as_token();
            if text.starts_with(token) || text.split_whitespace().any(|word| word == token) {
                return Some(verdict);
            }
        }
        None
    }

    /// The single verdict-to-decision mapping table.
    ///
    /// A positive clinical picture rejects the claim, a normal picture
    /// accepts it. Nothing else in the system maps verdicts to decisions.
    pub fn into_decision(self) -> AgentDecision {
        match self {
            Verdict::Positive => AgentDecision::Reject,
            Verdict::Negative => AgentDecision::Accept,
            Verdict::Uncertain => AgentDecision::Uncertain,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Per-agent claim-relevant outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentDecision {
    Accept,
    Reject,
    Uncertain,
}

impl fmt::Display for AgentDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            AgentDecision::Accept => "accept",
            AgentDecision::Reject => "reject",
            AgentDecision::Uncertain => "uncertain",
        };
        f.write_str(token)
    }
}

/// Which analysis agent produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Imaging,
    Hematology,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentKind::Imaging => "imaging",
            AgentKind::Hematology => "hematology",
        };
        f.write_str(name)
    }
}
