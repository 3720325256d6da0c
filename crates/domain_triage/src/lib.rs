//! Triage Decision Domain
//!
//! This crate implements the decision core of the claim triage system:
//! extraction of clinical markers from hematology report text, the fixed
//! threshold rules turning markers into a verdict, the probability policy for
//! imaging results, and the fusion of per-agent decisions into one
//! claim-level status.
//!
//! # Decision flow
//!
//! ```text
//! report text -> ClinicalMarkers -> Verdict -> AgentDecision \
//!                                                             > fused status
//! image -> inference probability -> AgentDecision            /
//! ```

pub mod markers;
pub mod thresholds;
pub mod imaging;
pub mod fusion;
pub mod interpretation;
pub mod verdict;
pub mod ports;

pub use markers::{extract_markers, ClinicalMarkers};
pub use thresholds::RuleOutcome;
pub use fusion::{fuse_decisions, AgentResult, FusedOutcome};
pub use verdict::{AgentDecision, AgentKind, Verdict};
pub use ports::{ImagingInference, InferenceOutcome, LabeledExamples, TextClassifier};
