//! Claims Domain
//!
//! This crate implements the claim lifecycle from submission through
//! automatic triage to practitioner review.
//!
//! # Claim Lifecycle
//!
//! ```text
//! awaiting-processing -> processing -> accept / reject / uncertain
//!                                      (uncertain -> practitioner review)
//! ```

pub mod claim;
pub mod error;

pub use claim::{Claim, ClaimStatus, Report, ReportEvaluation};
pub use error::ClaimError;
