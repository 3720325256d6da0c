//! Claims domain errors

use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("A claim requires at least one report")]
    NoReports,

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Only claims with uncertain status can be updated by practitioner (current: {status})")]
    NotReviewable { status: String },

    #[error("Review target must be accept, reject, or uncertain (got {target})")]
    InvalidReviewTarget { target: String },
}
