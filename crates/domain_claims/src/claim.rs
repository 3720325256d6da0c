//! Claim aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::SubmissionId;

use crate::error::ClaimError;

/// Claim lifecycle status
///
/// `accept` and `reject` are terminal; `uncertain` stays open for
/// practitioner review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClaimStatus {
    /// Submitted, waiting for the lifecycle worker
    AwaitingProcessing,
    /// Claimed by the lifecycle worker for this pass
    Processing,
    /// Accepted
    Accept,
    /// Rejected
    Reject,
    /// Needs practitioner review
    Uncertain,
}

impl ClaimStatus {
    /// Terminal statuses are immutable
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Accept | ClaimStatus::Reject)
    }

    /// Statuses a processing pass or a review can resolve to
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            ClaimStatus::Accept | ClaimStatus::Reject | ClaimStatus::Uncertain
        )
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            ClaimStatus::AwaitingProcessing => "awaiting-processing",
            ClaimStatus::Processing => "processing",
            ClaimStatus::Accept => "accept",
            ClaimStatus::Reject => "reject",
            ClaimStatus::Uncertain => "uncertain",
        };
        f.write_str(token)
    }
}

/// Per-report evaluation recorded by the lifecycle worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportEvaluation {
    Pending,
    Accept,
    Reject,
    Uncertain,
}

/// One uploaded report file belonging to exactly one claim
///
/// `filename` and `stored_path` are immutable after creation; the evaluation
/// fields are mutated only by the lifecycle worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Sanitized upload filename, unique within the claim's report list
    pub filename: String,
    /// Absolute path of the stored file
    pub stored_path: String,
    /// Narrative produced by the analysis agent
    pub explanation: String,
    /// Evaluation for this report
    pub report_evaluation: ReportEvaluation,
}

impl Report {
    /// Creates a freshly stored, unevaluated report
    pub fn new(filename: impl Into<String>, stored_path: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            stored_path: stored_path.into(),
            explanation: String::new(),
            report_evaluation: ReportEvaluation::Pending,
        }
    }
}

/// A submitted claim and its reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Unique, stable identifier
    pub submission_id: SubmissionId,
    /// Free-text comments from the submitter
    pub comments: String,
    /// Lifecycle status
    pub status: ClaimStatus,
    /// Mirrors `status` once the claim resolves
    pub final_evaluation: Option<ClaimStatus>,
    /// Set by practitioner review; non-empty marks an explicit override
    pub practitioner_comment: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
    /// Uploaded reports, at least one
    pub reports: Vec<Report>,
}

impl Claim {
    /// Creates a newly submitted claim
    pub fn submit(
        submission_id: SubmissionId,
        comments: impl Into<String>,
        reports: Vec<Report>,
    ) -> Result<Self, ClaimError> {
        if reports.is_empty() {
            return Err(ClaimError::NoReports);
        }
        let now = Utc::now();

        Ok(Self {
            submission_id,
            comments: comments.into(),
            status: ClaimStatus::AwaitingProcessing,
            final_evaluation: None,
            practitioner_comment: String::new(),
            created_at: now,
            updated_at: now,
            reports,
        })
    }

    /// Updates the status along the automatic lifecycle
    pub fn update_status(&mut self, status: ClaimStatus) -> Result<(), ClaimError> {
        if !self.can_transition_to(status) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: status.to_string(),
            });
        }
        self.status = status;
        if status.is_resolved() {
            self.final_evaluation = Some(status);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Applies a practitioner review, bypassing the fusion engine.
    ///
    /// Only a claim currently `uncertain` can be reviewed. Re-selecting
    /// `uncertain` together with a comment records the explicit override.
    pub fn practitioner_review(
        &mut self,
        target: ClaimStatus,
        comment: impl Into<String>,
    ) -> Result<(), ClaimError> {
        if self.status != ClaimStatus::Uncertain {
            return Err(ClaimError::NotReviewable {
                status: self.status.to_string(),
            });
        }
        if !target.is_resolved() {
            return Err(ClaimError::InvalidReviewTarget {
                target: target.to_string(),
            });
        }
        self.status = target;
        self.final_evaluation = Some(target);
        self.practitioner_comment = comment.into();
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Checks whether the automatic lifecycle permits a transition
    fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self.status, target),
            (AwaitingProcessing, Processing)
                | (Processing, Accept)
                | (Processing, Reject)
                | (Processing, Uncertain)
        )
    }
}
