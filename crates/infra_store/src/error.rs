//! Persistence errors

use std::path::PathBuf;

use thiserror::Error;

use core_kernel::SubmissionId;
use domain_claims::ClaimError;

/// Errors that can occur in the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Claim not found: {0}")]
    ClaimNotFound(SubmissionId),

    #[error("A claim with submission id {0} already exists")]
    DuplicateSubmission(SubmissionId),

    #[error("Report not found for claim {submission_id}: {filename}")]
    ReportNotFound {
        submission_id: SubmissionId,
        filename: String,
    },

    #[error("Invalid report filename: {0}")]
    InvalidFilename(String),

    #[error("Report path escapes the submissions root: {0}")]
    PathOutsideRoot(PathBuf),

    #[error("Stored report file is missing: {0}")]
    ReportFileMissing(PathBuf),

    #[error(transparent)]
    Claim(#[from] ClaimError),
}
