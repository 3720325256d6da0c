//! Claims DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain_claims::{Claim, ClaimStatus, Report, ReportEvaluation};

#[derive(Debug, Serialize)]
pub struct SubmitClaimResponse {
    pub submission_id: String,
    pub status: ClaimStatus,
}

#[derive(Debug, Deserialize)]
pub struct PractitionerReviewRequest {
    pub status: String,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Serialize)]
pub struct PractitionerReviewResponse {
    pub submission_id: String,
    pub status: ClaimStatus,
}

/// Report as exposed by the API; the stored path stays server-side
#[derive(Debug, Serialize)]
pub struct ReportDto {
    pub filename: String,
    pub explanation: String,
    pub report_evaluation: ReportEvaluation,
}

#[derive(Debug, Serialize)]
pub struct ClaimDto {
    pub submission_id: String,
    pub comments: String,
    pub status: ClaimStatus,
    pub final_evaluation: Option<ClaimStatus>,
    pub practitioner_comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub reports: Vec<ReportDto>,
}

#[derive(Debug, Serialize)]
pub struct ClaimListResponse {
    pub claims: Vec<ClaimDto>,
}

#[derive(Debug, Serialize)]
pub struct ClaimEnvelope {
    pub claim: ClaimDto,
}

impl From<&Report> for ReportDto {
    fn from(report: &Report) -> Self {
        Self {
            filename: report.filename.clone(),
            explanation: report.explanation.clone(),
            report_evaluation: report.report_evaluation,
        }
    }
}

impl From<&Claim> for ClaimDto {
    fn from(claim: &Claim) -> Self {
        Self {
            submission_id: claim.submission_id.to_string(),
            comments: claim.comments.clone(),
            status: claim.status,
            final_evaluation: claim.final_evaluation,
            practitioner_comment: claim.practitioner_comment.clone(),
            created_at: claim.created_at,
            updated_at: claim.updated_at,
            reports: claim.reports.iter().map(ReportDto::from).collect(),
        }
    }
}
