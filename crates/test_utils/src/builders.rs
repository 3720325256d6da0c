//! Test data builders

use core_kernel::SubmissionId;
use domain_claims::{Claim, ClaimStatus, Report};

/// Builder for test claims
///
/// Drives the claim to the requested status through valid transitions, so
/// built claims always satisfy the lifecycle invariants.
pub struct ClaimBuilder {
    submission_id: SubmissionId,
    comments: String,
    reports: Vec<Report>,
    status: Option<ClaimStatus>,
}

impl ClaimBuilder {
    pub fn new() -> Self {
        Self {
            submission_id: SubmissionId::new_v7(),
            comments: "Submitted for triage".to_string(),
            reports: Vec::new(),
            status: None,
        }
    }

    pub fn with_id(mut self, id: SubmissionId) -> Self {
        self.submission_id = id;
        self
    }

    pub fn with_comments(mut self, comments: &str) -> Self {
        self.comments = comments.to_string();
        self
    }

    pub fn with_report(mut self, filename: &str, stored_path: &str) -> Self {
        self.reports.push(Report::new(filename, stored_path));
        self
    }

    pub fn with_stored_report(mut self, report: Report) -> Self {
        self.reports.push(report);
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn build(self) -> Claim {
        let mut reports = self.reports;
        if reports.is_empty() {
            reports.push(Report::new("report.txt", "/tmp/report.txt"));
        }

        let mut claim = Claim::submit(self.submission_id, self.comments, reports)
            .expect("builder always supplies a report");
        match self.status {
            None | Some(ClaimStatus::AwaitingProcessing) => {}
            Some(ClaimStatus::Processing) => {
                claim
                    .update_status(ClaimStatus::Processing)
                    .expect("valid transition");
            }
            Some(resolved) => {
                claim
                    .update_status(ClaimStatus::Processing)
                    .expect("valid transition");
                claim.update_status(resolved).expect("valid transition");
            }
        }
        claim
    }
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}
