//! Comprehensive tests for domain_claims

use core_kernel::SubmissionId;
use domain_claims::claim::{Claim, ClaimStatus, Report, ReportEvaluation};
use domain_claims::error::ClaimError;

fn test_claim() -> Claim {
    Claim::submit(
        SubmissionId::new_v7(),
        "Persistent cough and fever",
        vec![Report::new("report.txt", "/data/submissions/x/reports/report.txt")],
    )
    .unwrap()
}

// ============================================================================
// Submission Tests
// ============================================================================

mod submission_tests {
    use super::*;

    #[test]
    fn test_submit_initial_state() {
        let claim = test_claim();

        assert_eq!(claim.status, ClaimStatus::AwaitingProcessing);
        assert!(claim.final_evaluation.is_none());
        assert!(claim.practitioner_comment.is_empty());
        assert_eq!(claim.created_at, claim.updated_at);
        assert_eq!(claim.reports.len(), 1);
        assert_eq!(
            claim.reports[0].report_evaluation,
            ReportEvaluation::Pending
        );
    }

    #[test]
    fn test_submit_requires_a_report() {
        let result = Claim::submit(SubmissionId::new_v7(), "", vec![]);
        assert!(matches!(result, Err(ClaimError::NoReports)));
    }
}

// ============================================================================
// Status Machine Tests
// ============================================================================

mod status_tests {
    use super::*;

    #[test]
    fn test_awaiting_to_processing_is_valid() {
        let mut claim = test_claim();
        assert!(claim.update_status(ClaimStatus::Processing).is_ok());
        assert_eq!(claim.status, ClaimStatus::Processing);
        assert!(claim.final_evaluation.is_none());
    }

    #[test]
    fn test_awaiting_cannot_resolve_directly() {
        let mut claim = test_claim();
        assert!(claim.update_status(ClaimStatus::Accept).is_err());
        assert_eq!(claim.status, ClaimStatus::AwaitingProcessing);
    }

    #[test]
    fn test_processing_resolves_and_mirrors_final_evaluation() {
        let mut claim = test_claim();
        claim.update_status(ClaimStatus::Processing).unwrap();
        claim.update_status(ClaimStatus::Reject).unwrap();

        assert_eq!(claim.status, ClaimStatus::Reject);
        assert_eq!(claim.final_evaluation, Some(ClaimStatus::Reject));
    }

    #[test]
    fn test_terminal_status_is_immutable() {
        let mut claim = test_claim();
        claim.update_status(ClaimStatus::Processing).unwrap();
        claim.update_status(ClaimStatus::Accept).unwrap();

        for target in [
            ClaimStatus::AwaitingProcessing,
            ClaimStatus::Processing,
            ClaimStatus::Reject,
            ClaimStatus::Uncertain,
        ] {
            assert!(claim.update_status(target).is_err());
        }
        assert_eq!(claim.status, ClaimStatus::Accept);
    }

    #[test]
    fn test_status_wire_vocabulary_is_kebab_case() {
        let json = serde_json::to_string(&ClaimStatus::AwaitingProcessing).unwrap();
        assert_eq!(json, "\"awaiting-processing\"");
        let back: ClaimStatus = serde_json::from_str("\"uncertain\"").unwrap();
        assert_eq!(back, ClaimStatus::Uncertain);
    }
}

// ============================================================================
// Practitioner Review Tests
// ============================================================================

mod review_tests {
    use super::*;

    fn uncertain_claim() -> Claim {
        let mut claim = test_claim();
        claim.update_status(ClaimStatus::Processing).unwrap();
        claim.update_status(ClaimStatus::Uncertain).unwrap();
        claim
    }

    #[test]
    fn test_review_resolves_uncertain_claim() {
        let mut claim = uncertain_claim();
        claim
            .practitioner_review(ClaimStatus::Accept, "X-ray re-read, no infiltrate")
            .unwrap();

        assert_eq!(claim.status, ClaimStatus::Accept);
        assert_eq!(claim.final_evaluation, Some(ClaimStatus::Accept));
        assert_eq!(claim.practitioner_comment, "X-ray re-read, no infiltrate");
    }

    #[test]
    fn test_review_may_reaffirm_uncertain_with_comment() {
        let mut claim = uncertain_claim();
        claim
            .practitioner_review(ClaimStatus::Uncertain, "Needs a second radiologist opinion")
            .unwrap();

        assert_eq!(claim.status, ClaimStatus::Uncertain);
        // A non-empty comment distinguishes the explicit override
        assert!(!claim.practitioner_comment.is_empty());
    }

    #[test]
    fn test_review_rejected_when_not_uncertain() {
        let mut claim = test_claim();
        let before = claim.status;

        let result = claim.practitioner_review(ClaimStatus::Accept, "too early");
        assert!(matches!(result, Err(ClaimError::NotReviewable { .. })));
        assert_eq!(claim.status, before);
        assert!(claim.practitioner_comment.is_empty());
    }

    #[test]
    fn test_review_rejected_on_terminal_claim() {
        let mut claim = test_claim();
        claim.update_status(ClaimStatus::Processing).unwrap();
        claim.update_status(ClaimStatus::Reject).unwrap();

        assert!(claim
            .practitioner_review(ClaimStatus::Accept, "appeal")
            .is_err());
        assert_eq!(claim.status, ClaimStatus::Reject);
    }

    #[test]
    fn test_review_target_must_be_resolved_status() {
        let mut claim = uncertain_claim();
        let result = claim.practitioner_review(ClaimStatus::Processing, "");
        assert!(matches!(result, Err(ClaimError::InvalidReviewTarget { .. })));
    }
}
