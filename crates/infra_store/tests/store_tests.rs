//! Comprehensive tests for infra_store

use core_kernel::SubmissionId;
use domain_claims::{Claim, ClaimStatus, Report, ReportEvaluation};
use infra_store::{ClaimStore, StoreError};

fn sample_claim(store: &ClaimStore) -> Claim {
    let id = SubmissionId::new_v7();
    let report = store
        .vault()
        .store_report(&id, "report.txt", b"WBC Count: 13.5\nCRP: 60\nNeutrophils: 80 %")
        .unwrap();
    Claim::submit(id, "fever for three days", vec![report]).unwrap()
}

// ============================================================================
// Store Round-trip Tests
// ============================================================================

mod roundtrip_tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClaimStore::open(dir.path()).unwrap();
        let claim = sample_claim(&store);
        let id = claim.submission_id;

        store.insert(claim).await.unwrap();
        let loaded = store.get(&id).await.unwrap();

        assert_eq!(loaded.submission_id, id);
        assert_eq!(loaded.status, ClaimStatus::AwaitingProcessing);
        assert_eq!(loaded.reports.len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_claim() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClaimStore::open(dir.path()).unwrap();

        let result = store.get(&SubmissionId::new_v7()).await;
        assert!(matches!(result, Err(StoreError::ClaimNotFound(_))));
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClaimStore::open(dir.path()).unwrap();
        let claim = sample_claim(&store);

        store.insert(claim.clone()).await.unwrap();
        let result = store.insert(claim).await;
        assert!(matches!(result, Err(StoreError::DuplicateSubmission(_))));
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let id;
        {
            let store = ClaimStore::open(dir.path()).unwrap();
            let claim = sample_claim(&store);
            id = claim.submission_id;
            store.insert(claim).await.unwrap();
        }

        let reopened = ClaimStore::open(dir.path()).unwrap();
        let loaded = reopened.get(&id).await.unwrap();
        assert_eq!(loaded.submission_id, id);
    }

    #[tokio::test]
    async fn test_awaiting_ids_filters_by_status() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClaimStore::open(dir.path()).unwrap();

        let waiting = sample_claim(&store);
        let waiting_id = waiting.submission_id;
        store.insert(waiting).await.unwrap();

        let processed = sample_claim(&store);
        let processed_id = processed.submission_id;
        store.insert(processed).await.unwrap();
        store
            .update(&processed_id, |claim| {
                claim.update_status(ClaimStatus::Processing)?;
                claim.update_status(ClaimStatus::Uncertain)
            })
            .await
            .unwrap();

        let awaiting = store.awaiting_ids().await.unwrap();
        assert_eq!(awaiting, vec![waiting_id]);
    }
}

// ============================================================================
// Update Semantics Tests
// ============================================================================

mod update_tests {
    use super::*;

    #[tokio::test]
    async fn test_update_persists_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClaimStore::open(dir.path()).unwrap();
        let claim = sample_claim(&store);
        let id = claim.submission_id;
        store.insert(claim).await.unwrap();

        store
            .update(&id, |claim| {
                claim.update_status(ClaimStatus::Processing)?;
                claim.reports[0].report_evaluation = ReportEvaluation::Reject;
                claim.update_status(ClaimStatus::Reject)
            })
            .await
            .unwrap();

        let loaded = store.get(&id).await.unwrap();
        assert_eq!(loaded.status, ClaimStatus::Reject);
        assert_eq!(loaded.final_evaluation, Some(ClaimStatus::Reject));
        assert_eq!(loaded.reports[0].report_evaluation, ReportEvaluation::Reject);
    }

    #[tokio::test]
    async fn test_failed_update_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClaimStore::open(dir.path()).unwrap();
        let claim = sample_claim(&store);
        let id = claim.submission_id;
        store.insert(claim).await.unwrap();

        // Direct resolution from awaiting-processing is an invalid transition
        let result = store
            .update(&id, |claim| claim.update_status(ClaimStatus::Accept))
            .await;
        assert!(matches!(result, Err(StoreError::Claim(_))));

        let loaded = store.get(&id).await.unwrap();
        assert_eq!(loaded.status, ClaimStatus::AwaitingProcessing);
    }

    #[tokio::test]
    async fn test_terminal_claim_is_not_reprocessable() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClaimStore::open(dir.path()).unwrap();
        let claim = sample_claim(&store);
        let id = claim.submission_id;
        store.insert(claim).await.unwrap();

        store
            .update(&id, |claim| {
                claim.update_status(ClaimStatus::Processing)?;
                claim.update_status(ClaimStatus::Accept)
            })
            .await
            .unwrap();
        let first = store.get(&id).await.unwrap();

        // A second processing pass must refuse the mark step and leave every
        // stored field unchanged
        let marked = store
            .update(&id, |claim| {
                if claim.status != ClaimStatus::AwaitingProcessing {
                    return Ok(false);
                }
                claim.update_status(ClaimStatus::Processing)?;
                Ok(true)
            })
            .await
            .unwrap();
        assert!(!marked);

        let second = store.get(&id).await.unwrap();
        assert_eq!(second.status, first.status);
        assert_eq!(second.final_evaluation, first.final_evaluation);
        assert_eq!(second.updated_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_corrupt_database_is_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClaimStore::open(dir.path()).unwrap();

        std::fs::write(dir.path().join(ClaimStore::DB_FILE), "{not json").unwrap();
        let result = store.list().await;
        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }
}

// ============================================================================
// Vault and Path Safety Tests
// ============================================================================

mod vault_tests {
    use super::*;

    #[tokio::test]
    async fn test_uploaded_filename_is_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClaimStore::open(dir.path()).unwrap();
        let id = SubmissionId::new_v7();

        let report = store
            .vault()
            .store_report(&id, "../../../escape.txt", b"payload")
            .unwrap();

        assert_eq!(report.filename, "escape.txt");
        let resolved = store.vault().resolve_report_path(&report).unwrap();
        assert!(resolved.starts_with(store.vault().root().canonicalize().unwrap()));
    }

    #[tokio::test]
    async fn test_traversal_path_is_rejected_not_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClaimStore::open(dir.path()).unwrap();

        // A real file outside the submissions root
        let outside = dir.path().join("secret.txt");
        std::fs::write(&outside, b"confidential").unwrap();

        let id = SubmissionId::new_v7();
        let mut report = store.vault().store_report(&id, "report.txt", b"body").unwrap();
        report.stored_path = outside.to_string_lossy().into_owned();

        let claim = Claim::submit(id, "", vec![report]).unwrap();
        store.insert(claim).await.unwrap();

        let result = store.report_file_path(&id, "report.txt").await;
        assert!(matches!(result, Err(StoreError::PathOutsideRoot(_))));
    }

    #[tokio::test]
    async fn test_parent_components_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClaimStore::open(dir.path()).unwrap();
        let id = SubmissionId::new_v7();

        let mut report = store.vault().store_report(&id, "report.txt", b"body").unwrap();
        report.stored_path = format!(
            "{}/../{}",
            store.vault().root().display(),
            "claims_db.json"
        );

        let result = store.vault().resolve_report_path(&report);
        assert!(matches!(result, Err(StoreError::PathOutsideRoot(_))));
    }

    #[tokio::test]
    async fn test_missing_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClaimStore::open(dir.path()).unwrap();
        let id = SubmissionId::new_v7();

        let mut report = store.vault().store_report(&id, "report.txt", b"body").unwrap();
        let gone = store.vault().root().join("nonexistent.txt");
        report.stored_path = gone.to_string_lossy().into_owned();

        let result = store.vault().resolve_report_path(&report);
        assert!(matches!(result, Err(StoreError::ReportFileMissing(_))));
    }

    #[tokio::test]
    async fn test_unknown_report_filename() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClaimStore::open(dir.path()).unwrap();
        let claim = sample_claim(&store);
        let id = claim.submission_id;
        store.insert(claim).await.unwrap();

        let result = store.report_file_path(&id, "other.txt").await;
        assert!(matches!(result, Err(StoreError::ReportNotFound { .. })));
    }
}
