//! Durable claim store
//!
//! A single JSON document holds every claim. All access happens under one
//! exclusive lock held across the full read-modify-write span, and every
//! write is a write-replace: serialize into a temp file next to the database,
//! then rename it over the database file. The store never mutates the
//! database file in place.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use core_kernel::SubmissionId;
use domain_claims::{Claim, ClaimError, ClaimStatus};

use crate::error::StoreError;
use crate::submissions::SubmissionVault;

/// On-disk document shape
#[derive(Debug, Default, Serialize, Deserialize)]
struct Database {
    claims: Vec<Claim>,
}

/// Durable mapping from submission id to claim record
pub struct ClaimStore {
    data_dir: PathBuf,
    db_path: PathBuf,
    vault: SubmissionVault,
    // One lock serializes every read-modify-write on the database file
    lock: Mutex<()>,
}

impl ClaimStore {
    /// Database filename within the data directory
    pub const DB_FILE: &'static str = "claims_db.json";

    /// Opens the store under `data_dir`, creating the directory layout and an
    /// empty database on first use.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;
        let vault = SubmissionVault::new(data_dir.join("submissions"))?;
        let db_path = data_dir.join(Self::DB_FILE);

        let store = Self {
            data_dir,
            db_path,
            vault,
            lock: Mutex::new(()),
        };
        if !store.db_path.exists() {
            store.write_database(&Database::default())?;
        }
        Ok(store)
    }

    /// The report file vault for this store
    pub fn vault(&self) -> &SubmissionVault {
        &self.vault
    }

    /// All claims, in storage order
    pub async fn list(&self) -> Result<Vec<Claim>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_database()?.claims)
    }

    /// One claim by submission id
    pub async fn get(&self, id: &SubmissionId) -> Result<Claim, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_database()?
            .claims
            .into_iter()
            .find(|claim| claim.submission_id == *id)
            .ok_or(StoreError::ClaimNotFound(*id))
    }

    /// Ids of claims currently awaiting processing
    pub async fn awaiting_ids(&self) -> Result<Vec<SubmissionId>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self
            .read_database()?
            .claims
            .iter()
            .filter(|claim| claim.status == ClaimStatus::AwaitingProcessing)
            .map(|claim| claim.submission_id)
            .collect())
    }

    /// Persists a new claim
    pub async fn insert(&self, claim: Claim) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut db = self.read_database()?;
        if db
            .claims
            .iter()
            .any(|existing| existing.submission_id == claim.submission_id)
        {
            return Err(StoreError::DuplicateSubmission(claim.submission_id));
        }
        debug!(claim = %claim.submission_id, "inserting claim");
        db.claims.push(claim);
        self.write_database(&db)
    }

    /// Applies `apply` to one claim and persists the result, all under the
    /// store lock. An error from the closure aborts the update without
    /// writing anything.
    pub async fn update<T, F>(&self, id: &SubmissionId, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Claim) -> Result<T, ClaimError>,
    {
        let _guard = self.lock.lock().await;
        let mut db = self.read_database()?;
        let claim = db
            .claims
            .iter_mut()
            .find(|claim| claim.submission_id == *id)
            .ok_or(StoreError::ClaimNotFound(*id))?;
        let value = apply(claim)?;
        self.write_database(&db)?;
        Ok(value)
    }

    /// Resolves the stored file path for one report of one claim, validating
    /// that the path stays within the submissions root.
    pub async fn report_file_path(
        &self,
        id: &SubmissionId,
        filename: &str,
    ) -> Result<PathBuf, StoreError> {
        let claim = self.get(id).await?;
        let report = claim
            .reports
            .iter()
            .find(|report| report.filename == filename)
            .ok_or_else(|| StoreError::ReportNotFound {
                submission_id: *id,
                filename: filename.to_string(),
            })?;
        self.vault.resolve_report_path(report)
    }

    fn read_database(&self) -> Result<Database, StoreError> {
        let raw = std::fs::read_to_string(&self.db_path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_database(&self, db: &Database) -> Result<(), StoreError> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.data_dir)?;
        serde_json::to_writer_pretty(&mut tmp, db)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.db_path)
            .map_err(|persist| persist.error)?;
        Ok(())
    }
}
