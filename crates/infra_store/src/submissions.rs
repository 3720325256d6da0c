//! Per-claim report file storage

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use core_kernel::SubmissionId;
use domain_claims::Report;

use crate::error::StoreError;

/// Stores uploaded report files under a per-claim directory and guards
/// read-back against paths escaping the submissions root.
#[derive(Debug, Clone)]
pub struct SubmissionVault {
    root: PathBuf,
}

impl SubmissionVault {
    /// Creates the vault, ensuring the root directory exists
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The submissions root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes an uploaded report file under the claim's directory.
    ///
    /// The upload filename is reduced to its final path component before use,
    /// so a crafted name can never place a file outside the claim directory.
    pub fn store_report(
        &self,
        id: &SubmissionId,
        filename: &str,
        bytes: &[u8],
    ) -> Result<Report, StoreError> {
        let safe_name = Path::new(filename)
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| StoreError::InvalidFilename(filename.to_string()))?;

        let reports_dir = self.root.join(id.to_string()).join("reports");
        fs::create_dir_all(&reports_dir)?;
        let destination = reports_dir.join(safe_name);
        fs::write(&destination, bytes)?;
        debug!(claim = %id, file = safe_name, "stored report file");

        Ok(Report::new(safe_name, destination.to_string_lossy()))
    }

    /// Resolves a report's stored path for reading, validating that it stays
    /// within the submissions root. An escaping path is a validation error,
    /// never a file read.
    pub fn resolve_report_path(&self, report: &Report) -> Result<PathBuf, StoreError> {
        let stored = PathBuf::from(&report.stored_path);
        if stored
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            return Err(StoreError::PathOutsideRoot(stored));
        }

        let root = self.root.canonicalize()?;
        let resolved = match stored.canonicalize() {
            Ok(path) => path,
            Err(_) => return Err(StoreError::ReportFileMissing(stored)),
        };
        if !resolved.starts_with(&root) {
            return Err(StoreError::PathOutsideRoot(resolved));
        }
        Ok(resolved)
    }
}
