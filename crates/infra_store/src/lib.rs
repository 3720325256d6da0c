//! Persistence Layer
//!
//! This crate owns the durable state of the triage system: the JSON claim
//! database and the per-claim report files. The database is the only shared
//! mutable state in the process; every read-modify-write happens under a
//! single exclusive lock, and every write replaces the file atomically.

pub mod error;
pub mod store;
pub mod submissions;

pub use error::StoreError;
pub use store::ClaimStore;
pub use submissions::SubmissionVault;
