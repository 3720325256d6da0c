//! Core Kernel - Foundational types and utilities for the claim triage system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers
//! - Port infrastructure for external collaborator boundaries

pub mod identifiers;
pub mod ports;

pub use identifiers::SubmissionId;
pub use ports::{DomainPort, PortError};
