//! Claim Lifecycle Worker
//!
//! The application service that advances claims through their lifecycle. A
//! single background task polls the store for claims awaiting processing,
//! routes each claim's reports to the matching analysis pipeline, fuses the
//! per-agent decisions, and persists the result atomically. A failing
//! pipeline degrades that agent's result to uncertain; a failing claim never
//! aborts the cycle.

pub mod pipeline;
pub mod router;
pub mod worker;

pub use router::{kind_of, route, ReportKind, RoutingPlan};
pub use worker::ClaimLifecycleWorker;
