//! The claim lifecycle worker

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use core_kernel::SubmissionId;
use domain_claims::{ClaimStatus, ReportEvaluation};
use domain_triage::fusion::{fuse_decisions, AgentResult};
use domain_triage::ports::{ImagingInference, TextClassifier};
use domain_triage::{AgentDecision, AgentKind};
use infra_agents::ReferenceLibrary;
use infra_store::{ClaimStore, StoreError};

use crate::pipeline::{run_hematology, run_imaging, unreadable_report_result};
use crate::router::{kind_of, route};

/// Background worker advancing claims through the lifecycle.
///
/// Generic over the collaborator ports so the processing logic runs
/// identically against the real HTTP services and against test doubles.
pub struct ClaimLifecycleWorker<I, C> {
    store: Arc<ClaimStore>,
    imaging: Arc<I>,
    classifier: Arc<C>,
    reference: ReferenceLibrary,
    poll_interval: Duration,
}

impl<I, C> ClaimLifecycleWorker<I, C>
where
    I: ImagingInference,
    C: TextClassifier,
{
    /// Creates a worker over the given store and collaborators
    pub fn new(
        store: Arc<ClaimStore>,
        imaging: Arc<I>,
        classifier: Arc<C>,
        reference: ReferenceLibrary,
        poll_interval: Duration,
    ) -> Self {
        Self {
            store,
            imaging,
            classifier,
            reference,
            poll_interval,
        }
    }

    /// Runs the polling loop until the task is dropped.
    ///
    /// A store failure skips the cycle; it never ends the loop.
    pub async fn run(self) {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            interval_ms = self.poll_interval.as_millis() as u64,
            "claim lifecycle worker started"
        );

        loop {
            ticker.tick().await;
            if let Err(err) = self.run_cycle().await {
                warn!(error = %err, "claim store unavailable, skipping cycle");
            }
        }
    }

    /// One polling cycle over every claim awaiting processing.
    ///
    /// An ill-behaved claim is logged and skipped; the rest of the cycle
    /// still runs.
    pub async fn run_cycle(&self) -> Result<(), StoreError> {
        let pending = self.store.awaiting_ids().await?;
        for id in pending {
            if let Err(err) = self.process_claim(&id).await {
                warn!(claim = %id, error = %err, "claim processing pass failed");
            }
        }
        Ok(())
    }

    /// Processes one claim: mark, analyze, fuse, persist.
    ///
    /// The claim is atomically marked `processing` before any work happens.
    /// Under the store's serialized read-modify-write this guarantees at most
    /// one active pass per claim, even when overlapping cycles observe the
    /// same claim.
    pub async fn process_claim(&self, id: &SubmissionId) -> Result<(), StoreError> {
        let claimed = self
            .store
            .update(id, |claim| {
                if claim.status != ClaimStatus::AwaitingProcessing {
                    return Ok(false);
                }
                claim.update_status(ClaimStatus::Processing)?;
                Ok(true)
            })
            .await?;
        if !claimed {
            return Ok(());
        }

        let claim = self.store.get(id).await?;
        let plan = route(&claim.reports);

        let mut results: Vec<AgentResult> = Vec::new();
        if let Some(index) = plan.imaging {
            let report = &claim.reports[index];
            let result =
                run_imaging(self.imaging.as_ref(), Path::new(&report.stored_path)).await;
            results.push(result);
        }
        if let Some(index) = plan.hematology {
            let report = &claim.reports[index];
            let result = match tokio::fs::read_to_string(&report.stored_path).await {
                Ok(text) => {
                    run_hematology(self.classifier.as_ref(), &self.reference, &text).await
                }
                Err(err) => unreadable_report_result(AgentKind::Hematology, &report.filename, &err),
            };
            results.push(result);
        }

        let fused = fuse_decisions(&results);
        let status = match fused.status {
            AgentDecision::Accept => ClaimStatus::Accept,
            AgentDecision::Reject => ClaimStatus::Reject,
            AgentDecision::Uncertain => ClaimStatus::Uncertain,
        };

        self.store
            .update(id, move |claim| {
                for report in claim.reports.iter_mut() {
                    let kind = kind_of(&report.filename);
                    match results.iter().find(|result| result.agent == kind) {
                        Some(result) => {
                            report.explanation = result.explanation.clone();
                            report.report_evaluation = evaluation_for(result.decision);
                        }
                        None => {
                            report.explanation = fused.note.clone().unwrap_or_default();
                            report.report_evaluation = ReportEvaluation::Uncertain;
                        }
                    }
                }
                claim.update_status(status)
            })
            .await?;

        info!(claim = %id, %status, "claim resolved");
        Ok(())
    }
}

fn evaluation_for(decision: AgentDecision) -> ReportEvaluation {
    match decision {
        AgentDecision::Accept => ReportEvaluation::Accept,
        AgentDecision::Reject => ReportEvaluation::Reject,
        AgentDecision::Uncertain => ReportEvaluation::Uncertain,
    }
}
