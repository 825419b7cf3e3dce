//! The dispatch policy.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};
use triage_ai::Coordinator;
use triage_core::TriageConfig;
use triage_store::{TicketId, TicketRepository, TicketStatus};

/// Why an enrichment invocation did not enrich.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The ticket was deleted before (or while) the job ran. A no-op.
    #[error("ticket no longer exists")]
    TicketMissing,
    /// Classification or persistence failed outright.
    #[error("analysis failed: {0}")]
    AnalysisFailed(String),
}

/// Observable result of one dispatch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The ticket's enrichment fields were written.
    Enriched,
    /// The job was queued; it completes whenever the worker gets to it.
    Deferred,
    /// The ticket was left un-enriched, with the reason.
    Skipped(SkipReason),
}

/// One enrichment unit of work: look the ticket up, analyze its text,
/// apply the result atomically.
pub(crate) struct EnrichJob {
    pub(crate) repo: Arc<dyn TicketRepository>,
    pub(crate) coordinator: Coordinator,
}

impl EnrichJob {
    /// Run enrichment for one ticket. `Ok(())` means the ticket is now
    /// enriched; `Err` carries the skip reason and leaves status untouched
    /// beyond `Enriching` (the terminal `Skipped` mark is an inline-mode
    /// decision made by the dispatcher).
    pub(crate) async fn run(&self, id: TicketId) -> Result<(), SkipReason> {
        let ticket = match self.repo.find_by_id(id).await {
            Ok(Some(ticket)) => ticket,
            Ok(None) => {
                debug!(id, "ticket gone before enrichment");
                return Err(SkipReason::TicketMissing);
            }
            Err(e) => return Err(SkipReason::AnalysisFailed(e.to_string())),
        };

        if let Err(e) = self.repo.set_status(id, TicketStatus::Enriching).await {
            return Err(SkipReason::AnalysisFailed(e.to_string()));
        }

        let result = self
            .coordinator
            .analyze(&ticket.title, &ticket.description)
            .await
            .map_err(|e| SkipReason::AnalysisFailed(e.to_string()))?;

        match self.repo.apply_enrichment(id, &result).await {
            Ok(true) => Ok(()),
            // Deleted between lookup and apply: still a no-op.
            Ok(false) => Err(SkipReason::TicketMissing),
            Err(e) => Err(SkipReason::AnalysisFailed(e.to_string())),
        }
    }
}

/// Entry point for triggering enrichment of a newly created ticket.
pub struct Dispatcher {
    job: Arc<EnrichJob>,
    queue: Option<crate::WorkerQueue>,
}

impl Dispatcher {
    /// Build a dispatcher in the mode the configuration selects. Deferred
    /// mode spawns the worker task, so this must run inside a runtime.
    pub fn new(repo: Arc<dyn TicketRepository>, coordinator: Coordinator, config: &TriageConfig) -> Self {
        if config.async_enrichment {
            Self::deferred(repo, coordinator)
        } else {
            Self::inline(repo, coordinator)
        }
    }

    /// Enrichment runs synchronously inside `dispatch`.
    pub fn inline(repo: Arc<dyn TicketRepository>, coordinator: Coordinator) -> Self {
        Self {
            job: Arc::new(EnrichJob { repo, coordinator }),
            queue: None,
        }
    }

    /// Enrichment is handed to a spawned worker; `dispatch` returns
    /// immediately.
    pub fn deferred(repo: Arc<dyn TicketRepository>, coordinator: Coordinator) -> Self {
        let job = Arc::new(EnrichJob { repo, coordinator });
        let queue = crate::WorkerQueue::spawn(Arc::clone(&job));
        Self {
            job,
            queue: Some(queue),
        }
    }

    /// Trigger enrichment for one ticket.
    ///
    /// Inline mode blocks until the ticket is enriched or skipped; a failed
    /// attempt marks the ticket `Skipped` and reports the reason instead of
    /// erroring, so creating the ticket can never fail on enrichment.
    /// Deferred mode only queues the id.
    pub async fn dispatch(&self, id: TicketId) -> DispatchOutcome {
        match &self.queue {
            Some(queue) => {
                queue.enqueue(id);
                DispatchOutcome::Deferred
            }
            None => match self.job.run(id).await {
                Ok(()) => DispatchOutcome::Enriched,
                Err(reason) => {
                    if let SkipReason::AnalysisFailed(detail) = &reason {
                        warn!(id, detail = %detail, "inline enrichment failed, ticket left un-enriched");
                        if let Err(e) = self.job.repo.set_status(id, TicketStatus::Skipped).await {
                            warn!(id, error = %e, "could not mark ticket skipped");
                        }
                    }
                    DispatchOutcome::Skipped(reason)
                }
            },
        }
    }

    /// Stop the deferred worker after draining everything already queued.
    /// A no-op in inline mode.
    pub async fn shutdown(self) {
        if let Some(queue) = self.queue {
            queue.shutdown().await;
        }
    }
}
