//! Deferred enrichment worker.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use triage_store::TicketId;

use crate::SkipReason;
use crate::dispatcher::EnrichJob;

/// Unbounded queue of ticket ids plus the single worker task draining it.
///
/// Jobs run to completion in queue order; a failed job is logged and not
/// retried. Dropping the sender (via [`WorkerQueue::shutdown`]) lets the
/// worker finish whatever is queued and exit.
pub struct WorkerQueue {
    tx: mpsc::UnboundedSender<TicketId>,
    handle: JoinHandle<()>,
}

impl WorkerQueue {
    pub(crate) fn spawn(job: Arc<EnrichJob>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            while let Some(id) = rx.recv().await {
                match job.run(id).await {
                    Ok(()) => info!(id, "ticket enriched"),
                    Err(SkipReason::TicketMissing) => debug!(id, "ticket gone, nothing to enrich"),
                    Err(SkipReason::AnalysisFailed(detail)) => {
                        warn!(id, detail = %detail, "deferred enrichment failed, not retrying");
                    }
                }
            }
            debug!("enrichment worker drained and stopped");
        });
        Self { tx, handle }
    }

    /// Queue one ticket for enrichment.
    pub fn enqueue(&self, id: TicketId) {
        if self.tx.send(id).is_err() {
            warn!(id, "enrichment worker is gone, ticket left un-enriched");
        }
    }

    /// Close the queue and wait for the worker to drain it.
    pub async fn shutdown(self) {
        drop(self.tx);
        let _ = self.handle.await;
    }
}
