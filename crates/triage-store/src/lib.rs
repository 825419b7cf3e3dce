//! Ticket storage layer: the ticket entity, the narrow repository trait the
//! triage core depends on, and an in-memory implementation.
//!
//! The relational schema itself is an external concern; this crate only
//! models the slice of a ticket that triage reads (`id`, `title`,
//! `description`) and writes (the six enrichment fields plus the
//! enrichment lifecycle status).

mod error;
pub use error::StoreError;

mod ticket;
pub use ticket::{Ticket, TicketId, TicketStatus};

mod memory;
pub use memory::MemoryStore;

use async_trait::async_trait;
use triage_core::EnrichmentResult;

/// Narrow persistence interface for the triage pipeline.
///
/// `apply_enrichment` is the single synchronisation point in the system: it
/// replaces all six enrichment fields of one ticket atomically, so a retried
/// task simply overwrites an earlier result wholesale (last-writer-wins,
/// never a field-by-field mix).
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Look up a ticket by id.
    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, StoreError>;

    /// Atomically write a complete enrichment result to a ticket and mark it
    /// [`TicketStatus::Enriched`]. Returns `false` (a no-op, not an error)
    /// when the ticket no longer exists.
    async fn apply_enrichment(
        &self,
        id: TicketId,
        result: &EnrichmentResult,
    ) -> Result<bool, StoreError>;

    /// Move a ticket through the enrichment lifecycle. Returns `false` when
    /// the ticket no longer exists.
    async fn set_status(&self, id: TicketId, status: TicketStatus) -> Result<bool, StoreError>;
}
