//! In-memory ticket store.
//!
//! Backs the test suite and the CLI demo. The write lock scope in
//! `apply_enrichment` is what makes the six-field update atomic: no reader
//! ever observes half of one result and half of another.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use triage_core::EnrichmentResult;

use crate::{StoreError, Ticket, TicketId, TicketRepository, TicketStatus};

/// In-memory `TicketRepository` backed by a `HashMap` under an async lock.
#[derive(Default)]
pub struct MemoryStore {
    tickets: RwLock<HashMap<TicketId, Ticket>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ticket and return a copy of it.
    pub async fn create(&self, title: impl Into<String>, description: impl Into<String>) -> Ticket {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let ticket = Ticket::new(id, title, description);
        self.tickets.write().await.insert(id, ticket.clone());
        debug!(id, "created ticket");
        ticket
    }

    /// Remove a ticket, returning whether it existed.
    pub async fn delete(&self, id: TicketId) -> bool {
        self.tickets.write().await.remove(&id).is_some()
    }
}

#[async_trait]
impl TicketRepository for MemoryStore {
    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, StoreError> {
        Ok(self.tickets.read().await.get(&id).cloned())
    }

    async fn apply_enrichment(
        &self,
        id: TicketId,
        result: &EnrichmentResult,
    ) -> Result<bool, StoreError> {
        let mut tickets = self.tickets.write().await;
        match tickets.get_mut(&id) {
            Some(ticket) => {
                ticket.apply(result);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_status(&self, id: TicketId, status: TicketStatus) -> Result<bool, StoreError> {
        let mut tickets = self.tickets.write().await;
        match tickets.get_mut(&id) {
            Some(ticket) => {
                ticket.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
