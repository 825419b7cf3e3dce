//! The ticket entity as triage sees it.

use chrono::{DateTime, Utc};
use triage_core::{Category, EnrichmentResult, Priority, Sentiment};

pub type TicketId = u64;

/// Enrichment lifecycle of a ticket.
///
/// `New → Enriching → Enriched` is the normal path. `Skipped` is terminal
/// and only reached when an inline enrichment attempt fails outright; a
/// failed deferred task leaves the ticket at `Enriching` (observably
/// un-enriched) until a later dispatch, if any, completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    New,
    Enriching,
    Enriched,
    Skipped,
}

/// A support ticket with its triage fields.
///
/// Lifecycle fields outside the enrichment slice (assignee, comments,
/// resolution timestamps) belong to the surrounding system, not here.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub category: Category,
    pub priority: Priority,
    pub sentiment: Sentiment,
    pub summary: String,
    pub suggested_reply: String,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    /// A freshly created, un-enriched ticket.
    pub fn new(id: TicketId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status: TicketStatus::New,
            category: Category::default(),
            priority: Priority::default(),
            sentiment: Sentiment::default(),
            summary: String::new(),
            suggested_reply: String::new(),
            confidence: 0.0,
            created_at: Utc::now(),
        }
    }

    /// Overwrite all six enrichment fields from one result.
    pub(crate) fn apply(&mut self, result: &EnrichmentResult) {
        self.category = result.category;
        self.priority = result.priority;
        self.sentiment = result.sentiment;
        self.summary = result.summary.clone();
        self.suggested_reply = result.suggested_reply.clone();
        self.confidence = result.confidence;
        self.status = TicketStatus::Enriched;
    }
}
