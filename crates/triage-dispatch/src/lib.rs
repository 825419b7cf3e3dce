//! Dispatch layer: decides whether enrichment runs inline with the caller
//! or on the deferred worker queue, and guarantees the result is applied to
//! the ticket exactly once per invocation (a retried invocation overwrites
//! cleanly, never merges).
//!
//! Ticket creation must never fail because enrichment failed: every failure
//! mode here collapses into an observable [`DispatchOutcome::Skipped`] (or a
//! logged worker failure in deferred mode), not an error the caller has to
//! handle.

mod dispatcher;
pub use dispatcher::{DispatchOutcome, Dispatcher, SkipReason};

mod worker;
pub use worker::WorkerQueue;
