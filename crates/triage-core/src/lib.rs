pub mod classifier;
pub mod config;
pub mod enrichment;

pub use config::TriageConfig;
pub use enrichment::{Category, EnrichmentResult, Priority, Sentiment};
