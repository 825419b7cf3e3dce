//! Model-backed triage: prompt construction, one call to an
//! OpenAI-compatible chat endpoint, JSON repair, per-field coercion, and
//! degradation to the keyword classifier when the model's output is
//! unusable.

mod coerce;
pub use coerce::{coerce_fields, extract_object};

mod model;
pub use model::{ModelClassifier, ModelError};

mod coordinator;
pub use coordinator::Coordinator;
