use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ticket store unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Other(String),
}
