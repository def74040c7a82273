use thiserror::Error;

/// Errors raised while converting account records to and from stored bytes.
#[derive(Debug, Error)]
pub enum TypesError {
    #[error("failed to encode account: {0}")]
    Encode(String),

    #[error("failed to decode account: {0}")]
    Decode(String),
}
