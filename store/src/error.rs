use thiserror::Error;

/// Errors surfaced by every account store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be opened. Callers at process start-up
    /// treat this as fatal.
    #[error("failed to open store at {path}: {reason}")]
    Open { path: String, reason: String },

    #[error("create bucket failed: {0}")]
    BucketInit(String),

    #[error("bucket {0} does not exist, initialize the store first")]
    BucketMissing(String),

    #[error("no account found for {0}")]
    NotFound(String),

    #[error("stored value for {key} is not a valid account: {reason}")]
    Decode { key: String, reason: String },

    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },

    #[error("invalid account key: {0}")]
    InvalidKey(String),

    #[error("store has not been opened")]
    NotOpen,

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Discriminant of [`StoreError`] for callers that only need to branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreErrorKind {
    Open,
    BucketInit,
    BucketMissing,
    NotFound,
    Decode,
    Write,
    InvalidKey,
    NotOpen,
    Backend,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Open { .. } => StoreErrorKind::Open,
            StoreError::BucketInit(_) => StoreErrorKind::BucketInit,
            StoreError::BucketMissing(_) => StoreErrorKind::BucketMissing,
            StoreError::NotFound(_) => StoreErrorKind::NotFound,
            StoreError::Decode { .. } => StoreErrorKind::Decode,
            StoreError::Write { .. } => StoreErrorKind::Write,
            StoreError::InvalidKey(_) => StoreErrorKind::InvalidKey,
            StoreError::NotOpen => StoreErrorKind::NotOpen,
            StoreError::Backend(_) => StoreErrorKind::Backend,
        }
    }

    /// `true` for the routine "account does not exist" outcome.
    pub fn is_not_found(&self) -> bool {
        self.kind() == StoreErrorKind::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinct_from_backend_failures() {
        assert!(StoreError::NotFound("99999".into()).is_not_found());
        assert!(!StoreError::Backend("disk full".into()).is_not_found());
        assert!(!StoreError::Decode {
            key: "1".into(),
            reason: "eof".into()
        }
        .is_not_found());
    }

    #[test]
    fn messages_name_the_key() {
        let err = StoreError::NotFound("10042".into());
        assert_eq!(err.to_string(), "no account found for 10042");
        let err = StoreError::Write {
            key: "10001".into(),
            reason: "map full".into(),
        };
        assert!(err.to_string().contains("10001"));
    }
}
