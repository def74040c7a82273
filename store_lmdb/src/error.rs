use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("lock poisoned: {0}")]
    Poisoned(String),
}

impl From<heed::Error> for LmdbError {
    fn from(e: heed::Error) -> Self {
        LmdbError::Heed(e.to_string())
    }
}

impl From<std::io::Error> for LmdbError {
    fn from(e: std::io::Error) -> Self {
        LmdbError::Io(e.to_string())
    }
}

impl From<LmdbError> for accountsvc_store::StoreError {
    fn from(e: LmdbError) -> Self {
        accountsvc_store::StoreError::Backend(e.to_string())
    }
}
