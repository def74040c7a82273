//! LMDB storage backend for the account service.
//!
//! Implements [`accountsvc_store::AccountStore`] using the `heed` LMDB
//! bindings. The whole store lives in one LMDB file holding a single named
//! database, `AccountBucket`.

pub mod account;
pub mod config;
pub mod environment;
pub mod error;

pub use account::LmdbAccountStore;
pub use config::StoreConfig;
pub use environment::LmdbEnvironment;
pub use error::LmdbError;
