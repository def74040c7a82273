//! Abstract storage traits for the account service.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. Collaborators such as the lookup service and the seeding CLI
//! depend only on the traits.

pub mod account;
pub mod error;
pub mod seed;

pub use account::{AccountStore, ACCOUNT_BUCKET};
pub use error::{StoreError, StoreErrorKind};
pub use seed::{seed_account, SeedReport, DEFAULT_SEED_COUNT, SEED_KEY_BASE};
