//! Nullable infrastructure for deterministic testing.
//!
//! Provides an in-memory implementation of the account store traits that
//! never touches the filesystem, so collaborators (lookup handlers, seeding
//! paths, health endpoints) can be tested without an LMDB file.

pub mod store;

pub use store::NullAccountStore;
