//! Fundamental types for the account service.
//!
//! Defines the account record shared by every store backend together with
//! its JSON value encoding.

pub mod account;
pub mod error;

pub use account::{Account, AccountId};
pub use error::TypesError;
