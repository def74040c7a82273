//! Synthetic account generation.

use accountsvc_types::{Account, AccountId};

use crate::StoreError;

/// Number of accounts written by [`crate::AccountStore::seed`].
pub const DEFAULT_SEED_COUNT: usize = 100;

/// Key of the first seeded account.
pub const SEED_KEY_BASE: u64 = 10_000;

/// Build the `index`-th seeded account: key `10000 + index`, name `Person_<index>`.
pub fn seed_account(index: usize) -> Account {
    let key = SEED_KEY_BASE + index as u64;
    Account::new(AccountId::new(key.to_string()), format!("Person_{}", index))
}

/// Outcome of a best-effort bulk seed.
///
/// Each record is written in its own transaction, so a failed record does
/// not roll back the ones before it.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub attempted: usize,
    pub written: usize,
    pub failures: Vec<(AccountId, StoreError)>,
}

impl SeedReport {
    /// Returns `true` if every attempted record was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.written == self.attempted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_last_of_default_seed() {
        let first = seed_account(0);
        assert_eq!(first.id.as_str(), "10000");
        assert_eq!(first.name, "Person_0");

        let last = seed_account(DEFAULT_SEED_COUNT - 1);
        assert_eq!(last.id.as_str(), "10099");
        assert_eq!(last.name, "Person_99");
    }

    #[test]
    fn report_with_failures_is_incomplete() {
        let mut report = SeedReport {
            attempted: 2,
            written: 1,
            failures: Vec::new(),
        };
        report
            .failures
            .push((AccountId::new("10001"), StoreError::NotOpen));
        assert!(!report.is_complete());

        let ok = SeedReport {
            attempted: 3,
            written: 3,
            failures: Vec::new(),
        };
        assert!(ok.is_complete());
    }
}
