//! Account storage trait.

use accountsvc_types::{Account, AccountId};

use crate::seed::{seed_account, SeedReport, DEFAULT_SEED_COUNT};
use crate::StoreError;

/// Name of the single bucket holding account records.
pub const ACCOUNT_BUCKET: &str = "AccountBucket";

/// Trait for account storage operations.
///
/// Every read runs in its own read-only transaction and every write in its
/// own read-write transaction. Implementations perform no retries.
pub trait AccountStore {
    /// Drop and recreate the account bucket. Afterwards it exists and is empty.
    fn initialize_bucket(&self) -> Result<(), StoreError>;

    /// Look up a single account by id.
    ///
    /// Fails with [`StoreError::NotFound`] when no record exists and with
    /// [`StoreError::Decode`] when the stored bytes are not an account.
    fn query_account(&self, id: &AccountId) -> Result<Account, StoreError>;

    /// Write one account under its id.
    fn put_account(&self, account: &Account) -> Result<(), StoreError>;

    /// Number of records currently in the bucket.
    fn account_count(&self) -> Result<u64, StoreError>;

    /// Naive health check: whether the store handle has been opened.
    fn check(&self) -> bool;

    /// Write `count` synthetic accounts, one transaction per record.
    ///
    /// Failed writes are logged and collected in the report; the remaining
    /// records are still attempted.
    fn seed_accounts(&self, count: usize) -> SeedReport {
        let mut report = SeedReport {
            attempted: count,
            ..Default::default()
        };
        for i in 0..count {
            let account = seed_account(i);
            match self.put_account(&account) {
                Ok(()) => report.written += 1,
                Err(e) => {
                    tracing::warn!(key = %account.id, error = %e, "failed to seed account");
                    report.failures.push((account.id, e));
                }
            }
        }
        tracing::info!(
            written = report.written,
            failed = report.failures.len(),
            "seeded {} fake accounts",
            report.written
        );
        report
    }

    /// Recreate the bucket and fill it with [`DEFAULT_SEED_COUNT`] accounts.
    fn seed(&self) -> Result<SeedReport, StoreError> {
        self.initialize_bucket()?;
        Ok(self.seed_accounts(DEFAULT_SEED_COUNT))
    }
}
