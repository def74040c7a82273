//! Nullable store: thread-safe in-memory account storage for testing.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use accountsvc_store::{AccountStore, StoreError, ACCOUNT_BUCKET};
use accountsvc_types::{Account, AccountId};

/// An in-memory account store with the same error semantics as the LMDB
/// backend: queries fail with `NotOpen` before [`NullAccountStore::open`],
/// with `BucketMissing` before the bucket is initialized, and stored bytes
/// are decoded on every read.
pub struct NullAccountStore {
    opened: AtomicBool,
    bucket: Mutex<Option<BTreeMap<Vec<u8>, Vec<u8>>>>,
    failing_keys: Mutex<HashSet<String>>,
}

impl NullAccountStore {
    /// An unopened store.
    pub fn new() -> Self {
        Self {
            opened: AtomicBool::new(false),
            bucket: Mutex::new(None),
            failing_keys: Mutex::new(HashSet::new()),
        }
    }

    /// An opened store with an empty bucket.
    pub fn ready() -> Self {
        let store = Self::new();
        store.open();
        *store.bucket.lock().unwrap() = Some(BTreeMap::new());
        store
    }

    pub fn open(&self) {
        self.opened.store(true, Ordering::SeqCst);
    }

    /// Store raw bytes under `key`, bypassing the account encoding.
    pub fn put_raw(&self, key: &str, value: &[u8]) {
        self.bucket
            .lock()
            .unwrap()
            .get_or_insert_with(BTreeMap::new)
            .insert(key.as_bytes().to_vec(), value.to_vec());
    }

    /// Make every later write of `key` fail with a write error.
    pub fn fail_writes_for(&self, key: &str) {
        self.failing_keys.lock().unwrap().insert(key.to_string());
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.opened.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::NotOpen)
        }
    }
}

impl Default for NullAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

fn missing() -> StoreError {
    StoreError::BucketMissing(ACCOUNT_BUCKET.to_string())
}

impl AccountStore for NullAccountStore {
    fn initialize_bucket(&self) -> Result<(), StoreError> {
        self.ensure_open()?;
        *self.bucket.lock().unwrap() = Some(BTreeMap::new());
        Ok(())
    }

    fn query_account(&self, id: &AccountId) -> Result<Account, StoreError> {
        if !id.is_valid() {
            return Err(StoreError::InvalidKey(id.to_string()));
        }
        self.ensure_open()?;
        let bucket = self.bucket.lock().unwrap();
        let bytes = bucket
            .as_ref()
            .ok_or_else(missing)?
            .get(id.as_bytes())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Account::from_json_bytes(bytes).map_err(|e| StoreError::Decode {
            key: id.to_string(),
            reason: e.to_string(),
        })
    }

    fn put_account(&self, account: &Account) -> Result<(), StoreError> {
        if !account.id.is_valid() {
            return Err(StoreError::InvalidKey(account.id.to_string()));
        }
        self.ensure_open()?;
        if self.failing_keys.lock().unwrap().contains(account.id.as_str()) {
            return Err(StoreError::Write {
                key: account.id.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        let value = account.to_json_bytes().map_err(|e| StoreError::Write {
            key: account.id.to_string(),
            reason: e.to_string(),
        })?;
        self.bucket
            .lock()
            .unwrap()
            .as_mut()
            .ok_or_else(missing)?
            .insert(account.id.as_bytes().to_vec(), value);
        Ok(())
    }

    fn account_count(&self) -> Result<u64, StoreError> {
        self.ensure_open()?;
        let bucket = self.bucket.lock().unwrap();
        Ok(bucket.as_ref().ok_or_else(missing)?.len() as u64)
    }

    fn check(&self) -> bool {
        self.opened.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accountsvc_store::StoreErrorKind;

    #[test]
    fn seeding_continues_past_failed_record() {
        let store = NullAccountStore::ready();
        store.fail_writes_for("10002");

        let report = store.seed_accounts(5);
        assert_eq!(report.written, 4);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0.as_str(), "10002");
        assert_eq!(report.failures[0].1.kind(), StoreErrorKind::Write);
        assert!(!report.is_complete());

        assert_eq!(
            store.query_account(&AccountId::new("10004")).unwrap().name,
            "Person_4"
        );
        assert!(store
            .query_account(&AccountId::new("10002"))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn raw_garbage_is_decode_error() {
        let store = NullAccountStore::ready();
        store.put_raw("10000", b"\xff\xfe");
        assert_eq!(
            store
                .query_account(&AccountId::new("10000"))
                .unwrap_err()
                .kind(),
            StoreErrorKind::Decode
        );
    }

    #[test]
    fn health_before_and_after_open() {
        let store = NullAccountStore::new();
        assert!(!store.check());
        assert_eq!(
            store.initialize_bucket().unwrap_err().kind(),
            StoreErrorKind::NotOpen
        );
        store.open();
        assert!(store.check());
        assert_eq!(
            store.account_count().unwrap_err().kind(),
            StoreErrorKind::BucketMissing
        );
    }

    #[test]
    fn initialize_clears_previous_contents() {
        let store = NullAccountStore::ready();
        store.seed().unwrap();
        assert_eq!(store.account_count().unwrap(), 100);
        store.initialize_bucket().unwrap();
        assert_eq!(store.account_count().unwrap(), 0);
    }
}
