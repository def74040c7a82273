//! LMDB implementation of AccountStore.

use std::sync::RwLock;

use heed::types::Bytes;
use heed::Database;

use accountsvc_store::{AccountStore, StoreError, ACCOUNT_BUCKET};
use accountsvc_types::{Account, AccountId};

use crate::{LmdbEnvironment, LmdbError, StoreConfig};

/// The only named database the store uses.
const MAX_DBS: u32 = 1;

type Bucket = Database<Bytes, Bytes>;

/// Account store backed by a single LMDB file.
///
/// Built unopened by [`LmdbAccountStore::new`]; [`LmdbAccountStore::open`]
/// attaches the environment. Share it between threads with an `Arc`.
pub struct LmdbAccountStore {
    config: StoreConfig,
    env: Option<LmdbEnvironment>,
    // Only set from committed write transactions, so the handle stays valid
    // for every later transaction on this environment.
    bucket: RwLock<Option<Bucket>>,
}

impl LmdbAccountStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            env: None,
            bucket: RwLock::new(None),
        }
    }

    /// Build and open a store at `path` with default settings.
    pub fn open_path(path: impl Into<std::path::PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self::new(StoreConfig::with_path(path));
        store.open()?;
        Ok(store)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Open or create the backing file.
    ///
    /// Returns [`StoreError::Open`] on failure; there is no fallback storage.
    /// An existing `AccountBucket` in the file is picked up so queries work
    /// without re-initializing.
    pub fn open(&mut self) -> Result<(), StoreError> {
        if self.env.is_some() {
            tracing::debug!(path = %self.config.path.display(), "store already open");
            return Ok(());
        }

        let open_err = |e: LmdbError| StoreError::Open {
            path: self.config.path.display().to_string(),
            reason: e.to_string(),
        };
        let env = LmdbEnvironment::open(
            &self.config.path,
            MAX_DBS,
            self.config.max_readers,
            self.config.map_size,
        )
        .map_err(open_err)?;

        let existing = {
            let wtxn = env.env().write_txn().map_err(|e| open_err(e.into()))?;
            let db: Option<Bucket> = env
                .env()
                .open_database(&wtxn, Some(ACCOUNT_BUCKET))
                .map_err(|e| open_err(e.into()))?;
            wtxn.commit().map_err(|e| open_err(e.into()))?;
            db
        };

        tracing::info!(
            path = %env.path().display(),
            bucket_present = existing.is_some(),
            "opened account store"
        );
        *self.bucket.write().map_err(poisoned)? = existing;
        self.env = Some(env);
        Ok(())
    }

    /// Release the store handle. Later operations fail with
    /// [`StoreError::NotOpen`] until the store is opened again.
    pub fn close(&mut self) {
        if let Some(env) = self.env.take() {
            if let Ok(mut bucket) = self.bucket.write() {
                *bucket = None;
            }
            env.close();
            tracing::info!(path = %self.config.path.display(), "closed account store");
        }
    }

    fn environment(&self) -> Result<&LmdbEnvironment, StoreError> {
        self.env.as_ref().ok_or(StoreError::NotOpen)
    }

    fn bucket(&self) -> Result<Bucket, StoreError> {
        let bucket = *self.bucket.read().map_err(poisoned)?;
        bucket.ok_or_else(|| StoreError::BucketMissing(ACCOUNT_BUCKET.to_string()))
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> StoreError {
    LmdbError::Poisoned(e.to_string()).into()
}

fn write_error(key: &AccountId, reason: impl ToString) -> StoreError {
    StoreError::Write {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

impl AccountStore for LmdbAccountStore {
    fn initialize_bucket(&self) -> Result<(), StoreError> {
        let env = self.environment()?;
        let init_err = |e: heed::Error| StoreError::BucketInit(e.to_string());

        let mut wtxn = env.env().write_txn().map_err(init_err)?;
        let db: Bucket = env
            .env()
            .create_database(&mut wtxn, Some(ACCOUNT_BUCKET))
            .map_err(init_err)?;
        db.clear(&mut wtxn).map_err(init_err)?;
        wtxn.commit().map_err(init_err)?;

        *self.bucket.write().map_err(poisoned)? = Some(db);
        tracing::info!(bucket = ACCOUNT_BUCKET, "initialized bucket");
        Ok(())
    }

    fn query_account(&self, id: &AccountId) -> Result<Account, StoreError> {
        if !id.is_valid() {
            return Err(StoreError::InvalidKey(id.to_string()));
        }
        let env = self.environment()?;
        let bucket = self.bucket()?;

        let rtxn = env.env().read_txn().map_err(LmdbError::from)?;
        let bytes = bucket
            .get(&rtxn, id.as_bytes())
            .map_err(LmdbError::from)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let account = Account::from_json_bytes(bytes).map_err(|e| StoreError::Decode {
            key: id.to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(key = %id, "queried account");
        Ok(account)
    }

    fn put_account(&self, account: &Account) -> Result<(), StoreError> {
        let key = &account.id;
        if !key.is_valid() {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        let env = self.environment()?;
        let bucket = self.bucket()?;
        let value = account.to_json_bytes().map_err(|e| write_error(key, e))?;

        let mut wtxn = env.env().write_txn().map_err(|e| write_error(key, e))?;
        bucket
            .put(&mut wtxn, key.as_bytes(), &value)
            .map_err(|e| write_error(key, e))?;
        wtxn.commit().map_err(|e| write_error(key, e))?;
        tracing::debug!(key = %key, "wrote account");
        Ok(())
    }

    fn account_count(&self) -> Result<u64, StoreError> {
        let env = self.environment()?;
        let bucket = self.bucket()?;
        let rtxn = env.env().read_txn().map_err(LmdbError::from)?;
        let count = bucket.len(&rtxn).map_err(LmdbError::from)?;
        Ok(count)
    }

    fn check(&self) -> bool {
        self.env.is_some()
    }
}
