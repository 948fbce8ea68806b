//! Account record store.
//!
//! # Responsibility
//! - Own the ordered in-memory record collection.
//! - Mirror the full collection into a key-value backend after every mutation.
//!
//! # Invariants
//! - Mutations only happen through `add`, `update` and `delete`.
//! - Unknown ids on `update`/`delete` are silent no-ops and do not write.
//! - `load` never fails; unreadable data leaves memory untouched.

use crate::config::StoreConfig;
use crate::model::account::{AccountRecord, RecordId, RecordUpdate};
use crate::storage::{KeyValueStore, StorageError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure to write the persisted mirror.
///
/// The in-memory mutation has already been applied when this is returned.
#[derive(Debug)]
pub enum StoreError {
    Storage(StorageError),
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "failed to persist records: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize records: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Ordered account records mirrored to a key-value backend.
pub struct RecordStore<S: KeyValueStore> {
    storage: S,
    config: StoreConfig,
    records: Vec<AccountRecord>,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Creates an empty store persisting under the default key.
    ///
    /// Nothing is read from `storage` until `load` is called.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, StoreConfig::default())
    }

    pub fn with_config(storage: S, config: StoreConfig) -> Self {
        Self {
            storage,
            config,
            records: Vec::new(),
        }
    }

    /// Current records in insertion order.
    pub fn records(&self) -> &[AccountRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_key(&self) -> &str {
        self.config.storage_key()
    }

    /// Replaces the in-memory collection with the persisted one.
    ///
    /// # Contract
    /// - Missing or empty value: collection unchanged.
    /// - Unparseable value or backend read failure: error logged, collection
    ///   unchanged.
    /// - Parseable value is taken as-is without further validation.
    ///
    /// "Parseable" means the whole value decodes as `Vec<AccountRecord>`: each
    /// element needs a string `id` and a known `type` label, and `password`
    /// must be a string or null. A single element failing that rejects the
    /// whole value as a parse failure.
    pub fn load(&mut self) {
        let key = self.config.storage_key();
        let raw = match self.storage.get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => {
                debug!("event=store_load module=store status=skip reason=absent key={key}");
                return;
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error error_code=read_failed key={} error={}",
                    key, err
                );
                return;
            }
        };

        match serde_json::from_str::<Vec<AccountRecord>>(&raw) {
            Ok(records) => {
                info!(
                    "event=store_load module=store status=ok key={} count={}",
                    key,
                    records.len()
                );
                self.records = records;
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error error_code=parse_failed key={} error={}",
                    key, err
                );
            }
        }
    }

    /// Appends a blank `Local` record and returns its id.
    pub fn add(&mut self) -> StoreResult<RecordId> {
        let record = AccountRecord::new();
        let id = record.id.clone();
        self.records.push(record);
        debug!("event=store_add module=store status=ok id={id}");
        self.persist()?;
        Ok(id)
    }

    /// Replaces the record with `id` using `update`.
    ///
    /// Does nothing when no record matches.
    pub fn update(&mut self, id: &str, update: &RecordUpdate) -> StoreResult<()> {
        let Some(index) = self.position(id) else {
            return Ok(());
        };

        let replaced = self.records[index].replaced_with(update);
        self.records[index] = replaced;
        debug!(
            "event=store_update module=store status=ok id={} type={} tag_count={}",
            id,
            update.kind,
            self.records[index].tags.len()
        );
        self.persist()
    }

    /// Removes the record with `id`, keeping the order of the rest.
    ///
    /// Does nothing when no record matches.
    pub fn delete(&mut self, id: &str) -> StoreResult<()> {
        let Some(index) = self.position(id) else {
            return Ok(());
        };

        self.records.remove(index);
        debug!("event=store_delete module=store status=ok id={id}");
        self.persist()
    }

    /// Returns the first record with `id`.
    pub fn get_by_id(&self, id: &str) -> Option<&AccountRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    fn persist(&self) -> StoreResult<()> {
        let key = self.config.storage_key();
        let payload = serde_json::to_string(&self.records)?;
        if let Err(err) = self.storage.set_item(key, &payload) {
            warn!(
                "event=store_persist module=store status=error key={} count={} error={}",
                key,
                self.records.len(),
                err
            );
            return Err(err.into());
        }
        debug!(
            "event=store_persist module=store status=ok key={} count={} bytes={}",
            key,
            self.records.len(),
            payload.len()
        );
        Ok(())
    }
}
