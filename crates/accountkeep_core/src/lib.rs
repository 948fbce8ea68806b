//! Core domain logic for accountkeep.
//! This crate owns the account record model and its persisted mirror.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;

pub use config::{StoreConfig, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status};
pub use model::account::{
    generate_record_id, parse_tags, AccountRecord, ParseRecordTypeError, RecordId, RecordType,
    RecordUpdate, TagObject, TAG_SEPARATOR,
};
pub use service::record_store::{RecordStore, StoreError, StoreResult};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
