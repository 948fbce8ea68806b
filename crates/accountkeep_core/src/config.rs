//! Record store configuration.
//!
//! # Invariants
//! - The storage key is never empty or padded with whitespace.

/// Key under which the record collection is persisted by default.
pub const DEFAULT_STORAGE_KEY: &str = "accounting_records";

/// Settings for a `RecordStore` instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    storage_key: String,
}

impl StoreConfig {
    /// Builds a config persisting under `storage_key`.
    ///
    /// # Errors
    /// - Returns an error when the key is empty after trimming.
    pub fn with_storage_key(storage_key: &str) -> Result<Self, String> {
        let trimmed = storage_key.trim();
        if trimmed.is_empty() {
            return Err("storage key cannot be empty".to_string());
        }
        Ok(Self {
            storage_key: trimmed.to_string(),
        })
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}
