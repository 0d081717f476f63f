//! Persisted previous-selection state.
//!
//! The selection core never performs I/O. A [`SelectionStore`] is the injected
//! read/write capability through which a rotator recovers the key shown on the
//! visitor's last visit and records the new one. On the web this is a cookie jar;
//! [`MemoryStore`] is an in-process stand-in.

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

/// Suffix appended to a rotator key to form the storage name of its last-shown key.
pub const STORAGE_NAME_SUFFIX: &str = "_SCR_ContentKey";

/// How long a persisted key stays valid unless overridden (ten days).
pub const DEFAULT_PERSIST_TTL: Duration = Duration::from_secs(10 * 24 * 60 * 60);

/// Storage name for a rotator's last-shown key: `<rotatorKey>_SCR_ContentKey`.
pub fn storage_name(rotator_key: &str) -> String {
    format!("{rotator_key}{STORAGE_NAME_SUFFIX}")
}

/// Failure to persist a key.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store is read-only")]
    ReadOnly,

    #[error("Failed to write '{name}': {message}")]
    Write { name: String, message: String },
}

/// Key-value capability for per-visitor rotation state.
pub trait SelectionStore {
    /// The value stored under `name`, if any and not expired.
    fn load(&self, name: &str) -> Option<String>;

    /// Store `value` under `name` for `ttl`.
    fn save(&mut self, name: &str, value: &str, ttl: Duration) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<SystemTime>,
}

/// In-memory [`SelectionStore`] with per-entry expiry.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate an entry with no expiry (e.g. an incoming cookie).
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(
            name.into(),
            Entry {
                value: value.into(),
                expires_at: None,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop expired entries.
    pub fn purge_expired(&mut self) {
        let now = SystemTime::now();
        self.entries.retain(|_, e| !is_expired(e, now));
    }
}

fn is_expired(e: &Entry, now: SystemTime) -> bool {
    e.expires_at.is_some_and(|t| now >= t)
}

impl SelectionStore for MemoryStore {
    fn load(&self, name: &str) -> Option<String> {
        let e = self.entries.get(name)?;
        if is_expired(e, SystemTime::now()) || e.value.trim().is_empty() {
            return None;
        }
        Some(e.value.clone())
    }

    fn save(&mut self, name: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        let expires_at = SystemTime::now().checked_add(ttl);
        self.entries.insert(
            name.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }
}
