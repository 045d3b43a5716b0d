//! Ledger persistence over a host-supplied key-value slot.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, RwLock},
};

use billcheck_domain::Ledger;
use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::{
    normalize::normalize_value,
    time::{Clock, SystemClock},
    CoreError,
};

/// Default slot key the ledger is stored under.
pub const DEFAULT_SLOT_KEY: &str = "bills";

/// Abstraction over key-value backends capable of holding a serialized ledger.
pub trait SlotStorage: Send + Sync {
    /// Returns the raw slot content, or `None` when the key has never been written.
    fn read_slot(&self, key: &str) -> Result<Option<String>, CoreError>;
    /// Replaces the slot content.
    fn write_slot(&self, key: &str, data: &str) -> Result<(), CoreError>;
}

/// Process-local slot storage.
#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a slot with raw content.
    pub fn with_slot(key: impl Into<String>, data: impl Into<String>) -> Self {
        let storage = Self::new();
        storage
            .slots
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.into(), data.into());
        storage
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read_slot(&self, key: &str) -> Result<Option<String>, CoreError> {
        let slots = self
            .slots
            .read()
            .map_err(|_| CoreError::Storage("memory slots poisoned".into()))?;
        Ok(slots.get(key).cloned())
    }

    fn write_slot(&self, key: &str, data: &str) -> Result<(), CoreError> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| CoreError::Storage("memory slots poisoned".into()))?;
        slots.insert(key.to_string(), data.to_string());
        Ok(())
    }
}

/// Describes the outcome of a load, including every coercion applied.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub ledger: Ledger,
    pub warnings: Vec<String>,
    /// The slot held content that could not be used as a bill list.
    pub malformed: bool,
    /// The slot had never been written.
    pub missing: bool,
}

/// Emitted after every successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistedEvent {
    pub at: DateTime<Utc>,
    pub bills: usize,
}

/// Reads and writes the ledger in a single named slot.
pub struct LedgerStore {
    storage: Arc<dyn SlotStorage>,
    key: String,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
    persisted: watch::Sender<Option<DateTime<Utc>>>,
}

impl LedgerStore {
    pub fn new(storage: Arc<dyn SlotStorage>, key: impl Into<String>) -> Self {
        Self::with_clock(storage, key, Arc::new(SystemClock))
    }

    pub fn with_clock(
        storage: Arc<dyn SlotStorage>,
        key: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (persisted, _) = watch::channel(None);
        Self {
            storage,
            key: key.into(),
            clock,
            write_lock: Mutex::new(()),
            persisted,
        }
    }

    /// In-memory store under the default key.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySlotStorage::new()), DEFAULT_SLOT_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &dyn SlotStorage {
        self.storage.as_ref()
    }

    /// Loads the ledger, falling back to an empty one on any failure.
    pub fn load(&self) -> Ledger {
        self.load_report().ledger
    }

    /// Loads the ledger and reports what had to be coerced along the way.
    pub fn load_report(&self) -> LoadReport {
        let raw = match self.storage.read_slot(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "ledger slot is empty");
                return LoadReport {
                    missing: true,
                    ..LoadReport::default()
                };
            }
            Err(err) => return self.malformed(format!("slot could not be read: {err}")),
        };

        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => return self.malformed(format!("slot is not valid JSON: {err}")),
        };

        let malformed = !value.is_array();
        let normalized = normalize_value(value);
        for warning in &normalized.warnings {
            tracing::warn!(key = %self.key, "{warning}");
        }
        tracing::debug!(key = %self.key, bills = normalized.ledger.len(), "ledger loaded");
        LoadReport {
            ledger: normalized.ledger,
            warnings: normalized.warnings,
            malformed,
            missing: false,
        }
    }

    /// Serializes the full ledger over the slot. Last write wins.
    pub fn save(&self, ledger: &Ledger) -> Result<PersistedEvent, CoreError> {
        let json = serde_json::to_string_pretty(ledger)?;
        let _guard = self.lock_writes();
        self.storage.write_slot(&self.key, &json)?;
        let event = PersistedEvent {
            at: self.clock.now(),
            bills: ledger.len(),
        };
        self.persisted.send_replace(Some(event.at));
        tracing::debug!(key = %self.key, bills = event.bills, "ledger persisted");
        Ok(event)
    }

    /// Timestamp of the most recent successful save through this store.
    pub fn last_persisted_at(&self) -> Option<DateTime<Utc>> {
        *self.persisted.borrow()
    }

    /// Subscribes to "last persisted at" updates.
    pub fn subscribe(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.persisted.subscribe()
    }

    fn malformed(&self, reason: String) -> LoadReport {
        tracing::warn!(key = %self.key, "{reason}; starting with an empty ledger");
        LoadReport {
            warnings: vec![reason],
            malformed: true,
            ..LoadReport::default()
        }
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStore")
            .field("key", &self.key)
            .field("last_persisted_at", &self.last_persisted_at())
            .finish()
    }
}
