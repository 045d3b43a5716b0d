//! Debounced persistence for keystroke-rate edits.
//!
//! Each call to [`DebouncedWriter::schedule`] replaces the pending write: the
//! previous task is aborted and a new one sleeps for the configured delay before
//! saving its own ledger snapshot. A generation gate makes sure a superseded task
//! that already woke up can never overwrite a newer save.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use billcheck_domain::Ledger;
use tokio::{runtime::Handle, task::JoinHandle};

use crate::{
    storage::{LedgerStore, PersistedEvent},
    CoreError,
};

pub struct DebouncedWriter {
    store: Arc<LedgerStore>,
    delay: Duration,
    runtime: Handle,
    pending: Mutex<Option<JoinHandle<()>>>,
    generation: Arc<Mutex<u64>>,
}

impl DebouncedWriter {
    pub fn new(store: Arc<LedgerStore>, delay: Duration, runtime: Handle) -> Self {
        Self {
            store,
            delay,
            runtime,
            pending: Mutex::new(None),
            generation: Arc::new(Mutex::new(0)),
        }
    }

    pub fn store(&self) -> &Arc<LedgerStore> {
        &self.store
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Queues `ledger` to be saved after the delay, superseding any queued save.
    pub fn schedule(&self, ledger: Ledger) {
        let mut pending = lock(&self.pending);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        let ticket = bump(&self.generation);

        let store = Arc::clone(&self.store);
        let generation = Arc::clone(&self.generation);
        let delay = self.delay;
        *pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let current = lock(&generation);
            if *current != ticket {
                tracing::debug!(ticket, "autosave superseded");
                return;
            }
            if let Err(err) = store.save(&ledger) {
                tracing::error!(error = %err, "autosave failed");
            }
        }));
    }

    /// Drops the queued save, if any. Returns whether one was waiting.
    pub fn cancel(&self) -> bool {
        let mut pending = lock(&self.pending);
        bump(&self.generation);
        match pending.take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    /// Cancels any queued save and writes `ledger` immediately.
    pub fn flush(&self, ledger: &Ledger) -> Result<PersistedEvent, CoreError> {
        let mut pending = lock(&self.pending);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        let mut current = lock(&self.generation);
        *current += 1;
        self.store.save(ledger)
    }

    /// Whether a scheduled save has not run yet.
    pub fn has_pending(&self) -> bool {
        lock(&self.pending)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl std::fmt::Debug for DebouncedWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebouncedWriter")
            .field("store", &self.store)
            .field("delay", &self.delay)
            .finish()
    }
}

fn bump(generation: &Mutex<u64>) -> u64 {
    let mut current = lock(generation);
    *current += 1;
    *current
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
