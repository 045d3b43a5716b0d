//! The single owner of the live ledger and the user's balance/purchase inputs.
//!
//! Every mutation recomputes the derived [`Snapshot`] synchronously before the
//! ledger is handed to persistence, so the UI never waits on a write.

use std::{path::PathBuf, sync::Arc, time::Duration};

use billcheck_config::{Config, ConfigManager};
use billcheck_core::{
    input::{parse_amount, Parsed},
    Clock, DebouncedWriter, LedgerService, LedgerStore, PersistedEvent, Snapshot, SummaryService,
    SystemClock,
};
use billcheck_domain::{Bill, BillId, BillPatch, Ledger};
use billcheck_storage_json::JsonFileSlots;
use tokio::runtime::Handle;

use crate::errors::BillcheckError;

/// Facade that coordinates ledger state, derivation, and persistence.
pub struct BudgetSession {
    ledger: Ledger,
    balance: f64,
    purchase: f64,
    snapshot: Snapshot,
    store: Arc<LedgerStore>,
    writer: Option<DebouncedWriter>,
    clock: Arc<dyn Clock>,
}

impl BudgetSession {
    /// Loads the ledger from `store`. Without autosave every mutation is written
    /// through immediately.
    pub fn open(store: Arc<LedgerStore>, clock: Arc<dyn Clock>) -> Self {
        let ledger = store.load();
        let snapshot = SummaryService::snapshot(&ledger, clock.today(), 0.0, 0.0);
        tracing::info!(bills = ledger.len(), key = store.key(), "budget session opened");
        Self {
            ledger,
            balance: 0.0,
            purchase: 0.0,
            snapshot,
            store,
            writer: None,
            clock,
        }
    }

    /// Opens the session described by `config`, persisting to JSON files.
    pub fn open_with_config(config: &Config, runtime: Handle) -> Result<Self, BillcheckError> {
        Self::open_in(config, config.resolve_data_dir(), runtime)
    }

    /// Like [`BudgetSession::open_with_config`], with slot files kept in `data_dir`.
    pub fn open_in(
        config: &Config,
        data_dir: PathBuf,
        runtime: Handle,
    ) -> Result<Self, BillcheckError> {
        let slots = JsonFileSlots::new(data_dir)?;
        let store = LedgerStore::new(Arc::new(slots), config.storage_key.clone());
        Ok(Self::open(Arc::new(store), Arc::new(SystemClock))
            .with_autosave(config.autosave_delay(), runtime))
    }

    /// Opens the session from the user's saved configuration.
    pub fn open_default(runtime: Handle) -> Result<Self, BillcheckError> {
        let config = ConfigManager::default_location()?.load()?;
        Self::open_with_config(&config, runtime)
    }

    /// Coalesces writes: each mutation replaces the pending save.
    pub fn with_autosave(mut self, delay: Duration, runtime: Handle) -> Self {
        self.writer = Some(DebouncedWriter::new(self.store.clone(), delay, runtime));
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn purchase(&self) -> f64 {
        self.purchase
    }

    pub fn store(&self) -> &Arc<LedgerStore> {
        &self.store
    }

    pub fn has_pending_save(&self) -> bool {
        self.writer
            .as_ref()
            .is_some_and(DebouncedWriter::has_pending)
    }

    pub fn set_balance(&mut self, balance: f64) {
        self.balance = balance;
        self.recompute();
    }

    /// Sets the balance from raw form text.
    pub fn set_balance_text(&mut self, raw: &str) -> Parsed<f64> {
        let parsed = parse_amount(raw);
        self.set_balance(parsed.value);
        parsed
    }

    pub fn set_purchase(&mut self, purchase: f64) {
        self.purchase = purchase;
        self.recompute();
    }

    /// Sets the prospective purchase from raw form text.
    pub fn set_purchase_text(&mut self, raw: &str) -> Parsed<f64> {
        let parsed = parse_amount(raw);
        self.set_purchase(parsed.value);
        parsed
    }

    pub fn add_bill(&mut self) -> BillId {
        let id = LedgerService::add_bill(&mut self.ledger);
        self.commit();
        id
    }

    pub fn update_bill(&mut self, id: BillId, patch: &BillPatch) -> Result<(), BillcheckError> {
        LedgerService::update_bill(&mut self.ledger, id, patch)?;
        self.commit();
        Ok(())
    }

    /// Sets a bill amount from raw form text. Returns whether it was coerced.
    pub fn set_bill_amount_text(&mut self, id: BillId, raw: &str) -> Result<bool, BillcheckError> {
        let coerced = LedgerService::set_amount_text(&mut self.ledger, id, raw)?;
        self.commit();
        Ok(coerced)
    }

    /// Deletes a bill. Confirmation is the caller's job.
    pub fn delete_bill(&mut self, id: BillId) -> Result<Bill, BillcheckError> {
        let removed = LedgerService::delete_bill(&mut self.ledger, id)?;
        self.commit();
        Ok(removed)
    }

    pub fn toggle_paid(&mut self, id: BillId) -> Result<bool, BillcheckError> {
        let paid = LedgerService::toggle_paid(&mut self.ledger, id)?;
        self.commit();
        Ok(paid)
    }

    pub fn clear_paid_flags(&mut self) -> usize {
        let cleared = LedgerService::clear_paid_flags(&mut self.ledger);
        self.commit();
        cleared
    }

    /// Writes the current ledger now, dropping any pending autosave.
    pub fn flush(&self) -> Result<PersistedEvent, BillcheckError> {
        let event = match &self.writer {
            Some(writer) => writer.flush(&self.ledger)?,
            None => self.store.save(&self.ledger)?,
        };
        Ok(event)
    }

    /// Re-reads the ledger from storage, discarding unsaved edits.
    pub fn reload(&mut self) {
        if let Some(writer) = &self.writer {
            writer.cancel();
        }
        self.ledger = self.store.load();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.snapshot =
            SummaryService::snapshot(&self.ledger, self.clock.today(), self.balance, self.purchase);
        tracing::debug!(
            total_unpaid = self.snapshot.totals.total_unpaid,
            coverage = ?self.snapshot.affordability.coverage,
            purchase = ?self.snapshot.affordability.purchase,
            "derived state recomputed"
        );
    }

    fn commit(&mut self) {
        self.recompute();
        match &self.writer {
            Some(writer) => writer.schedule(self.ledger.clone()),
            None => {
                if let Err(err) = self.store.save(&self.ledger) {
                    tracing::error!(error = %err, "failed to persist ledger");
                }
            }
        }
    }
}

impl std::fmt::Debug for BudgetSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetSession")
            .field("bills", &self.ledger.len())
            .field("balance", &self.balance)
            .field("purchase", &self.purchase)
            .field("snapshot", &self.snapshot)
            .finish()
    }
}
