//! Stable, public-facing helpers that wrap the internal service layer.
//!
//! This module exposes the flat engine surface a UI boundary binds to, without
//! depending on the individual services.

use billcheck_domain::{Affordability, BillId, BillPatch, IncomeSplit, Ledger, Totals};
use chrono::NaiveDate;

use crate::{
    ledger_service::LedgerService,
    split_service::SplitService,
    storage::{LedgerStore, PersistedEvent},
    summary_service::SummaryService,
    CoreError,
};

/// Loads the persisted ledger. Never fails; malformed data yields an empty ledger.
pub fn api_load_ledger(store: &LedgerStore) -> Ledger {
    store.load()
}

/// Overwrites the persisted ledger and notifies subscribers.
pub fn api_save_ledger(store: &LedgerStore, ledger: &Ledger) -> Result<PersistedEvent, CoreError> {
    store.save(ledger)
}

/// Appends an empty bill.
pub fn api_add_bill(ledger: &mut Ledger) -> BillId {
    LedgerService::add_bill(ledger)
}

/// Applies a partial update to one bill.
pub fn api_update_bill(ledger: &mut Ledger, id: BillId, patch: &BillPatch) -> Result<(), CoreError> {
    LedgerService::update_bill(ledger, id, patch)
}

/// Removes one bill by identity.
pub fn api_delete_bill(ledger: &mut Ledger, id: BillId) -> Result<(), CoreError> {
    LedgerService::delete_bill(ledger, id).map(|_| ())
}

/// Resets every paid flag.
pub fn api_clear_paid_flags(ledger: &mut Ledger) -> usize {
    LedgerService::clear_paid_flags(ledger)
}

pub fn api_compute_totals(ledger: &Ledger, reference_date: NaiveDate) -> Totals {
    SummaryService::compute_totals(ledger, reference_date)
}

pub fn api_compute_affordability(totals: &Totals, balance: f64, purchase: f64) -> Affordability {
    SummaryService::compute_affordability(totals, balance, purchase)
}

pub fn api_compute_split(amount: f64) -> IncomeSplit {
    SplitService::compute_split(amount)
}
