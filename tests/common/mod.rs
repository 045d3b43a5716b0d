#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use billcheck::{
    domain::{Bill, Ledger},
    engine::{FixedClock, LedgerStore},
    storage::JsonFileSlots,
    BudgetSession,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

/// Creates a JSON-backed store in a unique temp directory.
pub fn setup_store() -> (Arc<JsonFileSlots>, Arc<LedgerStore>) {
    let temp = TempDir::new().expect("create temp dir");
    let root = temp.path().join("data");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let slots = Arc::new(JsonFileSlots::new(root).expect("create json slots"));
    let store = Arc::new(LedgerStore::with_clock(
        slots.clone(),
        "bills",
        Arc::new(FixedClock::on(reference_date())),
    ));
    (slots, store)
}

/// Opens a write-through session pinned to the reference date.
pub fn open_session(store: Arc<LedgerStore>) -> BudgetSession {
    BudgetSession::open(store, Arc::new(FixedClock::on(reference_date())))
}

pub fn scenario_ledger() -> Ledger {
    Ledger::from(vec![
        Bill::new("Rent", "2024-03-10", 200.0, false),
        Bill::new("Internet", "2024-03-20", 150.0, true),
        Bill::new("Insurance", "2024-03-20", 300.0, false),
    ])
}
