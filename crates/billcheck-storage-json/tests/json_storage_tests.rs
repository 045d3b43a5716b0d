use std::{fs, sync::Arc};

use billcheck_config::atomic::tmp_path;
use billcheck_core::{storage::SlotStorage, LedgerStore};
use billcheck_domain::{Bill, Ledger};
use billcheck_storage_json::JsonFileSlots;
use tempfile::tempdir;

fn sample_ledger() -> Ledger {
    Ledger::from(vec![
        Bill::new("Rent", "2024-03-01", 1200.0, false),
        Bill::new("Streaming", "2024-03-22", 15.99, true),
    ])
}

#[test]
fn json_slots_save_and_load_ledger() {
    let dir = tempdir().expect("tempdir");
    let slots = Arc::new(JsonFileSlots::new(dir.path().join("data")).expect("create slots"));
    let store = LedgerStore::new(slots.clone(), "bills");

    store.save(&sample_ledger()).expect("save ledger");
    let loaded = store.load();

    assert!(loaded.same_fields(&sample_ledger()));
    let path = slots.slot_path("bills");
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert!(path.exists());
    assert!(!tmp_path(&path).exists());
    assert_eq!(slots.list_slots().expect("list"), vec!["bills".to_string()]);
}

#[test]
fn json_slots_write_the_canonical_schema() {
    let dir = tempdir().expect("tempdir");
    let slots = Arc::new(JsonFileSlots::new(dir.path().to_path_buf()).expect("create slots"));
    let store = LedgerStore::new(slots.clone(), "bills");
    store.save(&sample_ledger()).expect("save ledger");

    let raw = fs::read_to_string(slots.slot_path("bills")).expect("read slot file");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("slot holds json");
    let records = value.as_array().expect("slot holds an array");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["amount"], serde_json::json!(15.99));
    assert!(raw.contains("\"name\": \"Rent\""));
    assert!(raw.contains("\"due\": \"2024-03-01\""));
    assert!(raw.contains("\"amount\": 1200.0"));
    assert!(raw.contains("\"paid\": false"));
    assert!(!raw.contains("\"id\""));
}

#[test]
fn missing_slot_file_reads_as_none() {
    let dir = tempdir().expect("tempdir");
    let slots = JsonFileSlots::new(dir.path().to_path_buf()).expect("create slots");
    assert_eq!(slots.read_slot("bills").expect("read"), None);
    slots.remove_slot("bills").expect("removing a missing slot is fine");
}

#[test]
fn corrupt_slot_file_loads_as_empty_ledger() {
    let dir = tempdir().expect("tempdir");
    let slots = Arc::new(JsonFileSlots::new(dir.path().to_path_buf()).expect("create slots"));
    fs::write(slots.slot_path("bills"), "[{\"name\": \"Rent\",").expect("write corrupt file");

    let store = LedgerStore::new(slots, "bills");
    let report = store.load_report();
    assert!(report.malformed);
    assert!(report.ledger.is_empty());
}

#[test]
fn failed_write_preserves_previous_file() {
    let dir = tempdir().expect("tempdir");
    let slots = Arc::new(JsonFileSlots::new(dir.path().to_path_buf()).expect("create slots"));
    let store = LedgerStore::new(slots.clone(), "bills");
    store.save(&sample_ledger()).expect("initial save");

    let path = slots.slot_path("bills");
    let original = fs::read_to_string(&path).expect("read original");

    // A directory squatting on the temp file name makes File::create fail.
    let tmp = tmp_path(&path);
    fs::create_dir_all(&tmp).expect("create blocking dir");
    assert!(store.save(&Ledger::new()).is_err());

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(current, original);
    let _ = fs::remove_dir_all(&tmp);
}

