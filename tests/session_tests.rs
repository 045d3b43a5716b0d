mod common;

use std::time::Duration;

use billcheck::{
    domain::{BillPatch, Coverage, PurchaseSafety},
    engine::SlotStorage,
};
use common::{open_session, scenario_ledger, setup_store};
use tokio::runtime::Handle;

#[test]
fn scenario_from_empty_ledger_breaks_coverage() {
    let (_slots, store) = setup_store();
    let mut session = open_session(store);
    assert!(session.ledger().is_empty());

    for (name, due, amount, paid) in [
        ("Rent", "2024-03-10", "200", false),
        ("Internet", "2024-03-20", "$150.00", true),
        ("Insurance", "2024-03-20", "300", false),
    ] {
        let id = session.add_bill();
        session
            .update_bill(id, &BillPatch::default().name(name).due(due).paid(paid))
            .expect("update bill");
        session.set_bill_amount_text(id, amount).expect("set amount");
    }
    session.set_balance_text("1,000");
    session.set_purchase_text("$600");

    let snapshot = session.snapshot();
    assert_eq!(snapshot.totals.total_unpaid, 500.0);
    assert_eq!(snapshot.totals.early_bucket, 200.0);
    assert_eq!(snapshot.totals.late_bucket, 300.0);
    assert_eq!(snapshot.affordability.left, 500.0);
    assert_eq!(snapshot.affordability.after, -100.0);
    assert_eq!(snapshot.affordability.coverage, Coverage::Covered);
    assert_eq!(snapshot.affordability.purchase, PurchaseSafety::BreaksCoverage);
}

#[test]
fn derived_state_updates_on_every_input_change() {
    let (slots, store) = setup_store();
    store.save(&scenario_ledger()).expect("seed ledger");
    let mut session = open_session(store);

    assert_eq!(session.snapshot().affordability.purchase, PurchaseSafety::AlreadyUnder);

    session.set_balance(1000.0);
    assert_eq!(session.snapshot().affordability.purchase, PurchaseSafety::Safe);

    session.set_purchase(501.0);
    assert_eq!(
        session.snapshot().affordability.purchase,
        PurchaseSafety::BreaksCoverage
    );

    let rent = session.ledger().bills[0].id;
    assert!(session.toggle_paid(rent).expect("toggle"));
    assert_eq!(session.snapshot().totals.total_unpaid, 300.0);
    assert_eq!(session.snapshot().affordability.purchase, PurchaseSafety::Safe);

    let raw = slots.read_slot("bills").expect("read").expect("slot written");
    assert!(raw.contains("\"paid\": true"));
}

#[test]
fn coerced_text_input_is_reported() {
    let (_slots, store) = setup_store();
    let mut session = open_session(store);

    let parsed = session.set_balance_text("abc");
    assert!(parsed.coerced);
    assert_eq!(session.balance(), 0.0);

    let parsed = session.set_purchase_text("0");
    assert!(!parsed.coerced);
    assert_eq!(session.purchase(), 0.0);
}

#[test]
fn delete_and_clear_write_through() {
    let (_slots, store) = setup_store();
    store.save(&scenario_ledger()).expect("seed ledger");
    let mut session = open_session(store.clone());

    let insurance = session.ledger().bills[2].id;
    session.delete_bill(insurance).expect("delete");
    assert_eq!(session.clear_paid_flags(), 1);
    assert!(session.delete_bill(insurance).is_err());

    let reloaded = store.load();
    assert_eq!(reloaded.len(), 2);
    assert!(reloaded.iter().all(|bill| !bill.paid));
    assert_eq!(session.snapshot().totals.total_unpaid, 350.0);
}

#[tokio::test(start_paused = true)]
async fn autosave_session_updates_state_before_persisting() {
    let (_slots, store) = setup_store();
    let mut session =
        open_session(store.clone()).with_autosave(Duration::from_millis(300), Handle::current());

    let id = session.add_bill();
    session
        .update_bill(id, &BillPatch::default().name("Phone").due("2024-03-04"))
        .expect("update");
    session.set_bill_amount_text(id, "4").expect("type");
    session.set_bill_amount_text(id, "45").expect("type");

    assert_eq!(session.snapshot().totals.early_bucket, 45.0);
    assert!(session.has_pending_save());
    assert_eq!(store.last_persisted_at(), None);

    tokio::time::sleep(Duration::from_millis(350)).await;
    assert!(!session.has_pending_save());
    assert!(store.last_persisted_at().is_some());
    assert_eq!(store.load().bills[0].amount, 45.0);
}

#[tokio::test(start_paused = true)]
async fn reload_discards_pending_edits() {
    let (_slots, store) = setup_store();
    store.save(&scenario_ledger()).expect("seed ledger");
    let mut session =
        open_session(store.clone()).with_autosave(Duration::from_millis(300), Handle::current());

    session.add_bill();
    assert_eq!(session.ledger().len(), 4);
    session.reload();
    assert_eq!(session.ledger().len(), 3);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(store.load().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn flush_persists_immediately() {
    let (_slots, store) = setup_store();
    let mut session =
        open_session(store.clone()).with_autosave(Duration::from_secs(5), Handle::current());

    session.add_bill();
    session.flush().expect("flush");
    assert!(!session.has_pending_save());
    assert_eq!(store.load().len(), 1);
}
