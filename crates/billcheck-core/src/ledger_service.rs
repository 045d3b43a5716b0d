//! Mutation helpers for [`Ledger`] instances.
//!
//! Every helper edits the ledger in place and addresses bills by identity, so a
//! display layer may reorder rows freely between calls.

use billcheck_domain::{Bill, BillId, BillPatch, Ledger};

use crate::{input::parse_amount, CoreError};

pub struct LedgerService;

impl LedgerService {
    /// Appends an empty bill and returns its identity.
    pub fn add_bill(ledger: &mut Ledger) -> BillId {
        ledger.push(Bill::empty())
    }

    /// Applies `patch` to the bill identified by `id`.
    pub fn update_bill(ledger: &mut Ledger, id: BillId, patch: &BillPatch) -> Result<(), CoreError> {
        let bill = ledger.bill_mut(id).ok_or(CoreError::BillNotFound(id))?;
        patch.apply(bill);
        Ok(())
    }

    /// Sets a bill's amount from raw form text using the lenient parser.
    pub fn set_amount_text(ledger: &mut Ledger, id: BillId, raw: &str) -> Result<bool, CoreError> {
        let parsed = parse_amount(raw);
        Self::update_bill(ledger, id, &BillPatch::default().amount(parsed.value))?;
        Ok(parsed.coerced)
    }

    /// Removes exactly the bill with this identity.
    pub fn delete_bill(ledger: &mut Ledger, id: BillId) -> Result<Bill, CoreError> {
        ledger.remove(id).ok_or(CoreError::BillNotFound(id))
    }

    /// Flips the paid flag and returns the new value.
    pub fn toggle_paid(ledger: &mut Ledger, id: BillId) -> Result<bool, CoreError> {
        let bill = ledger.bill_mut(id).ok_or(CoreError::BillNotFound(id))?;
        bill.paid = !bill.paid;
        Ok(bill.paid)
    }

    /// Marks every bill unpaid, returning how many flags changed.
    pub fn clear_paid_flags(ledger: &mut Ledger) -> usize {
        let mut cleared = 0;
        for bill in ledger.bills.iter_mut().filter(|bill| bill.paid) {
            bill.paid = false;
            cleared += 1;
        }
        cleared
    }
}
