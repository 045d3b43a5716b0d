//! Derivation of totals and affordability from a ledger.
//!
//! Nothing here performs I/O or mutates its inputs. Non-finite inputs are
//! treated as zero so a bad value can never turn the results into `NaN`.

use billcheck_domain::{
    sanitize_amount, Affordability, CadenceBucket, Coverage, Ledger, PurchaseSafety, Totals,
};
use chrono::NaiveDate;
use serde::Serialize;

/// Totals and affordability for one set of inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub totals: Totals,
    pub affordability: Affordability,
}

pub struct SummaryService;

impl SummaryService {
    /// Sums unpaid bills and splits them by the half of the month they fall due.
    ///
    /// Bills whose due date is missing or malformed count toward `total_unpaid`
    /// but neither bucket.
    pub fn compute_totals(ledger: &Ledger, as_of: NaiveDate) -> Totals {
        let mut totals = Totals::zero(as_of);
        for bill in ledger {
            let amount = bill.outstanding();
            if amount == 0.0 {
                continue;
            }
            totals.total_unpaid += amount;

            let Some(due) = bill.due_date() else {
                continue;
            };
            match CadenceBucket::for_date(due) {
                CadenceBucket::Early => totals.early_bucket += amount,
                CadenceBucket::Late => totals.late_bucket += amount,
            }
            if due < as_of {
                totals.overdue += amount;
            }
        }
        totals
    }

    /// Classifies bill coverage and purchase safety.
    pub fn compute_affordability(totals: &Totals, balance: f64, purchase: f64) -> Affordability {
        let left = sanitize_amount(balance) - totals.total_unpaid;
        let after = left - sanitize_amount(purchase);

        let coverage = if left >= 0.0 {
            Coverage::Covered
        } else {
            Coverage::NotCovered
        };
        let purchase = if left < 0.0 {
            PurchaseSafety::AlreadyUnder
        } else if after < 0.0 {
            PurchaseSafety::BreaksCoverage
        } else {
            PurchaseSafety::Safe
        };

        Affordability {
            left,
            after,
            coverage,
            purchase,
        }
    }

    /// Recomputes everything from scratch for the given inputs.
    pub fn snapshot(ledger: &Ledger, as_of: NaiveDate, balance: f64, purchase: f64) -> Snapshot {
        let totals = Self::compute_totals(ledger, as_of);
        let affordability = Self::compute_affordability(&totals, balance, purchase);
        Snapshot {
            totals,
            affordability,
        }
    }
}
