//! Derived, non-persisted results computed from a ledger.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
/// Outstanding amounts across the ledger, split by cadence.
pub struct Totals {
    /// Sum of unpaid, positive amounts.
    pub total_unpaid: f64,
    /// Unpaid bills due on days 1-15.
    pub early_bucket: f64,
    /// Unpaid bills due on day 16 or later.
    pub late_bucket: f64,
    /// Unpaid bills whose due date is before `as_of`.
    pub overdue: f64,
    pub as_of: NaiveDate,
}

impl Totals {
    pub fn zero(as_of: NaiveDate) -> Self {
        Self {
            total_unpaid: 0.0,
            early_bucket: 0.0,
            late_bucket: 0.0,
            overdue: 0.0,
            as_of,
        }
    }

    /// Unpaid amount that could not be placed in either half of the month.
    pub fn unscheduled(&self) -> f64 {
        (self.total_unpaid - self.early_bucket - self.late_bucket).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Whether the balance meets every unpaid bill.
pub enum Coverage {
    Covered,
    NotCovered,
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Coverage::Covered => "Bills covered",
            Coverage::NotCovered => "Bills not covered",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Whether a prospective purchase fits after bills are funded.
pub enum PurchaseSafety {
    Safe,
    /// The purchase would push the balance below what the bills need.
    BreaksCoverage,
    /// Bills already exceed the balance, regardless of the purchase.
    AlreadyUnder,
}

impl fmt::Display for PurchaseSafety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PurchaseSafety::Safe => "Safe to buy",
            PurchaseSafety::BreaksCoverage => "Purchase breaks bill coverage",
            PurchaseSafety::AlreadyUnder => "Already under on bills",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
/// Coverage and purchase classification for the current inputs.
pub struct Affordability {
    /// `balance - total_unpaid`.
    pub left: f64,
    /// `left - purchase`.
    pub after: f64,
    pub coverage: Coverage,
    pub purchase: PurchaseSafety,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
/// 50/30/20 split of an income amount.
pub struct IncomeSplit {
    pub needs: f64,
    pub wants: f64,
    pub savings: f64,
}

impl IncomeSplit {
    pub fn total(&self) -> f64 {
        self.needs + self.wants + self.savings
    }
}
