//! Bill records and field-level patches.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::CadenceBucket;

/// Identity of a bill within a live ledger. Not persisted.
pub type BillId = Uuid;

/// Persisted date format for the `due` field.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A recurring bill with a single due date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: BillId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub due: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub paid: bool,
}

impl Default for Bill {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bill {
    /// Creates a bill with every field at its default and a fresh identity.
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            due: String::new(),
            amount: 0.0,
            paid: false,
        }
    }

    /// Creates a bill, normalizing the supplied fields.
    pub fn new(name: impl Into<String>, due: impl Into<String>, amount: f64, paid: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            due: due.into().trim().to_string(),
            amount: sanitize_amount(amount),
            paid,
        }
    }

    /// Parses `due` as an ISO date. Empty or malformed values yield `None`.
    pub fn due_date(&self) -> Option<NaiveDate> {
        parse_due_date(&self.due)
    }

    /// Half of the month this bill falls into, when its due date parses.
    pub fn cadence(&self) -> Option<CadenceBucket> {
        self.due_date().map(CadenceBucket::for_date)
    }

    /// Amount this bill adds to the outstanding total.
    ///
    /// Paid bills, non-positive amounts and non-finite amounts count as zero.
    pub fn outstanding(&self) -> f64 {
        if self.paid || !self.amount.is_finite() || self.amount <= 0.0 {
            0.0
        } else {
            self.amount
        }
    }

    /// Compares the persisted fields, ignoring identity.
    pub fn same_fields(&self, other: &Bill) -> bool {
        self.name == other.name
            && self.due == other.due
            && self.amount == other.amount
            && self.paid == other.paid
    }
}

/// Parses an ISO `YYYY-MM-DD` date, tolerating surrounding whitespace.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT).ok()
}

/// Replaces `NaN` and infinities with zero.
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Partial update applied to a single bill. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillPatch {
    pub name: Option<String>,
    pub due: Option<String>,
    pub amount: Option<f64>,
    pub paid: Option<bool>,
}

impl BillPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn due(mut self, due: impl Into<String>) -> Self {
        self.due = Some(due.into());
        self
    }

    pub fn due_date(self, date: NaiveDate) -> Self {
        self.due(date.format(DUE_DATE_FORMAT).to_string())
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn paid(mut self, paid: bool) -> Self {
        self.paid = Some(paid);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.due.is_none() && self.amount.is_none() && self.paid.is_none()
    }

    /// Applies the patch in place with the same normalization used on load.
    pub fn apply(&self, bill: &mut Bill) {
        if let Some(name) = &self.name {
            bill.name = name.trim().to_string();
        }
        if let Some(due) = &self.due {
            bill.due = due.trim().to_string();
        }
        if let Some(amount) = self.amount {
            bill.amount = sanitize_amount(amount);
        }
        if let Some(paid) = self.paid {
            bill.paid = paid;
        }
    }
}
