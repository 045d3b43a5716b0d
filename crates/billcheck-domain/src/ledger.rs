//! The ordered collection of bills owned by a session.

use serde::{Deserialize, Serialize};

use crate::bill::{Bill, BillId};

/// Ordered bill list. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Ledger {
    pub bills: Vec<Bill>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bill> {
        self.bills.iter()
    }

    /// Appends a bill and returns its identity.
    pub fn push(&mut self, bill: Bill) -> BillId {
        let id = bill.id;
        self.bills.push(bill);
        id
    }

    pub fn bill(&self, id: BillId) -> Option<&Bill> {
        self.bills.iter().find(|bill| bill.id == id)
    }

    pub fn bill_mut(&mut self, id: BillId) -> Option<&mut Bill> {
        self.bills.iter_mut().find(|bill| bill.id == id)
    }

    /// Removes the bill with the given identity, keeping the order of the rest.
    pub fn remove(&mut self, id: BillId) -> Option<Bill> {
        let index = self.bills.iter().position(|bill| bill.id == id)?;
        Some(self.bills.remove(index))
    }

    /// Compares persisted content in order, ignoring identities.
    pub fn same_fields(&self, other: &Ledger) -> bool {
        self.bills.len() == other.bills.len()
            && self
                .bills
                .iter()
                .zip(other.bills.iter())
                .all(|(left, right)| left.same_fields(right))
    }
}

impl From<Vec<Bill>> for Ledger {
    fn from(bills: Vec<Bill>) -> Self {
        Self { bills }
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Bill;
    type IntoIter = std::slice::Iter<'a, Bill>;

    fn into_iter(self) -> Self::IntoIter {
        self.bills.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_serializes_as_array() {
        let ledger = Ledger::from(vec![Bill::new("Rent", "2024-03-01", 900.0, false)]);
        let json = serde_json::to_string(&ledger).expect("serialize ledger");
        assert!(json.starts_with('['), "unexpected json: {json}");
    }

    #[test]
    fn remove_uses_identity_not_content() {
        let first = Bill::new("Gym", "2024-03-05", 20.0, false);
        let second = Bill::new("Gym", "2024-03-05", 20.0, false);
        assert!(first.same_fields(&second));
        let mut ledger = Ledger::from(vec![first.clone(), second.clone()]);

        let removed = ledger.remove(second.id).expect("bill removed");
        assert_eq!(removed.id, second.id);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.bills[0].id, first.id);
        assert!(ledger.remove(second.id).is_none());
    }
}
