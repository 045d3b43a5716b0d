//! billcheck-domain
//!
//! Pure domain models (Bill, Ledger, derived totals and affordability states).
//! No I/O, no storage. Only data types and core enums.

pub mod bill;
pub mod common;
pub mod ledger;
pub mod summary;

pub use bill::*;
pub use common::*;
pub use ledger::*;
pub use summary::*;
