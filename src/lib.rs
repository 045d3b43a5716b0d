#![doc(test(attr(deny(warnings))))]

//! billcheck keeps a small list of recurring bills and answers two questions:
//! are the bills covered by the current balance, and is a purchase safe on top
//! of them.
//!
//! The engine lives in the workspace crates re-exported below. This crate wires
//! them into a [`BudgetSession`] and sets up tracing.

pub mod errors;
pub mod session;
pub mod utils;

pub use billcheck_config as config;
pub use billcheck_core as engine;
pub use billcheck_domain as domain;
pub use billcheck_storage_json as storage;

pub use errors::BillcheckError;
pub use session::BudgetSession;

pub use chrono;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("billcheck tracing initialized.");
    });
}
