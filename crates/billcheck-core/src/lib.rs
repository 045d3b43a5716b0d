//! billcheck-core
//!
//! Ledger persistence, derivation and mutation services for billcheck.
//! Depends on billcheck-domain. Storage backends plug in through [`storage::SlotStorage`].

pub mod autosave;
pub mod error;
pub mod format;
pub mod input;
pub mod ledger_service;
pub mod normalize;
pub mod public_api;
pub mod split_service;
pub mod storage;
pub mod summary_service;
pub mod time;

pub use autosave::DebouncedWriter;
pub use error::CoreError;
pub use format::{CurrencyFormatter, EnUsCurrencyFormatter};
pub use input::{parse_amount, parse_date, Parsed};
pub use ledger_service::LedgerService;
pub use public_api::*;
pub use split_service::SplitService;
pub use storage::{LedgerStore, LoadReport, MemorySlotStorage, PersistedEvent, SlotStorage};
pub use summary_service::{Snapshot, SummaryService};
pub use time::{Clock, FixedClock, SystemClock};
