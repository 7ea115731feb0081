//! shipledger-core
//!
//! Ledger operations, aggregation, and reporting for the shipping ledger.
//! Depends on shipledger-domain. No CLI, no terminal I/O, no direct file access:
//! persistence goes through the injected [`storage::LedgerStore`].

pub mod error;
pub mod ledger_service;
pub mod report_service;
pub mod storage;
pub mod summary_service;
pub mod time;

pub use error::CoreError;
pub use ledger_service::*;
pub use report_service::*;
pub use storage::{LedgerStore, LoadOutcome, MemoryLedgerStore};
pub use summary_service::*;
pub use time::{Clock, SystemClock};
