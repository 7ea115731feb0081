#![doc(test(attr(deny(warnings))))]

//! Shipping Ledger records the debits and credits of a shipping agency,
//! aggregates them into totals, and exports CSV reports through a command shell.

pub mod cli;
pub mod currency;
pub mod errors;
pub mod utils;

pub use errors::{CliError, LedgerError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Shipping ledger tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
