//! shipledger-domain
//!
//! Pure domain models for the shipping ledger (Transaction, Category, form input).
//! No I/O, no CLI, no storage. Only data types, enums, and input validation.

pub mod category;
pub mod common;
pub mod form;
pub mod transaction;

pub use category::*;
pub use common::*;
pub use form::*;
pub use transaction::*;
