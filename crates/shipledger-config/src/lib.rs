//! shipledger-config
//!
//! Persistent user preferences for the shipping ledger.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{resolve_data_dir, ConfigManager, HOME_ENV};
pub use model::Config;
