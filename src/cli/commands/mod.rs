pub mod backup;
pub mod config;
pub mod report;
pub mod system;
pub mod transaction;

use shipledger_domain::TransactionId;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;

pub(crate) fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for entry in transaction::definitions()
        .into_iter()
        .chain(report::definitions())
        .chain(backup::definitions())
        .chain(config::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
    registry
}

/// First positional argument as a transaction id.
pub(crate) fn required_id(args: &[&str], usage: &str) -> Result<TransactionId, CommandError> {
    args.first()
        .map(|raw| TransactionId::from(*raw))
        .filter(|id| !id.as_str().is_empty())
        .ok_or_else(|| CommandError::InvalidArguments(format!("Usage: {usage}")))
}
