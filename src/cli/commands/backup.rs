use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

const RESTORE_USAGE: &str = "restore <backup>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("backups", "List ledger backups", "backups", cmd_backups),
        CommandEntry::new(
            "restore",
            "Replace the ledger with a backup copy",
            RESTORE_USAGE,
            cmd_restore,
        ),
    ]
}

fn cmd_backups(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let backups = context.ledger.store().list_backups()?;
    if backups.is_empty() {
        io::print_info("No backups yet. One is taken before every change to the ledger.");
        return Ok(());
    }
    output_section("Backups (newest first)");
    for backup in backups {
        let taken = backup
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "unknown time".into());
        io::print_info(format!("  {:<40} {}", backup.id, taken));
    }
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments(format!("Usage: {RESTORE_USAGE}")))?;
    let backup = context.ledger.store().backup(name)?;
    if !context.confirm(&format!("Replace the current ledger with `{}`?", backup.id))? {
        io::print_info("Restore cancelled.");
        return Ok(());
    }
    let restored = context.ledger.store().restore_backup(&backup)?;
    io::print_success(format!(
        "Restored {} transactions from {}",
        restored.len(),
        backup.id
    ));
    Ok(())
}
