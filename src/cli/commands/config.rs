use shipledger_config::Config;

use crate::cli::core::CommandResult;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change settings",
        "config [key [value]]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output_section("Configuration");
            for key in Config::KEYS {
                io::print_info(format!("  {:<18} {}", key, context.config.value(key)?));
            }
            io::print_info(format!(
                "  (stored in {})",
                context.config_manager.config_path().display()
            ));
            Ok(())
        }
        [key] => {
            io::print_info(format!("{} = {}", key, context.config.value(key)?));
            Ok(())
        }
        [key, value @ ..] => {
            let value = value.join(" ");
            context.config.set_value(key, &value)?;
            context.save_config()?;
            tracing::info!(%key, "configuration updated");
            io::print_success(format!("{} = {}", key, context.config.value(key)?));
            Ok(())
        }
    }
}
