use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use shipledger_config::{resolve_data_dir, Config, ConfigManager};
use shipledger_core::{Clock, LedgerService, LoadOutcome, SystemClock};
use shipledger_storage_json::{JsonLedgerStore, StoragePaths};

use crate::cli::commands;
use crate::cli::core::{CommandError, CommandResult, LoopControl};
use crate::cli::formatters::MoneyStyle;
use crate::cli::io as cli_io;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::errors::{CliError, LedgerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// State shared by every command for the lifetime of the shell.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger: LedgerService<JsonLedgerStore>,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
    data_dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_data_dir(mode, &resolve_data_dir())
    }

    /// Opens the configuration and ledger stored below `data_dir`.
    pub fn with_data_dir(mode: CliMode, data_dir: &Path) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(data_dir).map_err(LedgerError::from)?;
        let config = config_manager.load().map_err(LedgerError::from)?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let ledger = open_ledger(data_dir, &config, clock.clone())?;

        let context = Self {
            mode,
            registry: commands::registry(),
            ledger,
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
            data_dir: data_dir.to_path_buf(),
            clock,
        };
        context.apply_output_preferences();
        tracing::debug!(
            data_dir = %data_dir.display(),
            ledger = %context.ledger.store().ledger_path().display(),
            "shell context ready"
        );
        context.warn_if_corrupt();
        Ok(context)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.suggest(input) {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn prompt(&self) -> String {
        "shipledger> ".to_string()
    }

    /// Asks before a destructive action. Scripts always proceed.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true).unwrap_or(true))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Ledger(LedgerError::Validation(errors)) => {
                cli_io::print_error("Transaction not saved:");
                for field_error in &errors.0 {
                    cli_io::print_info(format!("  - {}", field_error));
                }
            }
            other => cli_io::print_error(other.to_string()),
        }
        Ok(())
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Currency settings for rendering amounts.
    pub(crate) fn money_style(&self) -> MoneyStyle<'_> {
        MoneyStyle {
            symbol: &self.config.currency_symbol,
            locale: &self.config.locale,
        }
    }

    /// Persists the configuration and re-opens the ledger with the new settings.
    pub(crate) fn save_config(&mut self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        self.ledger = open_ledger(&self.data_dir, &self.config, self.clock.clone())?;
        self.apply_output_preferences();
        Ok(())
    }

    fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            color_enabled: self.config.ui_color_enabled && self.mode == CliMode::Interactive,
        });
    }

    fn warn_if_corrupt(&self) {
        if let LoadOutcome::Corrupt { reason } = self.ledger.load_outcome() {
            cli_io::print_warning(format!(
                "Ledger file {} could not be read ({}); starting with an empty ledger.",
                self.ledger.store().ledger_path().display(),
                reason
            ));
        }
    }
}

fn open_ledger(
    data_dir: &Path,
    config: &Config,
    clock: Arc<dyn Clock>,
) -> Result<LedgerService<JsonLedgerStore>, LedgerError> {
    let mut paths = StoragePaths::in_dir(data_dir);
    if let Some(ledger_file) = &config.ledger_file {
        paths.ledger_file = ledger_file.clone();
    }
    let store = JsonLedgerStore::with_clock(paths, config.backup_retention, clock.clone())?;
    Ok(LedgerService::new(store, clock))
}
