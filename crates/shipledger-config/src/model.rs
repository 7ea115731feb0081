use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

/// Stores user-configurable preferences for the ledger shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_locale")]
    pub locale: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional override for the ledger file. Defaults to `<data dir>/ledger/transactions.json`.
    pub ledger_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory receiving exported reports. Defaults to the working directory.
    pub report_dir: Option<PathBuf>,

    #[serde(default = "Config::default_report_prefix")]
    pub report_prefix: String,
    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            locale: Self::default_locale(),
            ledger_file: None,
            report_dir: None,
            report_prefix: Self::default_report_prefix(),
            backup_retention: Self::default_backup_retention(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::set_value`], in display order.
    pub const KEYS: [&'static str; 7] = [
        "currency_symbol",
        "locale",
        "ledger_file",
        "report_dir",
        "report_prefix",
        "backup_retention",
        "ui_color_enabled",
    ];

    pub fn default_currency_symbol() -> String {
        "₹".into()
    }

    pub fn default_locale() -> String {
        "en-IN".into()
    }

    pub fn default_report_prefix() -> String {
        "shipping_report".into()
    }

    pub fn default_backup_retention() -> usize {
        5
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Directory that reports are written to.
    pub fn resolve_report_dir(&self) -> PathBuf {
        self.report_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Current value of `key` rendered as text.
    pub fn value(&self, key: &str) -> Result<String, ConfigError> {
        let rendered = match key {
            "currency_symbol" => self.currency_symbol.clone(),
            "locale" => self.locale.clone(),
            "ledger_file" => display_path(&self.ledger_file),
            "report_dir" => display_path(&self.report_dir),
            "report_prefix" => self.report_prefix.clone(),
            "backup_retention" => self.backup_retention.to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(rendered)
    }

    /// Updates one setting from text. `none` clears optional paths.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let trimmed = value.trim();
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: trimmed.to_string(),
        };
        match key {
            "currency_symbol" => self.currency_symbol = trimmed.to_string(),
            "locale" if !trimmed.is_empty() => self.locale = trimmed.to_string(),
            "ledger_file" => self.ledger_file = parse_optional_path(trimmed),
            "report_dir" => self.report_dir = parse_optional_path(trimmed),
            "report_prefix" if !trimmed.is_empty() => self.report_prefix = trimmed.to_string(),
            "backup_retention" => {
                let parsed: usize = trimmed.parse().map_err(|_| invalid())?;
                if parsed == 0 {
                    return Err(invalid());
                }
                self.backup_retention = parsed;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match trimmed.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => return Err(invalid()),
                }
            }
            "locale" | "report_prefix" => return Err(invalid()),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

fn parse_optional_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(default)".into())
}
