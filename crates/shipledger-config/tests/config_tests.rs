use std::fs;

use shipledger_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path()).expect("manager");

    let config = manager.load().expect("load");
    assert_eq!(config, Config::default());
    assert_eq!(config.currency_symbol, "₹");
    assert_eq!(config.locale, "en-IN");
}

#[test]
fn saved_settings_survive_reload() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path()).expect("manager");

    let mut config = Config::default();
    config.set_value("report_prefix", "kandla").unwrap();
    config.set_value("backup_retention", "3").unwrap();
    manager.save(&config).expect("save");

    let reloaded = ConfigManager::with_base_dir(dir.path())
        .expect("manager")
        .load()
        .expect("load");
    assert_eq!(reloaded.report_prefix, "kandla");
    assert_eq!(reloaded.backup_retention, 3);
    assert!(!manager.config_path().with_extension("json.tmp").exists());
}

#[test]
fn malformed_file_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path()).expect("manager");
    fs::write(manager.config_path(), "{ not json").expect("write");

    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
}
