use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{DateTime, NaiveDateTime, Utc};
use shipledger_core::{
    storage::{serialize_transactions, LedgerStore, LoadOutcome},
    Clock, CoreError, SystemClock,
};
use shipledger_domain::Transaction;

const LEDGER_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const BACKUP_COUNTER_DIGITS: usize = 3;
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;
const LEDGER_DIR: &str = "ledger";
const LEDGER_FILE: &str = "transactions.json";
const BACKUP_DIR: &str = "backups";

/// Locations used by [`JsonLedgerStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub ledger_file: PathBuf,
    pub backup_dir: PathBuf,
}

impl StoragePaths {
    /// Standard layout below an application data directory.
    pub fn in_dir(base: &Path) -> Self {
        Self {
            ledger_file: base.join(LEDGER_DIR).join(LEDGER_FILE),
            backup_dir: base.join(BACKUP_DIR),
        }
    }
}

/// Describes one backup copy of the ledger file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub path: PathBuf,
}

/// Filesystem-backed ledger store: the full transaction list in one JSON file.
///
/// Saves replace the file atomically (temp file + rename). The previous file is
/// copied into the backup directory first, keeping the newest `retention` copies.
#[derive(Clone)]
pub struct JsonLedgerStore {
    paths: StoragePaths,
    retention: usize,
    clock: Arc<dyn Clock>,
}

impl JsonLedgerStore {
    pub fn new(paths: StoragePaths) -> Result<Self, CoreError> {
        Self::with_retention(paths, DEFAULT_RETENTION)
    }

    pub fn with_retention(paths: StoragePaths, retention: usize) -> Result<Self, CoreError> {
        Self::with_clock(paths, retention, Arc::new(SystemClock))
    }

    pub fn with_clock(
        paths: StoragePaths,
        retention: usize,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CoreError> {
        if let Some(parent) = paths.ledger_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(&paths.backup_dir)?;
        Ok(Self {
            paths,
            retention: retention.max(1),
            clock,
        })
    }

    pub fn ledger_path(&self) -> &Path {
        &self.paths.ledger_file
    }

    pub fn backup_dir(&self) -> &Path {
        &self.paths.backup_dir
    }

    /// Lists backup copies, newest first.
    pub fn list_backups(&self) -> Result<Vec<BackupInfo>, CoreError> {
        let dir = &self.paths.backup_dir;
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEDGER_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(BackupInfo {
                    id: file_name.to_string(),
                    created_at: parse_backup_timestamp(file_name),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by_key(|info| Reverse(info.id.clone()));
        Ok(entries)
    }

    /// Finds a backup by its file name.
    pub fn backup(&self, id: &str) -> Result<BackupInfo, CoreError> {
        self.list_backups()?
            .into_iter()
            .find(|info| info.id == id.trim())
            .ok_or_else(|| CoreError::Storage(format!("backup `{}` not found", id.trim())))
    }

    /// Copies a backup over the ledger file and returns its contents.
    pub fn restore_backup(&self, backup: &BackupInfo) -> Result<Vec<Transaction>, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let data = fs::read_to_string(&backup.path)?;
        let transactions: Vec<Transaction> = serde_json::from_str(&data)?;
        self.save(&transactions)?;
        tracing::info!(backup = %backup.id, "ledger restored from backup");
        Ok(transactions)
    }

    fn backup_existing_file(&self) -> Result<(), CoreError> {
        let path = &self.paths.ledger_file;
        if !path.exists() {
            return Ok(());
        }
        fs::create_dir_all(&self.paths.backup_dir)?;
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("transactions");
        let timestamp = self.clock.now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let target = self.free_backup_path(stem, &timestamp);
        fs::copy(path, &target)?;
        tracing::debug!(backup = %target.display(), "ledger file backed up");
        self.prune_backups()
    }

    /// First unused backup path for `timestamp`. Saves within the same second
    /// get a `_001`, `_002`, ... suffix, which sorts after the bare name.
    fn free_backup_path(&self, stem: &str, timestamp: &str) -> PathBuf {
        let base = self
            .paths
            .backup_dir
            .join(format!("{}_{}.{}", stem, timestamp, LEDGER_EXTENSION));
        if !base.exists() {
            return base;
        }
        let mut counter: usize = 1;
        loop {
            let candidate = self.paths.backup_dir.join(format!(
                "{}_{}_{:0width$}.{}",
                stem,
                timestamp,
                counter,
                LEDGER_EXTENSION,
                width = BACKUP_COUNTER_DIGITS
            ));
            if !candidate.exists() {
                return candidate;
            }
            counter += 1;
        }
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        for entry in self.list_backups()?.into_iter().skip(self.retention) {
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }
}

impl LedgerStore for JsonLedgerStore {
    fn load(&self) -> LoadOutcome {
        let path = &self.paths.ledger_file;
        if !path.exists() {
            return LoadOutcome::Missing;
        }
        let outcome = match fs::read_to_string(path) {
            Ok(data) => LoadOutcome::parse(&data),
            Err(err) => LoadOutcome::Corrupt {
                reason: err.to_string(),
            },
        };
        if let LoadOutcome::Corrupt { reason } = &outcome {
            tracing::warn!(path = %path.display(), %reason, "ledger file could not be read");
        }
        outcome
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        let path = &self.paths.ledger_file;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.backup_existing_file()?;
        let tmp = tmp_path(path);
        write_atomic(&tmp, &serialize_transactions(transactions)?)?;
        fs::rename(&tmp, path)?;
        tracing::debug!(path = %path.display(), count = transactions.len(), "ledger saved");
        Ok(())
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(&format!(".{}", LEDGER_EXTENSION))?;
    let mut segments = trimmed.rsplit('_').peekable();
    if segments
        .peek()
        .is_some_and(|last| is_digits(last, BACKUP_COUNTER_DIGITS))
    {
        segments.next();
    }
    let time = segments.next()?;
    let date = segments.next()?;
    if !is_digits(date, 8) || !is_digits(time, 6) {
        return None;
    }
    let raw = format!("{}{}", date, time);
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
