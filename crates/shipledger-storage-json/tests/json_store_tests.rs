use std::{
    fs,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use shipledger_core::{Clock, LedgerService, LedgerStore, LoadOutcome};
use shipledger_domain::{Category, TransactionFormData, TransactionType};
use shipledger_storage_json::{JsonLedgerStore, StoragePaths};
use tempfile::tempdir;

struct MinuteClock {
    ticks: AtomicI64,
}

impl MinuteClock {
    fn new() -> Self {
        Self {
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for MinuteClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap() + Duration::minutes(tick)
    }
}

struct FrozenClock;

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }
}

fn port_charge() -> TransactionFormData {
    TransactionFormData {
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        kind: TransactionType::Debit,
        description: "Berth hire".into(),
        amount: dec!(840.25),
        party_name: "Kandla Port".into(),
        category: Some(Category::PortCharges),
        reference: Some("KP-991".into()),
        notes: None,
    }
}

#[test]
fn missing_file_loads_as_missing() {
    let dir = tempdir().expect("tempdir");
    let store = JsonLedgerStore::new(StoragePaths::in_dir(dir.path())).expect("store");

    assert_eq!(store.load(), LoadOutcome::Missing);
    assert!(store.ledger_path().ends_with("ledger/transactions.json"));
}

#[test]
fn service_round_trips_through_the_file() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::in_dir(dir.path());
    let clock = Arc::new(MinuteClock::new());
    let store = JsonLedgerStore::with_clock(paths.clone(), 5, clock.clone()).expect("store");
    let ledger = LedgerService::new(store, clock);

    let created = ledger.create(port_charge()).expect("create");

    let reopened = JsonLedgerStore::new(paths).expect("reopen");
    assert_eq!(reopened.load().into_transactions(), vec![created]);
}

#[test]
fn file_holds_a_plain_json_array() {
    let dir = tempdir().expect("tempdir");
    let store = JsonLedgerStore::new(StoragePaths::in_dir(dir.path())).expect("store");
    let ledger = LedgerService::new(store, Arc::new(MinuteClock::new()));
    ledger.create(port_charge()).expect("create");

    let raw = fs::read_to_string(ledger.store().ledger_path()).expect("read file");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    let first = &value.as_array().expect("array")[0];
    assert_eq!(first["type"], "debit");
    assert_eq!(first["partyName"], "Kandla Port");
    assert_eq!(first["reference"], "KP-991");
}

#[test]
fn corrupt_file_fails_open() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::in_dir(dir.path());
    let store = JsonLedgerStore::new(paths.clone()).expect("store");
    fs::write(&paths.ledger_file, "[{\"id\": \"txn_1\", \"amount\": ").expect("write junk");

    let outcome = store.load();
    assert!(outcome.is_corrupt());
    assert!(outcome.into_transactions().is_empty());
}

#[test]
fn no_temp_file_is_left_behind() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::in_dir(dir.path());
    let store = JsonLedgerStore::new(paths.clone()).expect("store");
    store.save(&[]).expect("save");

    let leftovers: Vec<_> = fs::read_dir(paths.ledger_file.parent().unwrap())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn overwrites_keep_a_bounded_set_of_backups() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::in_dir(dir.path());
    let clock = Arc::new(MinuteClock::new());
    let store = JsonLedgerStore::with_clock(paths, 2, clock.clone()).expect("store");
    let ledger = LedgerService::new(store, clock);

    for _ in 0..4 {
        ledger.create(port_charge()).expect("create");
    }

    let backups = ledger.store().list_backups().expect("list backups");
    assert_eq!(backups.len(), 2);
    assert!(backups[0].created_at > backups[1].created_at);
    assert!(backups[0].id.starts_with("transactions_"));
}

#[test]
fn saves_within_one_second_keep_every_backup() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::in_dir(dir.path());
    let clock = Arc::new(FrozenClock);
    let store = JsonLedgerStore::with_clock(paths.clone(), 5, clock.clone()).expect("store");
    fs::write(&paths.ledger_file, "{corrupt").expect("write junk");
    let ledger = LedgerService::new(store, clock);

    ledger.create(port_charge()).expect("first");
    ledger.create(port_charge()).expect("second");

    let backups = ledger.store().list_backups().expect("list backups");
    assert_eq!(backups.len(), 2);
    assert_eq!(backups[1].id, "transactions_20240601_090000.json");
    assert_eq!(backups[0].id, "transactions_20240601_090000_001.json");
    assert_eq!(backups[0].created_at, backups[1].created_at);

    let oldest = fs::read_to_string(&backups[1].path).expect("read backup");
    assert_eq!(oldest, "{corrupt");
}

#[test]
fn restoring_a_backup_brings_back_the_older_list() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::in_dir(dir.path());
    let clock = Arc::new(MinuteClock::new());
    let store = JsonLedgerStore::with_clock(paths, 5, clock.clone()).expect("store");
    let ledger = LedgerService::new(store, clock);

    let first = ledger.create(port_charge()).expect("first");
    ledger.create(port_charge()).expect("second");
    assert_eq!(ledger.list().len(), 2);

    let newest_backup = ledger.store().list_backups().expect("list")[0].clone();
    let restored = ledger
        .store()
        .restore_backup(&newest_backup)
        .expect("restore");

    assert_eq!(restored, vec![first.clone()]);
    assert_eq!(ledger.list(), vec![first]);
}

#[test]
fn unknown_backup_is_reported() {
    let dir = tempdir().expect("tempdir");
    let store = JsonLedgerStore::new(StoragePaths::in_dir(dir.path())).expect("store");
    let err = store.backup("transactions_20200101_000000.json").unwrap_err();
    assert!(err.to_string().contains("not found"));
}
