//! Tests for the file-backed ledger store

use std::fs;

use authgate::core::ledger::Ledger;
use authgate::core::models::Analysis;
use authgate::core::ports::LedgerStore;
use authgate::storage::{FileLedgerStore, ledger_store};
use tempfile::TempDir;

use crate::common::FixedContext;

fn sample_ledger(n: usize) -> Ledger {
    let mut ledger = Ledger::new();
    for i in 0..n {
        let url = format!("https://{i}.example");
        ledger.write(&url, Analysis::default(), &FixedContext).unwrap();
    }
    ledger
}

// =============================================================================
// LOAD / SAVE
// =============================================================================

#[test]
fn test_missing_file_loads_empty_ledger() {
    let temp = TempDir::new().unwrap();
    let store = FileLedgerStore::new(temp.path().join("ledger.json"));

    let ledger = store.load().unwrap();

    assert!(ledger.is_empty());
    assert_eq!(ledger.next_id(), 1);
}

#[test]
fn test_snapshot_round_trips() {
    let temp = TempDir::new().unwrap();
    let store = FileLedgerStore::new(temp.path().join("ledger.json"));
    let ledger = sample_ledger(3);

    store.save(&ledger).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, ledger);
    assert_eq!(loaded.next_id(), 4);
    assert_eq!(loaded.get(2).unwrap().url, "https://1.example");
}

#[test]
fn test_save_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/state/ledger.json");
    let store = ledger_store(&path);

    store.save(&sample_ledger(1)).unwrap();

    assert!(path.exists());
    assert!(!temp.path().join("nested/state/ledger.json.tmp").exists());
}

#[test]
fn test_save_replaces_previous_snapshot() {
    let temp = TempDir::new().unwrap();
    let store = FileLedgerStore::new(temp.path().join("ledger.json"));

    store.save(&sample_ledger(5)).unwrap();
    store.save(&sample_ledger(2)).unwrap();

    assert_eq!(store.load().unwrap().count(), 2);
}

#[test]
fn test_snapshot_is_readable_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ledger.json");
    FileLedgerStore::new(&path).save(&sample_ledger(1)).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(value["next_id"], 2);
    assert_eq!(value["records"][0]["id"], 1);
    assert_eq!(value["records"][0]["status"], "completed");
}

#[test]
fn test_location_is_the_path() {
    let store = FileLedgerStore::new("some/dir/ledger.json");
    assert!(store.location().ends_with("ledger.json"));
    assert!(store.path().ends_with("some/dir/ledger.json"));
}

// =============================================================================
// LOCKED UPDATES
// =============================================================================

fn append(url: &str) -> impl FnMut(&mut Ledger) -> anyhow::Result<()> + '_ {
    move |ledger: &mut Ledger| -> anyhow::Result<()> {
        ledger.write(url, Analysis::default(), &FixedContext)?;
        Ok(())
    }
}

#[test]
fn test_update_applies_change_to_stored_ledger() {
    let temp = TempDir::new().unwrap();
    let store = FileLedgerStore::new(temp.path().join("ledger.json"));
    store.save(&sample_ledger(2)).unwrap();

    let updated = store.update(&mut append("https://new.example")).unwrap();

    assert_eq!(updated.count(), 3);
    assert_eq!(updated.get(3).unwrap().url, "https://new.example");
    assert_eq!(store.load().unwrap(), updated);
}

#[test]
fn test_stale_writers_never_share_an_id() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ledger.json");
    let cli = FileLedgerStore::new(&path);
    let server = FileLedgerStore::new(&path);

    // Both took their snapshot before either wrote
    let cli_view = cli.load().unwrap();
    let server_view = server.load().unwrap();
    assert_eq!(cli_view.next_id(), server_view.next_id());

    cli.update(&mut append("https://cli.example")).unwrap();
    let fin = server.update(&mut append("https://server.example")).unwrap();

    let urls: Vec<(u64, String)> = fin.list_all().into_iter().map(|r| (r.id, r.url)).collect();
    assert_eq!(
        urls,
        vec![
            (1, "https://cli.example".to_string()),
            (2, "https://server.example".to_string()),
        ]
    );
    assert_eq!(cli.load().unwrap(), fin);
}

#[test]
fn test_failed_change_leaves_snapshot_untouched() {
    let temp = TempDir::new().unwrap();
    let store = FileLedgerStore::new(temp.path().join("ledger.json"));
    store.save(&sample_ledger(1)).unwrap();

    let err = store
        .update(&mut |ledger: &mut Ledger| -> anyhow::Result<()> {
            ledger.write("https://half.example", Analysis::default(), &FixedContext)?;
            anyhow::bail!("changed my mind")
        })
        .unwrap_err();

    assert_eq!(err.to_string(), "changed my mind");
    let stored = store.load().unwrap();
    assert_eq!(stored.count(), 1);
    assert_eq!(stored.next_id(), 2);
}

#[test]
fn test_update_creates_lock_beside_snapshot() {
    let temp = TempDir::new().unwrap();
    let store = FileLedgerStore::new(temp.path().join("state/ledger.json"));

    store.update(&mut append("https://a.example")).unwrap();

    assert!(temp.path().join("state/ledger.json").exists());
    assert!(temp.path().join("state/ledger.json.lock").exists());
}

// =============================================================================
// CORRUPT SNAPSHOTS
// =============================================================================

#[test]
fn test_garbage_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ledger.json");
    fs::write(&path, "not json at all").unwrap();

    let err = FileLedgerStore::new(&path).load().unwrap_err();
    assert!(format!("{err:#}").contains("corrupt ledger"));
}

#[test]
fn test_record_ahead_of_counter_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ledger.json");
    let mut snapshot: serde_json::Value = serde_json::to_value(sample_ledger(2)).unwrap();
    snapshot["next_id"] = serde_json::json!(2);
    fs::write(&path, snapshot.to_string()).unwrap();

    let err = FileLedgerStore::new(&path).load().unwrap_err();
    assert!(format!("{err:#}").contains("not below next_id"));
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ledger.json");
    let mut snapshot: serde_json::Value = serde_json::to_value(sample_ledger(2)).unwrap();
    snapshot["records"][1]["id"] = serde_json::json!(1);
    fs::write(&path, snapshot.to_string()).unwrap();

    let err = FileLedgerStore::new(&path).load().unwrap_err();
    assert!(format!("{err:#}").contains("duplicate record id 1"));
}
