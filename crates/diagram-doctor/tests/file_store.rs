use diagram_doctor::{FileStore, KeyValueStore, LogOutcome, UnhandledErrorLog, analyze_error};
use std::sync::Arc;

#[test]
fn test_log_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let record = analyze_error("renderer timed out", "pikchr", None);

    {
        let store = Arc::new(FileStore::open(dir.path()).unwrap());
        let log = UnhandledErrorLog::with_defaults(store);
        assert_eq!(
            log.log("renderer timed out", "pikchr", &record),
            LogOutcome::Stored { evicted: 0 }
        );
    }

    let store = Arc::new(FileStore::open(dir.path()).unwrap());
    let log = UnhandledErrorLog::with_defaults(store.clone());
    assert_eq!(log.log("renderer timed out", "pikchr", &record), LogOutcome::Duplicate);

    let entries = log.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].diagram_type, "pikchr");
    assert_eq!(entries[0].parsed.code.as_deref(), Some("pikchr-generic-error"));

    let raw = store.get(&log.config().storage_key).unwrap().unwrap();
    assert!(raw.contains("\"errorText\":\"renderer timed out\""));
}

#[test]
fn test_unwritable_store_is_swallowed() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(dir.path()).unwrap());
    let log = UnhandledErrorLog::with_defaults(store);
    // A directory where the log file should be makes every write fail.
    std::fs::create_dir(dir.path().join("diagram-doctor.unhandled-errors.json")).unwrap();

    let record = analyze_error("boom", "d2", None);
    assert_eq!(log.log("boom", "d2", &record), LogOutcome::StorageFailed);
    assert!(log.entries().is_empty());
}
