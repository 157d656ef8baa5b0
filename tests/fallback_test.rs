use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let mut cmd = Command::new(cargo_bin!("checkout-sample"));
    cmd.args(["--prefs-path", "some_prefs", "settings", "show"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("WARNING: Persistent storage requested via --prefs-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_no_fallback_warning() {
    let dir = tempfile::tempdir().unwrap();
    let prefs_path = dir.path().join("test_prefs");

    let mut cmd = Command::new(cargo_bin!("checkout-sample"));
    cmd.arg("--prefs-path")
        .arg(&prefs_path)
        .args(["settings", "show"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("WARNING").not());
}
