//! Full-mode reconciliation of changed, added and removed files

use super::test_utils::{modify, Fixture};
use filecat::store::CatalogStore;
use filecat::types::RecordKey;
use filecat::update::ReconcileMode;

#[tokio::test(flavor = "multi_thread")]
async fn test_changed_content_updates_row() {
    let fixture = Fixture::new();
    fixture.write("a.txt", b"hello");
    fixture.write("b.txt", b"stays");
    fixture.update("box", ReconcileMode::Full).await;

    let key = RecordKey::new("box", fixture.catalog_path("a.txt"));
    let before = fixture.store.get(&key).unwrap().unwrap();

    // Same size, different bytes
    modify(&fixture.tree.path().join("a.txt"), b"jello");
    let summary = fixture.update("box", ReconcileMode::Full).await;

    assert_eq!(summary.reconcile.updated, 1);
    assert_eq!(summary.reconcile.unchanged, 1);
    assert_eq!(summary.reconcile.inserted, 0);

    let after = fixture.store.get(&key).unwrap().unwrap();
    assert_ne!(before.secondary_digest, after.secondary_digest);
    assert_eq!(after.secondary_digest, blake3::hash(b"jello").to_hex().to_string());
    assert_eq!(fixture.store.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_added_file_is_inserted_alongside_existing_rows() {
    let fixture = Fixture::new();
    fixture.write("a.txt", b"hello");
    fixture.update("box", ReconcileMode::Full).await;

    fixture.write("nested/new.txt", b"fresh");
    let summary = fixture.update("box", ReconcileMode::Full).await;

    assert_eq!(summary.reconcile.inserted, 1);
    assert_eq!(summary.reconcile.unchanged, 1);
    assert_eq!(fixture.store.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_removed_file_keeps_its_row() {
    let fixture = Fixture::new();
    fixture.write("a.txt", b"hello");
    fixture.write("gone.txt", b"bye");
    fixture.update("box", ReconcileMode::Full).await;

    std::fs::remove_file(fixture.tree.path().join("gone.txt")).unwrap();
    let summary = fixture.update("box", ReconcileMode::Full).await;

    assert_eq!(summary.reconcile.received, 1);
    assert_eq!(fixture.store.len(), 2);
    let key = RecordKey::new("box", fixture.catalog_path("gone.txt"));
    assert!(fixture.store.get(&key).unwrap().is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_full_hash_after_no_hash_fills_digests() {
    let fixture = Fixture::new();
    fixture.write("a.txt", b"hello");

    let mut options = fixture.options("box", ReconcileMode::Full);
    options.walker.no_hash = true;
    fixture.run(options).await;

    let summary = fixture.update("box", ReconcileMode::Full).await;
    assert_eq!(summary.reconcile.updated, 1);

    let key = RecordKey::new("box", fixture.catalog_path("a.txt"));
    let row = fixture.store.get(&key).unwrap().unwrap();
    assert!(!row.is_placeholder());
}
