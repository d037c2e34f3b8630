//! Quick mode: insert unseen paths only

use super::test_utils::{modify, Fixture};
use filecat::store::CatalogStore;
use filecat::types::RecordKey;
use filecat::update::ReconcileMode;

#[tokio::test(flavor = "multi_thread")]
async fn test_quick_mode_freezes_existing_rows() {
    let fixture = Fixture::new();
    fixture.write("a.txt", b"hello");
    fixture.update("box", ReconcileMode::Full).await;

    let key = RecordKey::new("box", fixture.catalog_path("a.txt"));
    let before = fixture.store.get(&key).unwrap().unwrap();

    modify(&fixture.tree.path().join("a.txt"), b"changed content");
    fixture.write("b.txt", b"new");
    let summary = fixture.update("box", ReconcileMode::Quick).await;

    assert_eq!(summary.reconcile.frozen, 1);
    assert_eq!(summary.reconcile.inserted, 1);
    assert_eq!(summary.reconcile.updated, 0);

    let after = fixture.store.get(&key).unwrap().unwrap();
    assert_eq!(before, after);
    assert_eq!(fixture.store.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_quick_mode_on_empty_catalog_inserts_everything() {
    let fixture = Fixture::new();
    fixture.write("a.txt", b"one");
    fixture.write("b.txt", b"two");

    let summary = fixture.update("box", ReconcileMode::Quick).await;
    assert_eq!(summary.reconcile.inserted, 2);
    assert_eq!(summary.reconcile.frozen, 0);
}
