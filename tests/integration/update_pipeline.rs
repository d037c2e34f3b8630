//! End-to-end update runs against a sled catalog

use super::test_utils::Fixture;
use filecat::report::{find_duplicates, search_paths};
use filecat::store::{CatalogStore, SledCatalogStore};
use filecat::types::{EntryKind, RecordKey};
use filecat::update::{ReconcileMode, UpdatePipeline};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread")]
async fn test_first_run_catalogs_every_file() {
    let fixture = Fixture::new();
    fixture.write("a.txt", b"hello");
    fixture.write("b.txt", b"hello");
    fixture.write("sub/c.txt", b"world");

    let summary = fixture.update("box", ReconcileMode::Full).await;
    assert_eq!(summary.reconcile.inserted, 3);
    assert_eq!(summary.reconcile.failed, 0);
    assert_eq!(summary.hashing.hashed, 3);
    assert_eq!(fixture.store.len(), 3);

    let row = fixture
        .store
        .get(&RecordKey::new("box", fixture.catalog_path("sub/c.txt")))
        .unwrap()
        .expect("row for sub/c.txt");
    assert_eq!(row.size, 5);
    assert_eq!(row.kind, EntryKind::File);
    assert_eq!(row.secondary_digest, blake3::hash(b"world").to_hex().to_string());

    let sets = find_duplicates(fixture.store.as_ref(), None).unwrap();
    assert_eq!(sets.len(), 1);
    assert_eq!(
        sets[0].paths,
        vec![fixture.catalog_path("a.txt"), fixture.catalog_path("b.txt")]
    );

    assert_eq!(search_paths(fixture.store.as_ref(), "*.txt").unwrap().len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_second_run_writes_nothing() {
    let fixture = Fixture::new();
    fixture.write("a.txt", b"hello");
    fixture.write("b.txt", b"hello");
    fixture.write("c.txt", b"world");

    fixture.update("box", ReconcileMode::Full).await;
    let second = fixture.update("box", ReconcileMode::Full).await;

    assert_eq!(second.reconcile.received, 3);
    assert_eq!(second.reconcile.unchanged, 3);
    assert_eq!(second.reconcile.writes(), 0);
    assert_eq!(fixture.store.len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_tree_leaves_catalog_empty() {
    let fixture = Fixture::new();
    let summary = fixture.update("box", ReconcileMode::Full).await;
    assert_eq!(summary.reconcile.received, 0);
    assert!(fixture.store.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_many_files_through_small_queues() {
    let fixture = Fixture::new();
    for i in 0..200 {
        fixture.write(&format!("d{}/f{}.bin", i % 7, i), format!("{}", i).as_bytes());
    }

    let mut options = fixture.options("box", ReconcileMode::Full);
    options.workers = 8;
    options.queue_capacity = 1;
    options.conduit_capacity = 1;
    let summary = fixture.run(options).await;

    assert_eq!(summary.walk.dispatched, 200);
    assert_eq!(summary.reconcile.inserted, 200);
    assert_eq!(fixture.store.len(), 200);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_no_hash_records_placeholders() {
    let fixture = Fixture::new();
    fixture.write("a.txt", b"hello");
    fixture.write("b.txt", b"hello");

    let mut options = fixture.options("box", ReconcileMode::Full);
    options.walker.no_hash = true;
    let summary = fixture.run(options).await;

    assert_eq!(summary.hashing.placeholders, 2);
    assert_eq!(summary.reconcile.inserted, 2);
    for record in fixture.store.scan().unwrap() {
        assert!(record.is_placeholder());
        assert_eq!(record.size, 5);
    }
    assert!(find_duplicates(fixture.store.as_ref(), None).unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_root_fails_and_writes_nothing() {
    let fixture = Fixture::new();
    let mut options = fixture.options("box", ReconcileMode::Full);
    options.root = fixture.tree.path().join("does-not-exist");

    let store: Arc<dyn CatalogStore> = fixture.store.clone();
    let result = UpdatePipeline::new(store, options).run().await;
    assert!(result.is_err());
    assert!(fixture.store.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_catalog_survives_reopen() {
    let fixture = Fixture::new();
    fixture.write("a.txt", b"hello");
    fixture.update("box", ReconcileMode::Full).await;

    let db_path = fixture.catalog_dir.path().join("files.db");
    let Fixture { store, .. } = fixture;
    drop(store);

    let reopened = SledCatalogStore::new(&db_path).unwrap();
    assert_eq!(reopened.len(), 1);
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_sockets_are_cataloged_without_digests() {
    let fixture = Fixture::new();
    fixture.write("a.txt", b"hello");
    let _first = std::os::unix::net::UnixListener::bind(fixture.tree.path().join("s1")).unwrap();
    let _second = std::os::unix::net::UnixListener::bind(fixture.tree.path().join("s2")).unwrap();

    let summary = fixture.update("box", ReconcileMode::Full).await;
    assert_eq!(summary.hashing.hashed, 1);
    assert_eq!(summary.hashing.placeholders, 2);
    assert_eq!(fixture.store.len(), 3);

    for name in ["s1", "s2"] {
        let row = fixture
            .store
            .get(&RecordKey::new("box", fixture.catalog_path(name)))
            .unwrap()
            .expect("socket row");
        assert_eq!(row.kind, EntryKind::Socket);
        assert!(row.primary_digest.is_empty());
        assert!(row.secondary_digest.is_empty());
    }

    let sets = find_duplicates(fixture.store.as_ref(), None).unwrap();
    assert!(sets.is_empty());
}
