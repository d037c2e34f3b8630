//! Path search over a populated catalog

use super::test_utils::Fixture;
use filecat::error::StorageError;
use filecat::report::search_paths;
use filecat::update::ReconcileMode;

async fn populated() -> Fixture {
    let fixture = Fixture::new();
    fixture.write("notes.txt", b"n");
    fixture.write("photos/cat.jpg", b"c");
    fixture.write("photos/dog.jpg", b"d");
    fixture.write("photos/readme.txt", b"r");
    fixture.update("box", ReconcileMode::Full).await;
    fixture
}

#[tokio::test(flavor = "multi_thread")]
async fn test_substring_search() {
    let fixture = populated().await;
    let found = search_paths(fixture.store.as_ref(), "photos/").unwrap();
    assert_eq!(found.len(), 3);
    assert!(found.windows(2).all(|w| w[0].path <= w[1].path));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wildcard_search() {
    let fixture = populated().await;

    let jpgs = search_paths(fixture.store.as_ref(), "*.jpg").unwrap();
    assert_eq!(jpgs.len(), 2);

    let percent = search_paths(fixture.store.as_ref(), "%.txt").unwrap();
    assert_eq!(percent.len(), 2);

    let single = search_paths(fixture.store.as_ref(), "*/?at.jpg").unwrap();
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].path, fixture.catalog_path("photos/cat.jpg"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_without_match_is_empty() {
    let fixture = populated().await;
    assert!(search_paths(fixture.store.as_ref(), "*.mp4").unwrap().is_empty());
    assert!(search_paths(fixture.store.as_ref(), "no-such-name").unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_pattern_is_rejected() {
    let fixture = populated().await;
    let result = search_paths(fixture.store.as_ref(), "");
    assert!(matches!(result, Err(StorageError::InvalidPattern { .. })));
}
