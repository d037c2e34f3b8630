//! Duplicate scan over catalogs built by update runs

use super::test_utils::Fixture;
use filecat::report::find_duplicates;
use filecat::update::ReconcileMode;

#[tokio::test(flavor = "multi_thread")]
async fn test_duplicate_sets_are_grouped_by_content() {
    let fixture = Fixture::new();
    fixture.write("a1", b"alpha");
    fixture.write("dir/a2", b"alpha");
    fixture.write("dir/deeper/a3", b"alpha");
    fixture.write("b1", b"beta");
    fixture.write("b2", b"beta");
    fixture.write("unique", b"gamma");
    fixture.write("empty1", b"");
    fixture.write("empty2", b"");
    fixture.update("box", ReconcileMode::Full).await;

    let sets = find_duplicates(fixture.store.as_ref(), None).unwrap();
    assert_eq!(sets.len(), 3);

    let alpha = sets
        .iter()
        .find(|set| set.digest == blake3::hash(b"alpha").to_hex().to_string())
        .unwrap();
    assert_eq!(alpha.paths.len(), 3);

    let empty = sets
        .iter()
        .find(|set| set.digest == blake3::hash(b"").to_hex().to_string())
        .unwrap();
    assert_eq!(empty.paths.len(), 2);

    assert!(sets
        .iter()
        .all(|set| !set.paths.contains(&fixture.catalog_path("unique"))));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_same_path_on_two_hosts_is_not_a_duplicate() {
    let fixture = Fixture::new();
    fixture.write("shared.txt", b"same everywhere");
    fixture.update("alpha", ReconcileMode::Full).await;
    fixture.update("beta", ReconcileMode::Full).await;

    assert_eq!(fixture.store.len(), 2);
    assert!(find_duplicates(fixture.store.as_ref(), None).unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_hostname_filter_limits_the_scan() {
    let fixture = Fixture::new();
    fixture.write("x", b"dup");
    fixture.write("y", b"dup");
    fixture.update("alpha", ReconcileMode::Full).await;

    assert_eq!(find_duplicates(fixture.store.as_ref(), Some("alpha")).unwrap().len(), 1);
    assert!(find_duplicates(fixture.store.as_ref(), Some("beta")).unwrap().is_empty());
}
