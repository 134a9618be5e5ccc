//! Integration tests for loading a snapshot directory.

use camino::Utf8PathBuf;
use embargo_domain::model::{GrantDefect, GroupId, Grantee};
use embargo_domain::source::{ContentSource, GroupDirectory, SourceError};
use embargo_repo::SnapshotRepo;
use embargo_test_util::{sample_groups, sample_item, write_json, write_sample_snapshot};
use embargo_types::Handle;
use serde_json::json;
use tempfile::TempDir;

fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
}

fn open_sample() -> (TempDir, SnapshotRepo) {
    let tmp = TempDir::new().expect("temp dir");
    write_sample_snapshot(tmp.path());
    let repo = SnapshotRepo::open(&utf8_root(&tmp)).expect("open snapshot");
    (tmp, repo)
}

#[test]
fn items_are_sorted_by_handle() {
    let (_tmp, repo) = open_sample();
    let handles: Vec<String> = repo.items().iter().map(|i| i.handle.to_string()).collect();
    assert_eq!(handles, vec!["1794/1", "1794/2", "1794/3"]);
}

#[test]
fn selection_keeps_requested_order_and_rejects_unknown_handles() {
    let (_tmp, repo) = open_sample();
    let picked = repo
        .select(&[Handle::new("hdl:1794/2"), Handle::new("1794/1")])
        .expect("select");
    assert_eq!(picked[0].handle.as_str(), "1794/2");
    assert_eq!(picked[1].handle.as_str(), "1794/1");

    let err = repo
        .select(&[Handle::new("1794/404")])
        .expect_err("unknown handle");
    assert!(err.to_string().contains("1794/404"));
}

#[test]
fn serves_tree_metadata_and_grants() {
    let (_tmp, repo) = open_sample();
    let item = repo.select(&[Handle::new("1794/2")]).expect("select").remove(0);

    assert_eq!(item.name(), "Thesis 2");
    assert_eq!(item.collection.as_ref().map(|h| h.as_str()), Some("1794/100"));
    assert_eq!(
        repo.declared_embargo_value(&item).expect("terms").as_deref(),
        Some("2099-01-01")
    );
    assert_eq!(
        repo.available_date(&item).expect("available").as_deref(),
        Some("2020-01-01")
    );

    let tree = repo.bundle_tree(&item).expect("tree");
    let names: Vec<&str> = tree.iter().map(|b| b.bundle.name.as_str()).collect();
    assert_eq!(names, vec!["LICENSE", "ORIGINAL"]);

    let thesis = &tree[1].bitstreams[0];
    let grants = repo.read_policies(thesis).expect("grants");
    assert_eq!(grants.len(), 2);
    assert_eq!(grants[1].grantee, Grantee::Group(GroupId(0)));
}

#[test]
fn item_body_that_does_not_load_fails_only_that_item() {
    let (_tmp, repo) = open_sample();
    let item = repo.select(&[Handle::new("1794/3")]).expect("select").remove(0);
    assert_eq!(item.name(), "1794/3");

    let err = repo.bundle_tree(&item).expect_err("unloadable body");
    assert!(matches!(err, SourceError::Repository(_)));
    assert!(err.to_string().contains("1794-3.json"), "{err}");
    assert!(repo.read_policies(&item.object).is_err());
    assert!(repo.declared_embargo_value(&item).is_err());

    let other = repo.select(&[Handle::new("1794/1")]).expect("select").remove(0);
    assert!(repo.bundle_tree(&other).is_ok());
}

#[test]
fn groups_resolve_with_members() {
    let (_tmp, repo) = open_sample();
    let library = repo
        .resolve_group(GroupId(3))
        .expect("lookup")
        .expect("library group");
    assert_eq!(library.member_groups, vec![GroupId(2)]);
    assert!(repo.resolve_group(GroupId(42)).expect("lookup").is_none());
}

#[test]
fn accession_date_backs_up_availability() {
    let tmp = TempDir::new().expect("temp dir");
    write_json(tmp.path(), "groups.json", &sample_groups());
    let mut item = sample_item(5, &[]);
    item.as_object_mut().expect("object").remove("date_available");
    item["date_accessioned"] = json!("2015-05-05T10:00:00Z");
    write_json(tmp.path(), "items/5.json", &item);

    let repo = SnapshotRepo::open(&utf8_root(&tmp)).expect("open");
    let item = repo.items().remove(0);
    assert_eq!(
        repo.available_date(&item).expect("available").as_deref(),
        Some("2015-05-05T10:00:00Z")
    );
}

#[test]
fn malformed_snapshots_fail_to_open() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    assert!(SnapshotRepo::open(&root).is_err(), "missing groups.json");

    write_json(tmp.path(), "groups.json", &sample_groups());
    write_json(tmp.path(), "items/a.json", &sample_item(1, &[]));
    write_json(tmp.path(), "items/b.json", &sample_item(1, &[]));
    let err = SnapshotRepo::open(&root).err().expect("duplicate item");
    assert!(format!("{err:#}").contains("duplicate"));

    std::fs::write(root.join("items/b.json"), "{ not json").expect("write");
    assert!(SnapshotRepo::open(&root).is_err());
}

#[test]
fn malformed_grants_are_kept_and_flagged() {
    let tmp = TempDir::new().expect("temp dir");
    write_json(tmp.path(), "groups.json", &sample_groups());
    write_json(
        tmp.path(),
        "items/1.json",
        &sample_item(
            1,
            &[
                json!({ "group": 1 }),
                json!({ "group": 0, "start": "2030-13-45" }),
                json!({ "group": 2, "person": "pat" }),
                json!({ "group": 0, "start": "2024-01-01", "end": "whenever" }),
            ],
        ),
    );
    let repo = SnapshotRepo::open(&utf8_root(&tmp)).expect("open");
    let item = repo.items().remove(0);
    let tree = repo.bundle_tree(&item).expect("tree");
    let grants = repo.read_policies(&tree[1].bitstreams[0]).expect("grants");

    assert_eq!(grants.len(), 4);
    assert_eq!(grants[0].defect, None);
    assert_eq!(
        grants[1].defect,
        Some(GrantDefect::BadDate {
            field: "start",
            raw: "2030-13-45".to_string(),
        })
    );
    assert_eq!(grants[2].grantee, Grantee::Group(GroupId(2)));
    assert_eq!(
        grants[2].defect,
        Some(GrantDefect::PersonAndGroup {
            person: "pat".to_string(),
        })
    );
    assert!(grants[3].start.is_some());
    assert!(matches!(
        grants[3].defect,
        Some(GrantDefect::BadDate { field: "end", .. })
    ));
}
