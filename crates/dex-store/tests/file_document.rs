//! JsonFileDocument Tests
//!
//! Patches written through one handle must be visible after reopening.

use dex_store::{DocumentStore, FieldPath, JsonFileDocument, Patch, StoreError, REVISION_FIELD};
use pretty_assertions::assert_eq;
use serde_json::json;

fn field() -> FieldPath {
    "pokemon".parse().unwrap()
}

#[test]
fn test_missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let doc = JsonFileDocument::open(dir.path().join("post.json")).unwrap();

    assert!(doc.get(&field()).is_none());
    assert!(doc.revision().is_none());
    assert!(!doc.path().exists());
}

#[test]
fn test_set_persists_and_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("post.json");
    std::fs::write(&file, r#"{ "_id": "post-1", "title": "Hello" }"#).unwrap();

    let doc = JsonFileDocument::open(&file).unwrap();
    let rev = doc
        .apply(Patch::set(field(), &json!({ "id": 25, "name": "pikachu" })).unwrap())
        .unwrap();

    let reopened = JsonFileDocument::open(&file).unwrap();
    assert_eq!(reopened.get(&field()), Some(json!({ "id": 25, "name": "pikachu" })));
    assert_eq!(reopened.revision(), Some(rev));
    assert_eq!(reopened.get(&"title".parse().unwrap()), Some(json!("Hello")));

    let on_disk: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&file).unwrap()).unwrap();
    assert_eq!(on_disk["_id"], json!("post-1"));
    assert_eq!(on_disk[REVISION_FIELD], json!(rev.to_string()));
}

#[test]
fn test_unset_removes_field_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("post.json");

    let doc = JsonFileDocument::open(&file).unwrap();
    doc.apply(Patch::set(field(), &json!({ "id": 1 })).unwrap())
        .unwrap();
    doc.apply(Patch::unset(field())).unwrap();

    let reopened = JsonFileDocument::open(&file).unwrap();
    assert!(reopened.get(&field()).is_none());
    assert!(reopened.snapshot().get("pokemon").is_none());
}

#[test]
fn test_non_object_document_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.json");
    std::fs::write(&file, "[1, 2, 3]").unwrap();

    let err = JsonFileDocument::open(&file).unwrap_err();
    assert!(matches!(err, StoreError::InvalidDocument { .. }));
}

#[test]
fn test_corrupt_document_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.json");
    std::fs::write(&file, "{ not json").unwrap();

    let err = JsonFileDocument::open(&file).unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }));
}

#[test]
fn test_failed_patch_does_not_touch_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("post.json");
    std::fs::write(&file, r#"{ "hero": "text" }"#).unwrap();

    let doc = JsonFileDocument::open(&file).unwrap();
    let result = doc.apply(Patch::set("hero.companion".parse().unwrap(), &1).unwrap());
    assert!(matches!(result, Err(StoreError::NotAnObject(_))));

    let raw = std::fs::read_to_string(&file).unwrap();
    assert_eq!(raw, r#"{ "hero": "text" }"#);
}
