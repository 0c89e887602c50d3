use serde_json::json;
use star_core::hashing::hash_value;
use star_core::model::archive_name;
use star_core::{typed_artifact, ArtifactKind, ArtifactSpec, ArtifactStore, CoreError};
use star_persistence::{FsArtifactStore, StoreConfig};
use tempfile::tempdir;
use uuid::Uuid;

typed_artifact!(Label { text: String } kind: ArtifactKind::Substrate);

fn label(text: &str) -> star_core::Artifact {
    Label { text: text.into(),
            schema_version: 1 }.into_artifact()
                               .unwrap()
}

#[test]
fn create_then_resolve_from_disk() {
    let dir = tempdir().unwrap();
    let mut store = FsArtifactStore::open(dir.path(), None).unwrap();
    let name = archive_name("run_sub", ArtifactKind::Substrate);
    assert!(!store.exists(&name));

    let reference = store.create(&name, label("SLG")).unwrap();
    assert!(store.exists(&name));
    assert!(dir.path().join(&name).is_file());
    assert_eq!(reference, store.reference_for(&name));

    let raw = store.resolve(&reference).unwrap();
    assert_eq!(raw.payload, json!({"text": "SLG", "schema_version": 1}));
    assert_eq!(raw.hash, hash_value(&raw.payload));
    assert_eq!(store.names().unwrap(), vec![name]);
}

#[test]
fn duplicate_names_are_rejected() {
    let dir = tempdir().unwrap();
    let mut store = FsArtifactStore::open(dir.path(), None).unwrap();
    store.create("a.substrate.archive.json", label("x")).unwrap();
    let err = store.create("a.substrate.archive.json", label("y")).unwrap_err();
    assert_eq!(err, CoreError::DuplicateArtifact("a.substrate.archive.json".into()));
}

#[test]
fn upload_id_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let mut first = FsArtifactStore::open(dir.path(), None).unwrap();
    let reference = first.create("s.substrate.archive.json", label("x")).unwrap();

    let reopened = FsArtifactStore::open(dir.path(), None).unwrap();
    assert_eq!(reopened.upload_id(), first.upload_id());
    assert!(reopened.resolve(&reference).is_ok());
}

#[test]
fn references_from_other_uploads_do_not_resolve() {
    let dir = tempdir().unwrap();
    let mut store = FsArtifactStore::open(dir.path(), Some(Uuid::new_v4())).unwrap();
    store.create("s.substrate.archive.json", label("x")).unwrap();
    let foreign = star_core::ArtifactRef::for_entry(Uuid::new_v4(), "s.substrate.archive.json");
    assert!(matches!(store.resolve(&foreign), Err(CoreError::NotFound(_))));
    let missing = store.reference_for("ghost.substrate.archive.json");
    assert!(matches!(store.resolve(&missing), Err(CoreError::NotFound(_))));
}

#[test]
fn names_escaping_the_root_are_refused() {
    let dir = tempdir().unwrap();
    let mut store = FsArtifactStore::open(dir.path(), None).unwrap();
    for bad in ["../x.archive.json", "sub/x.archive.json", ".upload_id", ""] {
        assert!(!store.exists(bad));
        assert!(matches!(store.create(bad, label("x")), Err(CoreError::Storage(_))));
    }
}

#[test]
fn opens_from_config() {
    let dir = tempdir().unwrap();
    let id = Uuid::new_v4();
    let cfg = StoreConfig::from_values(Some(dir.path().join("nested").to_string_lossy().into_owned()),
                                       Some(id.to_string())).unwrap();
    let store = FsArtifactStore::from_config(&cfg).unwrap();
    assert_eq!(store.upload_id(), id);
    assert!(store.root().is_dir());
}
