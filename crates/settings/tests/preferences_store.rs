use fsexplorer_editor::FileType;
use fsexplorer_settings::{Preferences, PreferencesStore};
use std::fs;
use tempfile::tempdir;

#[test]
fn load_missing_file_returns_defaults() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("preferences.json");

    let store = PreferencesStore::load(&path).expect("load defaults");
    assert_eq!(
        store.preferences().tree.initial_folders,
        ["public", "server", "src"]
    );
    assert_eq!(store.preferences().editor.default_file_type, FileType::Txt);
    assert!(store.preferences().editor.validate_json_on_save);
    assert!(!path.exists());
}

#[test]
fn save_and_reload_roundtrip() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("nested").join("preferences.json");

    let mut store = PreferencesStore::new(path.clone(), Preferences::default());
    store
        .update(|prefs| {
            prefs.tree.initial_folders = vec!["docs".into(), "assets".into()];
            prefs.editor.default_file_type = FileType::Json;
            prefs.editor.validate_json_on_save = false;
        })
        .expect("save");

    let reloaded = PreferencesStore::load(&path).expect("reload");
    assert_eq!(reloaded.preferences().tree.initial_folders, ["docs", "assets"]);
    assert_eq!(
        reloaded.preferences().editor.default_file_type,
        FileType::Json
    );
    assert!(!reloaded.preferences().editor.validate_json_on_save);
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn sanitize_drops_unusable_and_duplicate_folder_names() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("preferences.json");
    fs::write(
        &path,
        r#"{
            "version": 0,
            "tree": { "initial_folders": ["src", " src ", "", "a/b", "docs"] },
            "editor": { "default_file_type": "png" }
        }"#,
    )
    .expect("write legacy prefs");

    let store = PreferencesStore::load(&path).expect("load legacy file");
    let prefs = store.preferences();
    assert_eq!(prefs.version, 1, "version 0 should be upgraded");
    assert_eq!(prefs.tree.initial_folders, ["src", "docs"]);
    assert_eq!(prefs.editor.default_file_type, FileType::Png);
    assert!(
        prefs.editor.validate_json_on_save,
        "missing flag should fall back to default"
    );
}

#[test]
fn malformed_file_reports_parse_error_with_path() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("preferences.json");
    fs::write(&path, "{ not json").expect("write");

    let err = PreferencesStore::load(&path).unwrap_err();
    assert!(err.to_string().contains("failed to parse preferences"));
    assert!(err.to_string().contains("preferences.json"));
}
