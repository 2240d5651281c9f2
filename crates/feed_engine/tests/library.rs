use std::fs;

use feed_core::WorkId;
use feed_engine::Library;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

mod support;

fn library_with(dirs: &[&str]) -> (TempDir, Library) {
    let temp = TempDir::new().unwrap();
    for dir in dirs {
        let path = temp.path().join(dir);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("info.dat"), dir).unwrap();
    }
    let library = Library::new(temp.path());
    (temp, library)
}

#[test]
fn newer_version_replaces_older() {
    support::init_logging();
    let (_temp, library) = library_with(&["song1-1", "song1-2", "song2-1"]);

    let removed = library.reconcile(&WorkId::from("song1-2"));

    assert_eq!(removed, vec!["song1-1".to_string()]);
    assert_eq!(
        library.entry_names().unwrap(),
        vec!["song1-2".to_string(), "song2-1".to_string()]
    );
}

#[test]
fn every_stale_copy_of_a_base_is_removed() {
    let (_temp, library) = library_with(&["7-1", "7-2", "7", "7-3", "70-1", "8-1"]);

    library.reconcile(&WorkId::from("7-3"));

    let names = library.entry_names().unwrap();
    assert_eq!(names, vec!["7-3".to_string(), "70-1".to_string(), "8-1".to_string()]);
    let same_base: Vec<_> = names
        .iter()
        .filter(|name| feed_core::shares_base(name, "7"))
        .collect();
    assert_eq!(same_base.len(), 1);
}

#[test]
fn reconcile_runs_even_when_current_is_absent() {
    let (_temp, library) = library_with(&["song1-1"]);
    let removed = library.reconcile(&WorkId::from("song1-2"));
    assert_eq!(removed, vec!["song1-1".to_string()]);
    assert!(library.entry_names().unwrap().is_empty());
}

#[test]
fn loose_files_are_not_library_entries() {
    let (temp, library) = library_with(&["song1-2"]);
    fs::write(temp.path().join("song1-1"), "not a directory").unwrap();

    assert_eq!(library.entry_names().unwrap(), vec!["song1-2".to_string()]);
    assert!(library.reconcile(&WorkId::from("song1-2")).is_empty());
    assert!(temp.path().join("song1-1").is_file());
}

#[test]
fn missing_root_is_reported_not_panicking() {
    let temp = TempDir::new().unwrap();
    let library = Library::new(temp.path().join("CustomSongs"));
    assert!(library.entry_names().is_err());
    assert!(library.reconcile(&WorkId::from("a-1")).is_empty());

    library.ensure_root().unwrap();
    assert!(library.entry_names().unwrap().is_empty());
    assert!(!library.has_entry(&WorkId::from("a-1")));
}
