//! Loading project files from disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use rpptree::domain::ParseOptions;
use rpptree::infrastructure::{DocumentLoader, InfraError, RealFileSystem};
use rpptree::util::testing;

fn loader() -> DocumentLoader {
    testing::init_test_setup();
    DocumentLoader::new(Arc::new(RealFileSystem), ParseOptions::default())
}

#[test]
fn given_fixture_when_loaded_then_provenance_points_at_project_directory() {
    let doc = loader()
        .load(Path::new("tests/resources/projects/song/song.rpp"))
        .unwrap();
    let dir = doc.directory().unwrap();
    assert!(dir.is_absolute());
    assert!(dir.ends_with("song"));
    assert!(doc.path().unwrap().ends_with("song/song.rpp"));
}

#[cfg(unix)]
#[test]
fn given_fixture_when_media_references_then_relative_paths_resolve_next_to_project() {
    let doc = loader()
        .load(Path::new("tests/resources/projects/song/song.rpp"))
        .unwrap();
    let refs = doc.media_references();
    assert_eq!(refs.len(), 3);

    let kick = &refs[0];
    assert_eq!(kick.track.as_deref(), Some("Drums"));
    assert_eq!(kick.item.as_deref(), Some("Kick"));
    assert!(kick.resolved.is_file(), "kick.wav ships with the fixture");

    let snare = &refs[1];
    assert_eq!(snare.file, "Audio/snare.wav");
    assert!(snare.resolved.ends_with("song/Audio/snare.wav"));
    assert!(!snare.resolved.exists());

    assert_eq!(refs[2].resolved, Path::new("/opt/samples/wind.wav"));
}

#[test]
fn given_missing_file_when_loaded_then_io_error_names_path() {
    let err = loader()
        .load(Path::new("tests/resources/projects/missing.rpp"))
        .unwrap_err();
    assert!(matches!(err, InfraError::Io { .. }));
    assert!(err.to_string().contains("missing.rpp"));
}

#[test]
fn given_directory_when_loaded_then_io_error() {
    let err = loader()
        .load(Path::new("tests/resources/projects"))
        .unwrap_err();
    assert!(matches!(err, InfraError::Io { .. }));
}

#[test]
fn given_file_without_blocks_when_loaded_then_application_error() {
    let err = loader()
        .load(Path::new("tests/resources/projects/no_blocks.rpp"))
        .unwrap_err();
    assert!(matches!(err, InfraError::Application(_)));
}

#[test]
fn given_unbalanced_file_when_loaded_then_innermost_block_is_root() {
    let doc = loader()
        .load(Path::new("tests/resources/projects/unbalanced.rpp"))
        .unwrap();
    assert_eq!(doc.root().node_type(), "ITEM");
    assert_eq!(doc.root().name(), Some("Dangling"));
    assert_eq!(doc.stats().final_depth, 3);
}

#[test]
fn given_crlf_file_when_loaded_then_values_have_no_carriage_returns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("win.rpp");
    fs::write(&path, "<REAPER_PROJECT\r\n  NAME \"Win\"\r\n  TEMPO 90 4 4\r\n>\r\n").unwrap();

    let doc = loader().load(&path).unwrap();
    assert_eq!(doc.root().name(), Some("Win"));
    assert_eq!(doc.first_child_of_type("TEMPO").unwrap().values(), ["90", "4", "4"]);
    assert!(doc.stats().is_balanced());
}

#[test]
fn given_several_files_when_load_all_then_each_parsed_independently() {
    let paths = [
        "tests/resources/projects/song/song.rpp",
        "tests/resources/projects/unbalanced.rpp",
        "tests/resources/projects/no_blocks.rpp",
    ];
    let results = loader().load_all(&paths);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(results[2].is_err());
}
