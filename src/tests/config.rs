use super::Config;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "exclude_paths = [\"templates/\", \"daily/\"]\nfile_extensions = [\"md\", \"markdown\"]"
    )
    .unwrap();

    let config = Config::load_from(file.path()).unwrap();
    assert_eq!(config.exclude_paths, ["templates/", "daily/"]);
    assert_eq!(config.file_extensions, ["md", "markdown"]);
}

#[test]
fn test_missing_keys_fall_back_to_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "exclude_paths = [\"archive/\"]").unwrap();

    let config = Config::load_from(file.path()).unwrap();
    assert_eq!(config.exclude_paths, ["archive/"]);
    assert_eq!(config.file_extensions, ["md"]);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::load_from(&dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_parse_exclude_paths_trims_and_drops_blanks() {
    let parsed = Config::parse_exclude_paths("templates/\r\n  daily/ \n\n   \narchive");
    assert_eq!(parsed, ["templates/", "daily/", "archive"]);
}

#[test]
fn test_prefix_matching() {
    let config = Config {
        exclude_paths: vec!["templates/".to_string()],
        ..Config::default()
    };

    assert!(config.is_excluded_path("templates/meeting.md"));
    assert!(!config.is_excluded_path("notes/templates/meeting.md"));
    assert!(!Config::default().is_excluded_path("anything.md"));
}
