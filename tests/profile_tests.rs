//! Integration tests for profiles persisted in a directory
//!
//! These tests verify that the file-backed store:
//! - Round-trips complete configuration records
//! - Lists only profile entries, sorted by name
//! - Reports a missing directory as an unavailable store

use camino::Utf8PathBuf;
use fabricgen::ModConfig;
use fabricgen::services::{FileStore, KeyValueStore, ProfileError, ProfileManager};
use std::fs;
use tempfile::TempDir;

fn file_manager() -> (ProfileManager<FileStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (ProfileManager::new(FileStore::new(dir)), temp_dir)
}

#[test]
fn test_save_load_roundtrip() {
    let (mut profiles, temp_dir) = file_manager();
    let config = ModConfig {
        mod_id: "gems".to_string(),
        recipe_type: Some("blasting".to_string()),
        event_type: None,
        ..ModConfig::default()
    };

    profiles.save("ruby", &config).unwrap();
    assert!(temp_dir.path().join("fabric_profile_ruby.json").exists());
    assert_eq!(profiles.load("ruby").unwrap(), Some(config));
}

#[test]
fn test_load_missing_profile() {
    let (profiles, _temp_dir) = file_manager();
    assert_eq!(profiles.load("nothing").unwrap(), None);
}

#[test]
fn test_list_ignores_foreign_files() {
    let (mut profiles, temp_dir) = file_manager();
    profiles.save("zeta", &ModConfig::default()).unwrap();
    profiles.save("alpha", &ModConfig::default()).unwrap();
    fs::write(temp_dir.path().join("notes.json"), "{}").unwrap();
    fs::write(temp_dir.path().join("README.txt"), "hi").unwrap();

    assert_eq!(profiles.list_all().unwrap(), vec!["alpha", "zeta"]);
}

#[test]
fn test_delete_profile() {
    let (mut profiles, _temp_dir) = file_manager();
    profiles.save("ruby", &ModConfig::default()).unwrap();

    profiles.delete("ruby").unwrap();
    assert_eq!(profiles.load("ruby").unwrap(), None);
    // Deleting again is not an error.
    profiles.delete("ruby").unwrap();
}

#[test]
fn test_corrupt_profile_reports_serialization_error() {
    let (profiles, temp_dir) = file_manager();
    fs::write(temp_dir.path().join("fabric_profile_bad.json"), "not json").unwrap();

    assert!(matches!(
        profiles.load("bad"),
        Err(ProfileError::Serialization { .. })
    ));
}

#[test]
fn test_nested_name_is_invalid_not_unavailable() {
    let (mut profiles, temp_dir) = file_manager();

    assert!(matches!(
        profiles.save("team/alpha", &ModConfig::default()),
        Err(ProfileError::InvalidName(_))
    ));
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_directory_is_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().join("gone")).unwrap();
    let mut profiles = ProfileManager::new(FileStore::new(dir));

    assert!(matches!(
        profiles.save("ruby", &ModConfig::default()),
        Err(ProfileError::StoreUnavailable(_))
    ));
    assert!(matches!(
        profiles.list_all(),
        Err(ProfileError::StoreUnavailable(_))
    ));
    assert!(!profiles.store().dir().exists());
    assert!(profiles.store().keys().is_err());
}
