//! Integration tests for configuration loading and form merging
//!
//! These tests verify:
//! - settings.yaml parsing, including partial files
//! - defaults.yaml overriding the built-in form defaults
//! - Merging raw form input over defaults

use camino::Utf8PathBuf;
use fabricgen::models::{AppSettings, CacheKeyStrategy, FieldError};
use fabricgen::{ConfigManager, ModConfig};
use indexmap::IndexMap;
use std::fs;
use tempfile::TempDir;

fn manager() -> (ConfigManager, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (ConfigManager::new(&path).unwrap(), temp_dir)
}

#[test]
fn test_partial_settings_file_fills_defaults() {
    let (manager, _temp_dir) = manager();
    fs::write(
        manager.settings_path(),
        "cache:\n  key_strategy: content\nhistory_depth: 10\n",
    )
    .unwrap();

    let settings = manager.load_settings_from_vars(config::Map::new()).unwrap();
    assert_eq!(settings.cache.key_strategy, CacheKeyStrategy::Content);
    assert_eq!(settings.cache.max_size_mb, AppSettings::default().cache.max_size_mb);
    assert_eq!(settings.history_depth, 10);
    assert_eq!(settings.profile_dir, "profiles");
}

#[test]
fn test_malformed_settings_is_an_error() {
    let (manager, _temp_dir) = manager();
    fs::write(manager.settings_path(), "history_depth: [not, a, number]\n").unwrap();

    assert!(manager.load_settings_from_vars(config::Map::new()).is_err());
}

#[test]
fn test_defaults_file_overrides_builtins() {
    let (manager, _temp_dir) = manager();
    fs::write(
        manager.defaults_path(),
        "modId: ruby-mod\nclassName: RubyGolem\n",
    )
    .unwrap();

    let defaults = manager.load_defaults().unwrap();
    assert_eq!(defaults.mod_id, "ruby-mod");
    assert_eq!(defaults.class_name, "RubyGolem");
    // Untouched fields keep their built-in values.
    assert_eq!(defaults.version, "1.0.0");
}

#[test]
fn test_defaults_roundtrip_through_yaml() {
    let (manager, _temp_dir) = manager();
    let defaults = ModConfig {
        mod_id: "gems".to_string(),
        authors: vec!["Alex".to_string(), "Sam".to_string()],
        cooking_time: None,
        ..ModConfig::default()
    };
    manager.save_defaults(&defaults).unwrap();

    assert_eq!(manager.load_defaults().unwrap(), defaults);
}

#[test]
fn test_merge_form_input() {
    let mut input = IndexMap::new();
    input.insert("modId".to_string(), "gems".to_string());
    input.insert("authors".to_string(), "Alex, Sam,".to_string());
    input.insert("clientSideOnly".to_string(), "yes".to_string());
    input.insert("experience".to_string(), "".to_string());

    let merged = ConfigManager::merge(&ModConfig::default(), &input).unwrap();
    assert_eq!(merged.mod_id, "gems");
    assert_eq!(merged.authors, vec!["Alex", "Sam"]);
    assert!(merged.client_side_only);
    assert_eq!(merged.experience, Some(0.7));
}

#[test]
fn test_merge_unknown_field() {
    let mut input = IndexMap::new();
    input.insert("colour".to_string(), "red".to_string());

    assert_eq!(
        ConfigManager::merge(&ModConfig::default(), &input),
        Err(FieldError::UnknownField("colour".to_string()))
    );
}
