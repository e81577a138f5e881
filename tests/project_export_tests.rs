//! Integration tests for project export and file downloads
//!
//! These tests write real files through [`DirectorySink`] and verify:
//! - The default project layout lands on disk
//! - Remapped paths are honored and escaping paths are refused
//! - Generated artifacts download to their package directories

use camino::Utf8PathBuf;
use fabricgen::services::{DirectorySink, ExportOptions, GeneratorKind, ProjectExporter, SinkError};
use fabricgen::{GeneratorController, GeneratorRegistry, ModConfig, StateManager};
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn sink() -> (DirectorySink, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (DirectorySink::new(root), temp_dir)
}

fn ruby_config() -> ModConfig {
    ModConfig {
        mod_id: "ruby-mod".to_string(),
        mod_name: "Ruby Mod".to_string(),
        package_name: "net.ruby".to_string(),
        authors: vec!["Alex".to_string()],
        ..ModConfig::default()
    }
}

#[test]
fn test_export_writes_default_layout() {
    let (mut sink, temp_dir) = sink();

    let written = ProjectExporter::new()
        .write_to(&ruby_config(), &ExportOptions::default(), &mut sink)
        .unwrap();
    assert_eq!(written, 7);

    let root = temp_dir.path();
    for path in [
        "build.gradle",
        "gradle.properties",
        ".gitignore",
        "README.md",
        "src/main/java/net/ruby/Mod.java",
        "src/client/java/net/ruby/client/ModClient.java",
    ] {
        assert!(root.join(path).is_file(), "missing {path}");
    }

    let mod_json = fs::read_to_string(root.join("src/main/resources/fabric.mod.json")).unwrap();
    let json: Value = serde_json::from_str(&mod_json).unwrap();
    assert_eq!(json["id"], "ruby-mod");
    assert_eq!(json["authors"][0], "Alex");
}

#[test]
fn test_export_with_map_docs_and_extras() {
    let (mut sink, temp_dir) = sink();
    let mut folder_map = IndexMap::new();
    folder_map.insert("README.md".to_string(), "docs/README.md".to_string());
    let mut extra_files = IndexMap::new();
    extra_files.insert("LICENSE".to_string(), "MIT".to_string());

    let options = ExportOptions {
        folder_map,
        extra_files,
        include_docs: true,
    };
    let written = ProjectExporter::new()
        .write_to(&ruby_config(), &options, &mut sink)
        .unwrap();

    assert_eq!(written, 9);
    assert!(temp_dir.path().join("docs/README.md").is_file());
    assert!(!temp_dir.path().join("README.md").exists());
    assert!(temp_dir.path().join("docs/QUICK_START.md").is_file());
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("LICENSE")).unwrap(),
        "MIT"
    );
}

#[test]
fn test_escaping_path_is_refused() {
    let (mut sink, _temp_dir) = sink();
    let mut folder_map = IndexMap::new();
    folder_map.insert("build.gradle".to_string(), "../build.gradle".to_string());
    let options = ExportOptions {
        folder_map,
        ..ExportOptions::default()
    };

    let err = ProjectExporter::new()
        .write_to(&ruby_config(), &options, &mut sink)
        .unwrap_err();
    assert!(matches!(err, SinkError::UnsafePath(_)));
}

#[test]
fn test_download_generated_files() {
    let (mut sink, temp_dir) = sink();
    let mut controller = GeneratorController::new(StateManager::new(), GeneratorRegistry::default());
    controller.load_config(ruby_config());
    controller.select_generators(&[GeneratorKind::Block, GeneratorKind::Biome]);

    let report = controller.generate_selected();
    assert!(report.is_complete_success());

    let written = controller.download_all(&mut sink).unwrap();
    assert_eq!(written, report.files.len());
    assert_eq!(sink.written().len(), written);

    let root = temp_dir.path();
    assert!(root.join("src/main/java/net/ruby/block/MyExampleEntityBlock.java").is_file());
    assert!(
        root.join("src/main/resources/data/ruby-mod/worldgen/biome/myexampleentity.json")
            .is_file()
    );
}
