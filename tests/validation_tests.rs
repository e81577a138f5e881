//! Property tests for the field validation rules
//!
//! These tests verify that:
//! - Every rule accepts values its pattern describes and rejects the rest
//! - Failures carry the field's fixed message
//! - Basic config validation reports only the failing identifying fields

use fabricgen::ModConfig;
use fabricgen::services::{FieldKind, Validator};
use proptest::prelude::*;

proptest! {
    #[test]
    fn mod_id_accepts_lowercase_ids(id in "[a-z0-9_-]{2,64}") {
        prop_assert!(Validator::new().validate_mod_id(&id).valid);
    }

    #[test]
    fn mod_id_rejects_uppercase(prefix in "[a-z]{1,10}", upper in "[A-Z]", suffix in "[a-z]{0,10}") {
        let id = format!("{prefix}{upper}{suffix}");
        let result = Validator::new().validate_mod_id(&id);
        prop_assert!(!result.valid);
        prop_assert!(result.error.is_some());
    }

    #[test]
    fn mod_id_rejects_overlong(id in "[a-z]{65,80}") {
        prop_assert!(!Validator::new().validate_mod_id(&id).valid);
    }

    #[test]
    fn class_name_accepts_pascal_case(name in "[A-Z][A-Za-z0-9]{2,63}") {
        prop_assert!(Validator::new().validate_class_name(&name).valid);
    }

    #[test]
    fn class_name_rejects_lowercase_start(name in "[a-z0-9][A-Za-z0-9]{2,20}") {
        prop_assert!(!Validator::new().validate_class_name(&name).valid);
    }

    #[test]
    fn package_name_accepts_dotted(first in "[a-z][a-z0-9_]{2,10}", rest in "[a-z][a-z0-9_]{0,10}") {
        let name = format!("{first}.{rest}");
        prop_assert!(Validator::new().validate_package_name(&name).valid);
    }

    #[test]
    fn version_accepts_semver(major in 0u32..100, minor in 0u32..100, patch in 0u32..100) {
        let version = format!("{major}.{minor}.{patch}");
        prop_assert!(Validator::new().validate_version(&version).valid);
        let pre = format!("{version}-beta.1");
        prop_assert!(Validator::new().validate_version(&pre).valid);
    }

    #[test]
    fn version_rejects_two_components(major in 0u32..100, minor in 0u32..100) {
        let version = format!("{major}.{minor}");
        prop_assert!(!Validator::new().validate_version(&version).valid);
    }
}

#[test]
fn test_failure_messages_are_fixed_per_field() {
    let validator = Validator::new();

    let result = validator.validate(FieldKind::ModId, "Bad Id");
    assert_eq!(
        result.error.as_deref(),
        Some("Mod ID must be 2-64 lowercase letters, numbers, hyphens, underscores")
    );

    let result = validator.validate(FieldKind::Version, "1.0");
    assert_eq!(
        result.error.as_deref(),
        Some("Version must be in format X.Y.Z (e.g., 1.0.0)")
    );
}

#[test]
fn test_authors_rule() {
    let validator = Validator::new();
    assert!(validator.validate_authors(&["Alex"]).valid);
    assert!(!validator.validate_authors(&["  ", ""]).valid);
    assert!(!validator.validate_authors::<&str>(&[]).valid);
}

#[test]
fn test_unknown_field_name_uses_class_name_rule() {
    assert_eq!(FieldKind::from_name("somethingElse"), FieldKind::ClassName);
    assert_eq!(FieldKind::from_name("modId"), FieldKind::ModId);
}

#[test]
fn test_basic_config_reports_each_failing_field() {
    let validator = Validator::new();
    assert!(validator.validate_basic_config(&ModConfig::default()).is_empty());

    let config = ModConfig {
        mod_id: "X".to_string(),
        version: "one".to_string(),
        ..ModConfig::default()
    };
    let fields: Vec<FieldKind> = validator
        .validate_basic_config(&config)
        .into_iter()
        .map(|(field, _)| field)
        .collect();
    assert_eq!(fields, vec![FieldKind::ModId, FieldKind::Version]);
}
