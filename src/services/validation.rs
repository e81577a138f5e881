//! Field validation rules for the configuration record.
//!
//! Each rule is a fixed regular expression, except `authors` which only needs
//! one non-blank entry. Validation never fails loudly: a rule either passes or
//! returns a [`ValidationResult`] carrying the user-facing message.

use regex::Regex;

pub const MOD_ID_PATTERN: &str = r"^[a-z0-9\-_]{2,64}$";
pub const CLASS_NAME_PATTERN: &str = r"^[A-Z][A-Za-z0-9]{2,63}$";
pub const PACKAGE_NAME_PATTERN: &str = r"^[a-z][a-z0-9_.]{2,63}$";
pub const VERSION_PATTERN: &str = r"^[0-9]+\.[0-9]+\.[0-9]+([-.A-Za-z0-9_]*)?$";

/// The kinds of field a rule exists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    ModId,
    ClassName,
    PackageName,
    Version,
    Authors,
}

impl FieldKind {
    /// Resolve a kind by name. Unknown names fall back to the class name rule.
    pub fn from_name(name: &str) -> Self {
        match name {
            "modId" | "mod_id" => Self::ModId,
            "packageName" | "package_name" => Self::PackageName,
            "version" => Self::Version,
            "authors" => Self::Authors,
            _ => Self::ClassName,
        }
    }

    /// Field name as it appears in the configuration record.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::ModId => "modId",
            Self::ClassName => "className",
            Self::PackageName => "packageName",
            Self::Version => "version",
            Self::Authors => "authors",
        }
    }

    /// The literal pattern enforced for this kind, if it has one.
    pub fn pattern(self) -> Option<&'static str> {
        match self {
            Self::ModId => Some(MOD_ID_PATTERN),
            Self::ClassName => Some(CLASS_NAME_PATTERN),
            Self::PackageName => Some(PACKAGE_NAME_PATTERN),
            Self::Version => Some(VERSION_PATTERN),
            Self::Authors => None,
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::ModId => "Mod ID must be 2-64 lowercase letters, numbers, hyphens, underscores",
            Self::ClassName => {
                "Class name must start with uppercase letter, 3-64 alphanumeric characters"
            }
            Self::PackageName => {
                "Package name must be 3-64 chars, lowercase, dot-separated (e.g., com.example.mod)"
            }
            Self::Version => "Version must be in format X.Y.Z (e.g., 1.0.0)",
            Self::Authors => "At least one author required",
        }
    }
}

/// Verdict of a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(message.into()),
        }
    }
}

/// Validator holding the compiled field patterns.
#[derive(Debug, Clone)]
pub struct Validator {
    mod_id: Regex,
    class_name: Regex,
    package_name: Regex,
    version: Regex,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            mod_id: Regex::new(MOD_ID_PATTERN).expect("Invalid mod id regex"),
            class_name: Regex::new(CLASS_NAME_PATTERN).expect("Invalid class name regex"),
            package_name: Regex::new(PACKAGE_NAME_PATTERN).expect("Invalid package regex"),
            version: Regex::new(VERSION_PATTERN).expect("Invalid version regex"),
        }
    }

    /// Check `value` against the rule for `kind`.
    ///
    /// For [`FieldKind::Authors`] the value is the comma-separated form input.
    pub fn validate(&self, kind: FieldKind, value: &str) -> ValidationResult {
        let regex = match kind {
            FieldKind::ModId => &self.mod_id,
            FieldKind::ClassName => &self.class_name,
            FieldKind::PackageName => &self.package_name,
            FieldKind::Version => &self.version,
            FieldKind::Authors => {
                let authors: Vec<&str> = value.split(',').collect();
                return self.validate_authors(&authors);
            }
        };

        if regex.is_match(value) {
            ValidationResult::ok()
        } else {
            ValidationResult::invalid(kind.message())
        }
    }

    /// At least one entry must be non-empty once trimmed.
    pub fn validate_authors<S: AsRef<str>>(&self, authors: &[S]) -> ValidationResult {
        if authors.iter().any(|a| !a.as_ref().trim().is_empty()) {
            ValidationResult::ok()
        } else {
            ValidationResult::invalid(FieldKind::Authors.message())
        }
    }

    pub fn validate_mod_id(&self, mod_id: &str) -> ValidationResult {
        self.validate(FieldKind::ModId, mod_id)
    }

    pub fn validate_class_name(&self, class_name: &str) -> ValidationResult {
        self.validate(FieldKind::ClassName, class_name)
    }

    pub fn validate_package_name(&self, package_name: &str) -> ValidationResult {
        self.validate(FieldKind::PackageName, package_name)
    }

    pub fn validate_version(&self, version: &str) -> ValidationResult {
        self.validate(FieldKind::Version, version)
    }

    /// Run the five basic rules over a whole record.
    ///
    /// Returns the failing fields in form order; empty means the record is valid.
    pub fn validate_basic_config(
        &self,
        config: &crate::models::ModConfig,
    ) -> Vec<(FieldKind, String)> {
        let checks = [
            (FieldKind::ModId, self.validate_mod_id(&config.mod_id)),
            (FieldKind::ClassName, self.validate_class_name(&config.class_name)),
            (FieldKind::PackageName, self.validate_package_name(&config.package_name)),
            (FieldKind::Version, self.validate_version(&config.version)),
            (FieldKind::Authors, self.validate_authors(&config.authors)),
        ];

        checks
            .into_iter()
            .filter_map(|(kind, result)| result.error.map(|e| (kind, e)))
            .collect()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModConfig;

    #[test]
    fn test_mod_id_rule() {
        let v = Validator::new();
        assert!(v.validate_mod_id("valid_mod").valid);
        assert!(v.validate_mod_id("my-mod-2").valid);
        assert!(!v.validate_mod_id("InvalidMod").valid);
        assert!(!v.validate_mod_id("a").valid);
        assert!(!v.validate_mod_id("has space").valid);
        assert!(!v.validate_mod_id("").valid);
        assert!(!v.validate_mod_id(&"a".repeat(65)).valid);
        assert!(v.validate_mod_id(&"a".repeat(64)).valid);
    }

    #[test]
    fn test_class_name_rule() {
        let v = Validator::new();
        assert!(v.validate_class_name("MyClass").valid);
        assert!(!v.validate_class_name("myClass").valid);
        assert!(!v.validate_class_name("A").valid);
        assert!(!v.validate_class_name("My_Class").valid);
    }

    #[test]
    fn test_package_and_version_rules() {
        let v = Validator::new();
        assert!(v.validate_package_name("com.example").valid);
        assert!(!v.validate_package_name("Com.Example").valid);
        assert!(v.validate_version("1.2.3").valid);
        assert!(v.validate_version("1.2.3-beta.1").valid);
        assert!(!v.validate_version("1.2").valid);
    }

    #[test]
    fn test_version_rule_is_ascii_only() {
        let v = Validator::new();
        assert!(!v.validate_version("١.٢.٣").valid);
        assert!(!v.validate_version("1.2.3-béta").valid);
        assert!(!v.validate_version("１.2.3").valid);
        assert!(v.validate_version("1.2.3_rc-2").valid);
    }

    #[test]
    fn test_authors_rule() {
        let v = Validator::new();
        assert!(v.validate_authors(&["Alice"]).valid);
        assert!(!v.validate_authors::<&str>(&[]).valid);
        assert!(!v.validate_authors(&["  ", ""]).valid);
        assert!(v.validate(FieldKind::Authors, "Alice, Bob").valid);
        assert!(!v.validate(FieldKind::Authors, " , ").valid);
    }

    #[test]
    fn test_unknown_kind_falls_back_to_class_name() {
        assert_eq!(FieldKind::from_name("mystery"), FieldKind::ClassName);
        assert_eq!(FieldKind::from_name("modId"), FieldKind::ModId);
    }

    #[test]
    fn test_error_messages_present() {
        let v = Validator::new();
        let result = v.validate_version("1");
        assert_eq!(
            result.error.as_deref(),
            Some("Version must be in format X.Y.Z (e.g., 1.0.0)")
        );
    }

    #[test]
    fn test_validate_basic_config() {
        let v = Validator::new();
        assert!(v.validate_basic_config(&ModConfig::default()).is_empty());

        let config = ModConfig {
            mod_id: "Bad Id".to_string(),
            authors: vec![],
            ..ModConfig::default()
        };
        let failures: Vec<FieldKind> = v
            .validate_basic_config(&config)
            .into_iter()
            .map(|(kind, _)| kind)
            .collect();
        assert_eq!(failures, vec![FieldKind::ModId, FieldKind::Authors]);
    }
}
