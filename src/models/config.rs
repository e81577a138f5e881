use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minecraft version selected when the user has not picked one.
pub const DEFAULT_MINECRAFT_VERSION: &str = "1.21.10";

/// The configuration record every generator reads.
///
/// Field names serialize in camelCase so saved profiles and `defaults.yaml`
/// use the same names the form does (`modId`, `className`, `recipeType`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModConfig {
    pub mod_id: String,
    pub mod_name: String,
    pub package_name: String,
    pub class_name: String,
    pub version: String,
    pub authors: Vec<String>,
    pub description: String,
    pub client_side_only: bool,
    pub minecraft_version: String,

    // Block
    pub hardness: Option<f64>,
    pub sound: Option<String>,

    // Model
    pub model_type: Option<String>,

    // Recipe
    pub recipe_type: Option<String>,
    pub output_item: Option<String>,
    pub output_count: Option<u32>,
    pub ingredients: Option<String>,
    pub pattern: Option<String>,
    pub cooking_time: Option<u32>,
    pub experience: Option<f64>,

    // Event
    pub event_type: Option<String>,
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            mod_id: "example-mod".to_string(),
            mod_name: "Example Mod".to_string(),
            package_name: "com.example".to_string(),
            class_name: "MyExampleEntity".to_string(),
            version: "1.0.0".to_string(),
            authors: vec!["Your Name".to_string()],
            description: "A Fabric mod".to_string(),
            client_side_only: false,
            minecraft_version: DEFAULT_MINECRAFT_VERSION.to_string(),
            hardness: Some(5.0),
            sound: Some("STONE".to_string()),
            model_type: Some("humanoid".to_string()),
            recipe_type: Some("crafting_shaped".to_string()),
            output_item: Some("examplemod:example_item".to_string()),
            output_count: Some(1),
            ingredients: Some("A: minecraft:iron_ingot\nB: minecraft:stick".to_string()),
            pattern: Some("AAA\n B \n B ".to_string()),
            cooking_time: Some(200),
            experience: Some(0.7),
            event_type: Some("server_tick".to_string()),
        }
    }
}

/// Errors raised while writing a single form field into a [`ModConfig`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("Unknown configuration field: {0}")]
    UnknownField(String),

    #[error("Field {field} expects a number, got \"{value}\"")]
    InvalidNumber { field: String, value: String },

    #[error("Field {field} expects true/false, got \"{value}\"")]
    InvalidBool { field: String, value: String },
}

impl ModConfig {
    /// Names accepted by [`set_field`](Self::set_field), in form order.
    pub const FIELD_NAMES: &'static [&'static str] = &[
        "modId",
        "modName",
        "packageName",
        "className",
        "version",
        "authors",
        "description",
        "clientSideOnly",
        "minecraftVersion",
        "hardness",
        "sound",
        "modelType",
        "recipeType",
        "outputItem",
        "outputCount",
        "ingredients",
        "pattern",
        "cookingTime",
        "experience",
        "eventType",
    ];

    /// Write one form field by its camelCase name.
    ///
    /// Numbers and booleans are parsed; `authors` is split on commas.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        match name {
            "modId" => self.mod_id = value.to_string(),
            "modName" => self.mod_name = value.to_string(),
            "packageName" => self.package_name = value.to_string(),
            "className" => self.class_name = value.to_string(),
            "version" => self.version = value.to_string(),
            "authors" => self.authors = split_authors(value),
            "description" => self.description = value.to_string(),
            "clientSideOnly" => self.client_side_only = parse_bool(name, value)?,
            "minecraftVersion" => self.minecraft_version = value.to_string(),
            "hardness" => self.hardness = Some(parse_number(name, value)?),
            "sound" => self.sound = Some(value.to_string()),
            "modelType" => self.model_type = Some(value.to_string()),
            "recipeType" => self.recipe_type = Some(value.to_string()),
            "outputItem" => self.output_item = Some(value.to_string()),
            "outputCount" => self.output_count = Some(parse_number(name, value)?),
            "ingredients" => self.ingredients = Some(value.to_string()),
            "pattern" => self.pattern = Some(value.to_string()),
            "cookingTime" => self.cooking_time = Some(parse_number(name, value)?),
            "experience" => self.experience = Some(parse_number(name, value)?),
            "eventType" => self.event_type = Some(value.to_string()),
            _ => return Err(FieldError::UnknownField(name.to_string())),
        }
        Ok(())
    }

    /// Authors with surrounding whitespace removed and blanks dropped.
    pub fn author_list(&self) -> Vec<String> {
        self.authors
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn split_authors(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, FieldError> {
    value.trim().parse().map_err(|_| FieldError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(field: &str, value: &str) -> Result<bool, FieldError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(FieldError::InvalidBool {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

/// How the generation cache derives its keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKeyStrategy {
    /// `type:className:modId`. Requests differing only in other fields share an entry.
    #[default]
    Identity,
    /// Identity key plus a digest of the whole configuration record.
    Content,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_size_mb")]
    pub max_size_mb: usize,

    #[serde(default)]
    pub key_strategy: CacheKeyStrategy,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_size_mb: default_cache_size_mb(),
            key_strategy: CacheKeyStrategy::Identity,
        }
    }
}

/// Largest cache budget accepted from settings.
pub const MAX_CACHE_SIZE_MB: usize = 4096;

impl CacheSettings {
    /// Budget in bytes. Saturates instead of overflowing.
    pub fn capacity_bytes(&self) -> usize {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }
}

/// Application settings from settings.yaml (overridable via `FABRICGEN__*` env vars).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default = "default_history_depth")]
    pub history_depth: usize,

    #[serde(default)]
    pub debug_mode: bool,

    #[serde(default = "default_profile_dir")]
    pub profile_dir: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            cache: CacheSettings::default(),
            history_depth: default_history_depth(),
            debug_mode: false,
            profile_dir: default_profile_dir(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_cache_size_mb() -> usize {
    50
}

fn default_history_depth() -> usize {
    50
}

fn default_profile_dir() -> String {
    "profiles".to_string()
}

fn default_output_dir() -> String {
    "generated".to_string()
}
