use crate::models::{AppSettings, FieldError, MAX_CACHE_SIZE_MB, ModConfig};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment, File, FileFormat};
use indexmap::IndexMap;
use std::fs;

/// Prefix for environment overrides, e.g. `FABRICGEN__CACHE__MAX_SIZE_MB=10`.
pub const ENV_PREFIX: &str = "FABRICGEN";

/// Configuration manager for the tool's YAML files.
///
/// Manages two files inside the configuration directory:
/// - `settings.yaml`: tool settings ([`AppSettings`]), layered under `FABRICGEN__*` env vars
/// - `defaults.yaml`: the static [`ModConfig`] defaults the form starts from
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
    defaults_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager, creating `config_dir` if it doesn't exist.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join("settings.yaml"),
            defaults_path: config_dir.join("defaults.yaml"),
            config_dir,
        })
    }

    /// Load settings from `settings.yaml` (optional) overlaid with the process environment.
    pub fn load_settings(&self) -> Result<AppSettings> {
        self.load_settings_with(Self::environment())
    }

    /// Like [`load_settings`](Self::load_settings) but reading overrides from
    /// `vars` instead of the process environment.
    pub fn load_settings_from_vars(&self, vars: config::Map<String, String>) -> Result<AppSettings> {
        self.load_settings_with(Self::environment().source(Some(vars)))
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }

    fn load_settings_with(&self, env: Environment) -> Result<AppSettings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
        }

        let settings: AppSettings = Config::builder()
            .add_source(
                File::new(self.settings_path.as_str(), FileFormat::Yaml).required(false),
            )
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        if settings.cache.max_size_mb > MAX_CACHE_SIZE_MB {
            anyhow::bail!(
                "Invalid settings in {}: cache.max_size_mb is {}, the maximum is {}",
                self.settings_path,
                settings.cache.max_size_mb,
                MAX_CACHE_SIZE_MB
            );
        }

        tracing::info!(
            "Loaded settings: cache={}MB ({:?} keys), history_depth={}, debug={}",
            settings.cache.max_size_mb,
            settings.cache.key_strategy,
            settings.history_depth,
            settings.debug_mode
        );
        Ok(settings)
    }

    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Load the static form defaults.
    ///
    /// Falls back to [`ModConfig::default`] when `defaults.yaml` doesn't exist;
    /// fields missing from the file take their built-in defaults.
    pub fn load_defaults(&self) -> Result<ModConfig> {
        if !self.defaults_path.exists() {
            tracing::debug!(
                "Defaults file not found at {}, using built-in defaults",
                self.defaults_path
            );
            return Ok(ModConfig::default());
        }

        let file_contents = fs::read_to_string(&self.defaults_path)
            .with_context(|| format!("Failed to read defaults: {}", self.defaults_path))?;

        let defaults: ModConfig = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse defaults: {}", self.defaults_path))?;

        tracing::info!("Loaded defaults from {}", self.defaults_path);
        Ok(defaults)
    }

    pub fn save_defaults(&self, defaults: &ModConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(defaults).context("Failed to serialize defaults to YAML")?;

        fs::write(&self.defaults_path, yaml_string)
            .with_context(|| format!("Failed to write defaults: {}", self.defaults_path))?;

        tracing::info!("Saved defaults to {}", self.defaults_path);
        Ok(())
    }

    /// Merge raw form input over `defaults`.
    ///
    /// Values are trimmed; blank values keep the default. Field names are the
    /// camelCase names accepted by [`ModConfig::set_field`].
    pub fn merge(
        defaults: &ModConfig,
        input: &IndexMap<String, String>,
    ) -> std::result::Result<ModConfig, FieldError> {
        let mut merged = defaults.clone();
        for (name, value) in input {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            merged.set_field(name, value)?;
        }
        Ok(merged)
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }

    pub fn defaults_path(&self) -> &Utf8Path {
        &self.defaults_path
    }
}
