//! Session orchestration.
//!
//! [`GeneratorController`] owns the registry and drives the [`StateManager`]:
//! form edits with undo/redo, generator selection, batch generation with
//! per-item failure collection, and handing output to the injected sinks.

use crate::metrics::Metrics;
use crate::models::{FieldError, GenerationFailure, ModConfig};
use crate::services::generators::{GeneratedFile, GenerationError, GeneratorKind};
use crate::services::validation::FieldKind;
use crate::services::{
    CacheStats, ClipboardSink, ExportOptions, FileDownloadSink, GeneratorRegistry, ProjectExporter,
};
use crate::state::{StateChange, StateManager};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::sync::Arc;

/// Outcome of a batch over the selected generators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    pub files: Vec<GeneratedFile>,
    pub failures: Vec<GenerationFailure>,
}

impl GenerationReport {
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct GeneratorController {
    state: StateManager,
    registry: GeneratorRegistry,
    exporter: ProjectExporter,
    metrics: Arc<Metrics>,
}

impl GeneratorController {
    pub fn new(state: StateManager, registry: GeneratorRegistry) -> Self {
        let metrics = Arc::clone(registry.metrics());
        Self {
            state,
            registry,
            exporter: ProjectExporter::new(),
            metrics,
        }
    }

    pub fn state(&self) -> &StateManager {
        &self.state
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    pub fn config(&self) -> ModConfig {
        self.state.read(|s| s.config.clone())
    }

    /// Apply one form edit. The previous configuration becomes undoable.
    pub fn set_field(&self, name: &str, value: &str) -> Result<Vec<StateChange>, FieldError> {
        let mut config = self.config();
        config.set_field(name, value)?;
        Ok(self.state.apply_config(config))
    }

    /// Replace the whole configuration, e.g. after loading a profile.
    pub fn load_config(&self, config: ModConfig) -> Vec<StateChange> {
        self.state.apply_config(config)
    }

    pub fn undo(&self) -> Vec<StateChange> {
        self.state.undo()
    }

    pub fn redo(&self) -> Vec<StateChange> {
        self.state.redo()
    }

    pub fn toggle_generator(&self, kind: GeneratorKind) -> Vec<StateChange> {
        self.state.toggle_generator(kind)
    }

    pub fn select_generators(&self, kinds: &[GeneratorKind]) -> Vec<StateChange> {
        self.state.update(|state| {
            state.selected = kinds.iter().copied().collect();
        })
    }

    pub fn select_all(&self) -> Vec<StateChange> {
        self.state.select_all()
    }

    pub fn clear_selection(&self) -> Vec<StateChange> {
        self.state.clear_selection()
    }

    /// Rule violations in the identifying fields of the current configuration.
    pub fn validate_config(&self) -> Vec<(FieldKind, String)> {
        let config = self.config();
        self.registry.validator().validate_basic_config(&config)
    }

    /// Run one generator against the current configuration and keep its files.
    pub fn generate_one(&mut self, kind: GeneratorKind) -> Result<Vec<GeneratedFile>, GenerationError> {
        let config = self.config();
        let files = self.registry.generate(kind, &config)?.into_files();
        self.state.add_files(files.clone());
        Ok(files)
    }

    /// Run every selected generator. A failing generator is recorded and the
    /// rest still run.
    pub fn generate_selected(&mut self) -> GenerationReport {
        let (config, selected) = self
            .state
            .read(|s| (s.config.clone(), s.selected.iter().copied().collect::<Vec<_>>()));

        if selected.is_empty() {
            tracing::warn!("Generate requested with no generators selected");
            return GenerationReport::default();
        }

        tracing::info!("Generating {} artifacts for {}", selected.len(), config.mod_id);
        self.state.start_generation(selected.len());

        let mut report = GenerationReport::default();
        for kind in selected {
            self.state.set_current_generator(Some(kind));
            match self.registry.generate(kind, &config) {
                Ok(generated) => {
                    let files = generated.into_files();
                    tracing::debug!("{} produced {} file(s)", kind, files.len());
                    self.state.add_files(files.clone());
                    report.files.extend(files);
                }
                Err(e) => {
                    tracing::error!("{} failed: {}", kind, e);
                    self.state.record_failure(kind, e.to_string());
                    report.failures.push(GenerationFailure {
                        kind,
                        message: e.to_string(),
                    });
                }
            }
        }

        self.state.finish_generation();
        tracing::info!(
            "Generation finished: {} files, {} failures",
            report.files.len(),
            report.failures.len()
        );
        report
    }

    pub fn generated_files(&self) -> IndexMap<String, GeneratedFile> {
        self.state.read(|s| s.generated_files.clone())
    }

    pub fn clear_output(&self) -> Vec<StateChange> {
        self.state.clear_output()
    }

    /// Copy one generated file's content.
    pub fn copy_file(&self, filename: &str, sink: &mut dyn ClipboardSink) -> Result<()> {
        let content = self
            .state
            .read(|s| s.generated_files.get(filename).map(|f| f.content.clone()))
            .with_context(|| format!("No generated file named {}", filename))?;
        sink.copy(&content)
            .with_context(|| format!("Failed to copy {}", filename))?;
        Ok(())
    }

    /// Write every generated file to `sink` at its target path.
    pub fn download_all(&self, sink: &mut dyn FileDownloadSink) -> Result<usize> {
        let files = self.generated_files();
        if files.is_empty() {
            anyhow::bail!("Nothing to download; generate some files first");
        }
        for file in files.values() {
            sink.download(file.target_path(), &file.content)
                .with_context(|| format!("Failed to download {}", file.target_path()))?;
        }
        self.metrics.record_files_exported(files.len());
        tracing::info!("Downloaded {} files", files.len());
        Ok(files.len())
    }

    /// The project skeleton for the current configuration.
    pub fn export_project(&self, options: &ExportOptions) -> IndexMap<String, String> {
        self.exporter.export(&self.config(), options)
    }

    pub fn export_project_to(
        &self,
        options: &ExportOptions,
        sink: &mut dyn FileDownloadSink,
    ) -> Result<usize> {
        let written = self
            .exporter
            .write_to(&self.config(), options, sink)
            .context("Failed to write project export")?;
        self.metrics.record_files_exported(written);
        Ok(written)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.registry.cache_stats()
    }

    pub fn clear_cache(&mut self) {
        self.registry.cache_mut().clear_all();
        tracing::info!("Cache cleared");
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }
}
