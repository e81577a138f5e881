use crate::metrics::Metrics;
use crate::models::{CacheSettings, ModConfig};
use crate::services::cache::{CacheStats, GenerationCache};
use crate::services::generators::{
    BiomeGenerator, BlockGenerator, CommandGenerator, ConfigGenerator, EntityGenerator,
    EventGenerator, Generated, GenerationError, Generator, GeneratorKind, ItemGenerator,
    MixinGenerator, ModelGenerator, OverlayGenerator, RecipeGenerator, RendererGenerator,
    ScreenGenerator,
};
use crate::services::validation::Validator;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Enum-keyed table of generators with the generation cache in front.
///
/// A request is served from the cache when its key is present; otherwise the
/// generator for the kind runs and a successful result is stored. Failed
/// requests, including ones for kinds with no registered generator, never
/// touch the cache.
pub struct GeneratorRegistry {
    generators: HashMap<GeneratorKind, Box<dyn Generator>>,
    cache: GenerationCache,
    validator: Validator,
    metrics: Arc<Metrics>,
}

impl GeneratorRegistry {
    /// An empty registry. Nothing can be generated until [`register`](Self::register) is called.
    pub fn new(cache: GenerationCache) -> Self {
        Self {
            generators: HashMap::new(),
            cache,
            validator: Validator::new(),
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// A registry holding every built-in generator.
    pub fn with_defaults(settings: &CacheSettings) -> Self {
        let mut registry = Self::new(GenerationCache::from_settings(settings));
        let builtins: Vec<Box<dyn Generator>> = vec![
            Box::new(EntityGenerator),
            Box::new(BlockGenerator),
            Box::new(ItemGenerator),
            Box::new(CommandGenerator),
            Box::new(RendererGenerator),
            Box::new(ScreenGenerator),
            Box::new(OverlayGenerator),
            Box::new(ConfigGenerator),
            Box::new(MixinGenerator),
            Box::new(RecipeGenerator),
            Box::new(EventGenerator),
            Box::new(BiomeGenerator),
            Box::new(ModelGenerator),
        ];
        for generator in builtins {
            registry.register(generator.kind(), generator);
        }
        tracing::info!("Registered {} generators", registry.generators.len());
        registry
    }

    /// Share a metrics instance with the rest of the session.
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Add `generator` under `kind`. Re-registering a kind replaces the previous entry.
    pub fn register(&mut self, kind: GeneratorKind, generator: Box<dyn Generator>) {
        if self.generators.insert(kind, generator).is_some() {
            tracing::debug!("Replaced generator for {}", kind);
        } else {
            tracing::debug!("Registered generator for {}", kind);
        }
    }

    pub fn is_registered(&self, kind: GeneratorKind) -> bool {
        self.generators.contains_key(&kind)
    }

    /// Registered kinds in declaration order.
    pub fn kinds(&self) -> Vec<GeneratorKind> {
        GeneratorKind::ALL
            .into_iter()
            .filter(|kind| self.generators.contains_key(kind))
            .collect()
    }

    pub fn generate(
        &mut self,
        kind: GeneratorKind,
        config: &ModConfig,
    ) -> Result<Generated, GenerationError> {
        let Some(generator) = self.generators.get(&kind) else {
            tracing::error!("No generator registered for {}", kind);
            self.metrics.record_generation_failed();
            return Err(GenerationError::unsupported("generator type", Some(kind.as_str())));
        };

        if let Some(cached) = self.cache.get(kind, config) {
            tracing::debug!("Cache HIT: {}", kind);
            self.metrics.record_cache_hit();
            return Ok(cached);
        }
        tracing::debug!("Cache MISS: {}", kind);
        self.metrics.record_cache_miss();

        let start = Instant::now();
        match generator.generate(config, &self.validator) {
            Ok(generated) => {
                self.metrics.record_generation_succeeded(start.elapsed());
                self.cache.set(kind, config, generated.clone());
                Ok(generated)
            }
            Err(e) => {
                tracing::warn!("Generation failed for {}: {}", kind, e);
                self.metrics.record_generation_failed();
                Err(e)
            }
        }
    }

    /// Generate by type name, as received from a form or the command line.
    pub fn generate_named(
        &mut self,
        kind: &str,
        config: &ModConfig,
    ) -> Result<Generated, GenerationError> {
        let kind = kind.parse::<GeneratorKind>().inspect_err(|_| {
            tracing::error!("Unknown generator type: {}", kind);
            self.metrics.record_generation_failed();
        })?;
        self.generate(kind, config)
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn cache(&self) -> &GenerationCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut GenerationCache {
        &mut self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::with_defaults(&CacheSettings::default())
    }
}
