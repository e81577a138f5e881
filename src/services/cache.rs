//! Bounded memo of generator output.
//!
//! Entries are keyed by generator type plus the identifying fields of the
//! configuration and evicted oldest-inserted first once the byte budget is
//! exceeded. Access order is not tracked.

use crate::models::{CacheKeyStrategy, CacheSettings, ModConfig};
use crate::services::generators::{Generated, GeneratorKind};
use indexmap::IndexMap;
use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Generated,
    size: usize,
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub items: usize,
    pub size_bytes: usize,
    pub hit_rate: String,
}

#[derive(Debug)]
pub struct GenerationCache {
    entries: IndexMap<String, CacheEntry>,
    capacity: usize,
    current_size: usize,
    strategy: CacheKeyStrategy,
    hits: u64,
    misses: u64,
}

impl GenerationCache {
    pub fn new(capacity_bytes: usize) -> Self {
        Self::with_strategy(capacity_bytes, CacheKeyStrategy::Identity)
    }

    pub fn with_strategy(capacity_bytes: usize, strategy: CacheKeyStrategy) -> Self {
        Self {
            entries: IndexMap::new(),
            capacity: capacity_bytes,
            current_size: 0,
            strategy,
            hits: 0,
            misses: 0,
        }
    }

    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self::with_strategy(settings.capacity_bytes(), settings.key_strategy)
    }

    /// Cache key for a request.
    ///
    /// The identity key is `type:className:modId`; two requests that differ
    /// only in other fields share it. The content strategy appends a digest
    /// of the whole record.
    pub fn key_for(&self, kind: GeneratorKind, config: &ModConfig) -> String {
        let identity = format!("{}:{}:{}", kind, config.class_name, config.mod_id);
        match self.strategy {
            CacheKeyStrategy::Identity => identity,
            CacheKeyStrategy::Content => {
                let serialized = serde_json::to_vec(config).unwrap_or_default();
                let digest = Sha256::digest(&serialized);
                let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
                format!("{identity}:{hex}")
            }
        }
    }

    pub fn get(&mut self, kind: GeneratorKind, config: &ModConfig) -> Option<Generated> {
        let key = self.key_for(kind, config);
        match self.entries.get(&key) {
            Some(entry) => {
                self.hits += 1;
                Some(entry.value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a result, evicting oldest entries until it fits.
    ///
    /// Re-setting an existing key releases its old size first and moves it to
    /// the back of the eviction order. A value larger than the whole capacity
    /// is not stored.
    pub fn set(&mut self, kind: GeneratorKind, config: &ModConfig, value: Generated) {
        let key = self.key_for(kind, config);
        let size = serialized_size(&value);

        if let Some(old) = self.entries.shift_remove(&key) {
            self.current_size -= old.size;
        }

        if size > self.capacity {
            tracing::warn!(
                "Cache entry {} is {} bytes, larger than the {} byte capacity; not cached",
                key,
                size,
                self.capacity
            );
            return;
        }

        while self.current_size + size > self.capacity {
            match self.entries.shift_remove_index(0) {
                Some((evicted, entry)) => {
                    self.current_size -= entry.size;
                    tracing::debug!("Evicted cache entry {} ({} bytes)", evicted, entry.size);
                }
                None => break,
            }
        }

        self.current_size += size;
        self.entries.insert(key, CacheEntry { value, size });
    }

    pub fn clear(&mut self, kind: GeneratorKind, config: &ModConfig) {
        let key = self.key_for(kind, config);
        if let Some(entry) = self.entries.shift_remove(&key) {
            self.current_size -= entry.size;
        }
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
        self.current_size = 0;
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_size(&self) -> usize {
        self.current_size
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, kind: GeneratorKind, config: &ModConfig) -> bool {
        self.entries.contains_key(&self.key_for(kind, config))
    }

    pub fn stats(&self) -> CacheStats {
        let total = self.hits + self.misses;
        let hit_rate = if total == 0 {
            "0%".to_string()
        } else {
            format!("{:.2}%", self.hits as f64 / total as f64 * 100.0)
        };
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            items: self.entries.len(),
            size_bytes: self.current_size,
            hit_rate,
        }
    }
}

impl Default for GenerationCache {
    fn default() -> Self {
        Self::from_settings(&CacheSettings::default())
    }
}

fn serialized_size(value: &Generated) -> usize {
    serde_json::to_vec(value).map(|bytes| bytes.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::generators::GeneratedFile;

    fn file_of(len: usize) -> Generated {
        Generated::Single(GeneratedFile {
            filename: "F.java".to_string(),
            content: "x".repeat(len),
            path: None,
        })
    }

    fn config_named(class_name: &str) -> ModConfig {
        ModConfig {
            class_name: class_name.to_string(),
            ..ModConfig::default()
        }
    }

    #[test]
    fn test_identity_key_format() {
        let cache = GenerationCache::new(1024);
        assert_eq!(
            cache.key_for(GeneratorKind::Block, &config_named("RubyBlock")),
            "block:RubyBlock:example-mod"
        );
    }

    #[test]
    fn test_identity_key_ignores_other_fields() {
        let mut cache = GenerationCache::new(10_000);
        let config = config_named("RubyBlock");
        cache.set(GeneratorKind::Block, &config, file_of(10));

        let harder = ModConfig {
            hardness: Some(50.0),
            ..config
        };
        assert!(cache.get(GeneratorKind::Block, &harder).is_some());
    }

    #[test]
    fn test_content_key_separates_fields() {
        let mut cache = GenerationCache::with_strategy(10_000, CacheKeyStrategy::Content);
        let config = config_named("RubyBlock");
        cache.set(GeneratorKind::Block, &config, file_of(10));

        let harder = ModConfig {
            hardness: Some(50.0),
            ..config.clone()
        };
        assert!(cache.get(GeneratorKind::Block, &harder).is_none());
        assert!(cache.get(GeneratorKind::Block, &config).is_some());
    }

    #[test]
    fn test_hits_and_misses() {
        let mut cache = GenerationCache::new(10_000);
        let config = config_named("Foo");

        assert!(cache.get(GeneratorKind::Entity, &config).is_none());
        cache.set(GeneratorKind::Entity, &config, file_of(5));
        assert!(cache.get(GeneratorKind::Entity, &config).is_some());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.items, 1);
        assert_eq!(stats.hit_rate, "50.00%");
    }

    #[test]
    fn test_hit_rate_with_no_requests() {
        assert_eq!(GenerationCache::new(100).stats().hit_rate, "0%");
    }

    #[test]
    fn test_evicts_oldest_inserted_first() {
        let entry_size = serialized_size(&file_of(100));
        let mut cache = GenerationCache::new(entry_size * 2);

        cache.set(GeneratorKind::Item, &config_named("First"), file_of(100));
        cache.set(GeneratorKind::Item, &config_named("Second"), file_of(100));
        // Reading does not refresh position.
        cache.get(GeneratorKind::Item, &config_named("First"));
        cache.set(GeneratorKind::Item, &config_named("Third"), file_of(100));

        assert!(!cache.contains(GeneratorKind::Item, &config_named("First")));
        assert!(cache.contains(GeneratorKind::Item, &config_named("Second")));
        assert!(cache.contains(GeneratorKind::Item, &config_named("Third")));
        assert!(cache.current_size() <= cache.capacity());
    }

    #[test]
    fn test_reset_replaces_size() {
        let mut cache = GenerationCache::new(10_000);
        let config = config_named("Foo");
        cache.set(GeneratorKind::Item, &config, file_of(100));
        cache.set(GeneratorKind::Item, &config, file_of(10));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.current_size(), serialized_size(&file_of(10)));
    }

    #[test]
    fn test_oversized_entry_not_stored() {
        let mut cache = GenerationCache::new(50);
        cache.set(GeneratorKind::Item, &config_named("Big"), file_of(500));
        assert!(cache.is_empty());
        assert_eq!(cache.current_size(), 0);
    }

    #[test]
    fn test_clear_and_clear_all() {
        let mut cache = GenerationCache::new(10_000);
        cache.set(GeneratorKind::Item, &config_named("A"), file_of(10));
        cache.set(GeneratorKind::Item, &config_named("B"), file_of(10));

        cache.clear(GeneratorKind::Item, &config_named("A"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.current_size(), serialized_size(&file_of(10)));

        cache.get(GeneratorKind::Item, &config_named("B"));
        cache.clear_all();
        let stats = cache.stats();
        assert_eq!(stats.items, 0);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.size_bytes, 0);
    }
}
