//! Data models for fabricgen.
//!
//! - [`ModConfig`]: the configuration record every generator reads
//! - [`AppSettings`]: tool settings loaded from `settings.yaml`
//! - [`AppState`]: the session state (selection, output, undo/redo history)
//!
//! Config structs derive `Serialize`/`Deserialize` so the same record feeds
//! YAML defaults, JSON profiles and the generators. [`AppState`] is wrapped in
//! `Arc<RwLock<>>` by [`StateManager`](crate::state::StateManager) and only
//! mutated through its `update()` method.

pub mod app_state;
pub mod config;

pub use app_state::{AppState, ConfigHistory, DEFAULT_HISTORY_DEPTH, GenerationFailure};
pub use config::{
    AppSettings, CacheKeyStrategy, CacheSettings, DEFAULT_MINECRAFT_VERSION, FieldError,
    MAX_CACHE_SIZE_MB, ModConfig,
};
