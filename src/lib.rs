// fabricgen - boilerplate generator for Fabric Minecraft mods
//
// This is the library crate containing the generation pipeline, session state and
// configuration handling. The binary crate (main.rs) provides the command line front end.

pub mod config;
pub mod controller;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use controller::{GenerationReport, GeneratorController};
pub use metrics::Metrics;
pub use models::{AppSettings, AppState, ModConfig};
pub use services::{GenerationError, GeneratorKind, GeneratorRegistry};
pub use state::{StateChange, StateManager};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
