//! Services module - the generation pipeline and its collaborators.
//!
//! Everything here is independent of how the tool is driven (command line,
//! tests, benchmarks). Output and persistence go through injected traits.
//!
//! # Components
//!
//! - [`Validator`]: fixed regular-expression rules for the identifying fields
//! - [`generators`]: one [`Generator`] per [`GeneratorKind`], pure template rendering
//! - [`GenerationCache`]: bounded, insertion-ordered memo of generator output
//! - [`GeneratorRegistry`]: kind -> generator table, consulting the cache first
//! - [`ProjectExporter`]: full Gradle/Fabric project skeleton
//! - [`ProfileManager`]: named configuration snapshots over a [`KeyValueStore`]
//! - [`ClipboardSink`] / [`FileDownloadSink`]: where copied and downloaded output goes
//!
//! # Request flow
//!
//! 1. The caller resolves a [`ModConfig`](crate::models::ModConfig) (defaults merged with form input)
//! 2. [`GeneratorRegistry::generate`] rejects kinds with no registered generator
//! 3. A cache hit returns the stored result
//! 4. On a miss the generator validates its fields and renders the template
//! 5. Successful results are stored in the cache and returned

pub mod cache;
pub mod generators;
pub mod profiles;
pub mod project;
pub mod registry;
pub mod sinks;
pub mod validation;

pub use cache::{CacheStats, GenerationCache};
pub use generators::{Generated, GeneratedFile, GenerationError, Generator, GeneratorKind};
pub use profiles::{FileStore, KeyValueStore, MemoryStore, ProfileError, ProfileManager};
pub use project::{ExportOptions, ProjectExporter};
pub use registry::GeneratorRegistry;
pub use sinks::{ClipboardSink, DirectorySink, FileDownloadSink, SinkError, StdoutClipboard};
pub use validation::{FieldKind, ValidationResult, Validator};
