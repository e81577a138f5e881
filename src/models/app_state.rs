use crate::models::ModConfig;
use crate::services::generators::{GeneratedFile, GeneratorKind};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::collections::VecDeque;

/// Default bound for each of the undo and redo stacks.
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// One generator that failed during a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerationFailure {
    pub kind: GeneratorKind,
    pub message: String,
}

/// Undo/redo stacks of immutable configuration snapshots.
///
/// Both stacks are bounded; the oldest snapshot is dropped once `depth` is
/// reached. Recording a new snapshot clears the redo stack.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigHistory {
    undo: VecDeque<ModConfig>,
    redo: VecDeque<ModConfig>,
    depth: usize,
}

impl ConfigHistory {
    pub fn with_depth(depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            depth,
        }
    }

    /// Push the configuration as it was before an edit.
    pub fn record(&mut self, previous: ModConfig) {
        push_bounded(&mut self.undo, previous, self.depth);
        self.redo.clear();
    }

    /// Step back: returns the snapshot to restore, saving `current` for redo.
    pub fn undo(&mut self, current: ModConfig) -> Option<ModConfig> {
        let previous = self.undo.pop_back()?;
        push_bounded(&mut self.redo, current, self.depth);
        Some(previous)
    }

    pub fn redo(&mut self, current: ModConfig) -> Option<ModConfig> {
        let next = self.redo.pop_back()?;
        push_bounded(&mut self.undo, current, self.depth);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

impl Default for ConfigHistory {
    fn default() -> Self {
        Self::with_depth(DEFAULT_HISTORY_DEPTH)
    }
}

fn push_bounded(stack: &mut VecDeque<ModConfig>, config: ModConfig, depth: usize) {
    if depth == 0 {
        return;
    }
    if stack.len() == depth {
        stack.pop_front();
    }
    stack.push_back(config);
}

/// Single source of truth for a generation session.
///
/// `AppState` is wrapped in `Arc<RwLock<AppState>>` by [`crate::state::StateManager`].
/// Mutate it only through [`update()`](crate::state::StateManager::update) so
/// change events are emitted.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Current form values
    pub config: ModConfig,

    /// Generators picked for the next batch, in selection order
    pub selected: IndexSet<GeneratorKind>,

    /// Generated output keyed by filename, in generation order
    pub generated_files: IndexMap<String, GeneratedFile>,

    /// Failures from the most recent batch
    pub failures: Vec<GenerationFailure>,

    pub history: ConfigHistory,

    // Runtime state
    pub is_generating: bool,
    pub batch_total: usize,
    pub current_generator: Option<GeneratorKind>,
}

impl AppState {
    pub fn with_history_depth(depth: usize) -> Self {
        Self {
            history: ConfigHistory::with_depth(depth),
            ..Self::default()
        }
    }

    pub fn is_selected(&self, kind: GeneratorKind) -> bool {
        self.selected.contains(&kind)
    }

    /// Add `kind` to the selection, or remove it if already selected.
    pub fn toggle(&mut self, kind: GeneratorKind) {
        if !self.selected.shift_remove(&kind) {
            self.selected.insert(kind);
        }
    }

    /// Store generated files, replacing earlier output with the same filename
    /// in place.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = GeneratedFile>) {
        for file in files {
            self.generated_files.insert(file.filename.clone(), file);
        }
    }

    pub fn clear_output(&mut self) {
        self.generated_files.clear();
        self.failures.clear();
    }

    /// Returns (files, failures).
    pub fn generation_stats(&self) -> (usize, usize) {
        (self.generated_files.len(), self.failures.len())
    }
}
