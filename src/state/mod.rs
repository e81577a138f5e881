// State management module
//
// This module provides the StateManager which wraps AppState with thread-safe access
// using Arc<RwLock<T>> and emits change events to subscribers.

use crate::metrics::Metrics;
use crate::models::{AppState, GenerationFailure, ModConfig};
use crate::services::generators::{GeneratedFile, GeneratorKind};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when state is modified
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// The configuration record differs from before the update
    ConfigChanged,

    /// Generator selection changed
    SelectionChanged {
        selected: Vec<GeneratorKind>,
    },

    /// A batch has started
    GenerationStarted {
        total: usize,
    },

    /// A batch has finished
    GenerationFinished {
        files: usize,
        failures: usize,
    },

    /// A file was added or its content replaced
    FileGenerated {
        filename: String,
    },

    /// All generated output was removed
    OutputCleared,

    /// Undo/redo availability changed
    HistoryChanged {
        can_undo: bool,
        can_redo: bool,
    },
}

/// Thread-safe state manager with event emission
///
/// This is the central state management component that:
/// - Provides thread-safe access to [`AppState`] via `Arc<RwLock<T>>`
/// - Detects state changes and emits [`StateChange`] events
/// - Supports subscribing to state changes via tokio broadcast channels
///
/// # Usage
///
/// - [`read()`](Self::read) for reading state through a closure
/// - [`update()`](Self::update) for mutations with automatic event emission
/// - [`subscribe()`](Self::subscribe) for listening to state changes
pub struct StateManager {
    state: Arc<RwLock<AppState>>,

    /// Broadcast channel for emitting state change events
    state_tx: broadcast::Sender<StateChange>,

    metrics: Option<Arc<Metrics>>,
}

impl StateManager {
    /// Create a new StateManager with default state and a 100-event buffer
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(state)),
            state_tx,
            metrics: None,
        }
    }

    /// Count updates and broadcasts in `metrics`.
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Get a cloned snapshot of the current state
    pub fn snapshot(&self) -> AppState {
        self.read(AppState::clone)
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let selected = state_manager.read(|state| state.selected.len());
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Update the state and emit change events
    ///
    /// 1. Captures the old state
    /// 2. Applies the update function
    /// 3. Detects what changed
    /// 4. Emits appropriate events
    ///
    /// Returns the events that were emitted.
    pub fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut AppState),
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let old_state = state.clone();

        update_fn(&mut state);

        let changes = detect_changes(&old_state, &state);
        drop(state);

        if let Some(metrics) = &self.metrics {
            metrics.record_state_update();
        }
        for change in &changes {
            self.emit(change.clone());
        }

        changes
    }

    /// Subscribe to state change events
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    fn emit(&self, change: StateChange) {
        // No receivers is fine; the event is simply dropped.
        let sent = self.state_tx.send(change).is_ok();
        if let Some(metrics) = &self.metrics {
            if sent {
                metrics.record_state_broadcast();
            } else {
                metrics.record_state_broadcast_error();
            }
        }
    }

    // Convenience methods for common state updates

    /// Replace the configuration, recording the previous one for undo.
    pub fn apply_config(&self, config: ModConfig) -> Vec<StateChange> {
        self.update(|state| {
            if state.config != config {
                let previous = std::mem::replace(&mut state.config, config);
                state.history.record(previous);
            }
        })
    }

    /// Restore the previous configuration. Emits nothing if there is none.
    pub fn undo(&self) -> Vec<StateChange> {
        self.update(|state| {
            if let Some(previous) = state.history.undo(state.config.clone()) {
                state.config = previous;
            }
        })
    }

    pub fn redo(&self) -> Vec<StateChange> {
        self.update(|state| {
            if let Some(next) = state.history.redo(state.config.clone()) {
                state.config = next;
            }
        })
    }

    pub fn toggle_generator(&self, kind: GeneratorKind) -> Vec<StateChange> {
        self.update(|state| state.toggle(kind))
    }

    pub fn select_all(&self) -> Vec<StateChange> {
        self.update(|state| {
            state.selected = GeneratorKind::ALL.into_iter().collect();
        })
    }

    pub fn clear_selection(&self) -> Vec<StateChange> {
        self.update(|state| state.selected.clear())
    }

    pub fn start_generation(&self, total: usize) -> Vec<StateChange> {
        self.update(|state| {
            state.is_generating = true;
            state.batch_total = total;
            state.current_generator = None;
            state.failures.clear();
        })
    }

    pub fn set_current_generator(&self, kind: Option<GeneratorKind>) -> Vec<StateChange> {
        self.update(|state| state.current_generator = kind)
    }

    pub fn add_files(&self, files: Vec<GeneratedFile>) -> Vec<StateChange> {
        self.update(|state| state.add_files(files))
    }

    pub fn record_failure(&self, kind: GeneratorKind, message: String) -> Vec<StateChange> {
        self.update(|state| state.failures.push(GenerationFailure { kind, message }))
    }

    pub fn finish_generation(&self) -> Vec<StateChange> {
        self.update(|state| {
            state.is_generating = false;
            state.current_generator = None;
        })
    }

    pub fn clear_output(&self) -> Vec<StateChange> {
        self.update(AppState::clear_output)
    }

    /// Get an Arc reference to the state for use in worker threads
    pub fn state_arc(&self) -> Arc<RwLock<AppState>> {
        Arc::clone(&self.state)
    }
}

/// Detect what changed between two states and generate events
fn detect_changes(old: &AppState, new: &AppState) -> Vec<StateChange> {
    let mut changes = Vec::new();

    if old.config != new.config {
        changes.push(StateChange::ConfigChanged);
    }

    if old.history.can_undo() != new.history.can_undo()
        || old.history.can_redo() != new.history.can_redo()
    {
        changes.push(StateChange::HistoryChanged {
            can_undo: new.history.can_undo(),
            can_redo: new.history.can_redo(),
        });
    }

    if old.selected != new.selected {
        changes.push(StateChange::SelectionChanged {
            selected: new.selected.iter().copied().collect(),
        });
    }

    if old.is_generating != new.is_generating {
        if new.is_generating {
            changes.push(StateChange::GenerationStarted {
                total: new.batch_total,
            });
        } else {
            changes.push(StateChange::GenerationFinished {
                files: new.generated_files.len(),
                failures: new.failures.len(),
            });
        }
    }

    if !old.generated_files.is_empty() && new.generated_files.is_empty() {
        changes.push(StateChange::OutputCleared);
    }

    for (filename, file) in &new.generated_files {
        if old.generated_files.get(filename) != Some(file) {
            changes.push(StateChange::FileGenerated {
                filename: filename.clone(),
            });
        }
    }

    changes
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

// Make StateManager cloneable for sharing across threads
impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
            metrics: self.metrics.clone(),
        }
    }
}
