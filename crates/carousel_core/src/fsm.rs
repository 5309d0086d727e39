//! State Machine Support
//!
//! Widgets keep their interaction state in a plain enum (so per-state data
//! such as velocities and loop handles lives inside the active variant).
//! This module provides the bookkeeping around such an enum:
//! - Stable numeric state ids via [`StateKind`]
//! - Entry/exit hooks keyed by state id
//! - Bounded transition history (for debugging)

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::events::{event_types, EventType};

/// Identifier for a state kind
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = EventType;

/// A hook executed when a state is entered or exited
pub type Hook = Box<dyn FnMut() + Send>;

/// Default number of transitions kept in history
const DEFAULT_HISTORY: usize = 64;

/// Implemented by widget state enums to expose a stable kind id
///
/// Variants carrying data map to the same id regardless of payload.
pub trait StateKind {
    /// Numeric id of the active variant
    fn state_id(&self) -> StateId;

    /// Human readable name of the active variant
    fn name(&self) -> &'static str;
}

/// A recorded state change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionRecord {
    pub from: StateId,
    pub event: EventId,
    pub to: StateId,
}

/// Transition history and entry/exit hooks
pub struct TransitionLog {
    entry_callbacks: FxHashMap<StateId, SmallVec<[Hook; 2]>>,
    exit_callbacks: FxHashMap<StateId, SmallVec<[Hook; 2]>>,
    history: VecDeque<TransitionRecord>,
    capacity: usize,
}

impl TransitionLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY)
    }

    /// Create a log keeping at most `capacity` records (oldest dropped first)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entry_callbacks: FxHashMap::default(),
            exit_callbacks: FxHashMap::default(),
            history: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY)),
            capacity,
        }
    }

    /// Register an entry hook for a state
    pub fn on_enter<F: FnMut() + Send + 'static>(&mut self, state: StateId, hook: F) {
        self.entry_callbacks
            .entry(state)
            .or_default()
            .push(Box::new(hook));
    }

    /// Register an exit hook for a state
    pub fn on_exit<F: FnMut() + Send + 'static>(&mut self, state: StateId, hook: F) {
        self.exit_callbacks
            .entry(state)
            .or_default()
            .push(Box::new(hook));
    }

    /// Record a transition, running exit hooks of `from` then entry hooks of `to`
    ///
    /// Self-transitions (same kind, e.g. a drag update) are not recorded and
    /// run no hooks. Returns whether the kind changed.
    pub fn record(&mut self, from: StateId, event: EventId, to: StateId) -> bool {
        if from == to {
            return false;
        }

        if let Some(callbacks) = self.exit_callbacks.get_mut(&from) {
            for callback in callbacks.iter_mut() {
                callback();
            }
        }

        if self.capacity > 0 {
            if self.history.len() == self.capacity {
                self.history.pop_front();
            }
            self.history.push_back(TransitionRecord { from, event, to });
        }

        tracing::trace!(
            "fsm: {} -> {} on {}",
            from,
            to,
            event_types::name(event)
        );

        if let Some(callbacks) = self.entry_callbacks.get_mut(&to) {
            for callback in callbacks.iter_mut() {
                callback();
            }
        }

        true
    }

    /// Recorded transitions, oldest first
    pub fn history(&self) -> &VecDeque<TransitionRecord> {
        &self.history
    }

    /// Most recent transition
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.history.back()
    }

    /// Clear transition history (hooks are kept)
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Default for TransitionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TransitionLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionLog")
            .field("history", &self.history)
            .field("capacity", &self.capacity)
            .field("entry_hooks", &self.entry_callbacks.len())
            .field("exit_hooks", &self.exit_callbacks.len())
            .finish()
    }
}
