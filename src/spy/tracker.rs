//! Visibility Tracker: merges intersection entries and resolves the active
//! heading.

use rustc_hash::FxHashMap;

use super::policy::topmost;
use super::{IntersectionEntry, VisibilityState};
use crate::debug;
use crate::heading::Outline;

/// Owns the [`VisibilityState`] of one mounted document.
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    /// Heading id → flat index.
    lookup: FxHashMap<String, usize>,
    state: VisibilityState,
    active: Option<usize>,
    attached: bool,
}

impl VisibilityTracker {
    pub fn new(outline: &Outline) -> Self {
        Self {
            lookup: outline.id_map(),
            state: VisibilityState::default(),
            active: None,
            attached: true,
        }
    }

    /// Apply one intersection-change event.
    ///
    /// Returns `true` when the active heading changed. A detached tracker
    /// ignores every event. Entries for ids that are not tracked headings
    /// are dropped.
    pub fn apply(&mut self, entries: &[IntersectionEntry]) -> bool {
        if !self.attached {
            return false;
        }

        self.state.merge(
            entries
                .iter()
                .filter(|entry| self.lookup.contains_key(&entry.id)),
        );

        let visible = self
            .state
            .visible()
            .filter_map(|id| self.lookup.get(id).copied());

        // No visible heading: keep whatever was active before
        let Some(next) = topmost(visible) else {
            return false;
        };

        if self.active == Some(next) {
            return false;
        }

        debug!("spy"; "active heading {:?} -> {}", self.active, next);
        self.active = Some(next);
        true
    }

    /// Stop processing events and forget visibility flags.
    pub fn detach(&mut self) {
        self.attached = false;
        self.state.clear();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Index of the active heading, `None` until one is confirmed.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn state(&self) -> &VisibilityState {
        &self.state
    }
}
