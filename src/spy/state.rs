//! Per-heading visibility flags.

use rustc_hash::FxHashMap;

/// One reported change: heading `id` entered or left the band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub id: String,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn new(id: impl Into<String>, is_intersecting: bool) -> Self {
        Self {
            id: id.into(),
            is_intersecting,
        }
    }

    pub fn entered(id: impl Into<String>) -> Self {
        Self::new(id, true)
    }

    pub fn left(id: impl Into<String>) -> Self {
        Self::new(id, false)
    }
}

/// Heading id → "currently inside the band".
///
/// Updates merge: ids missing from an event keep their previous flag.
#[derive(Debug, Clone, Default)]
pub struct VisibilityState {
    flags: FxHashMap<String, bool>,
}

impl VisibilityState {
    pub fn merge<'a>(&mut self, entries: impl IntoIterator<Item = &'a IntersectionEntry>) {
        for entry in entries {
            self.flags.insert(entry.id.clone(), entry.is_intersecting);
        }
    }

    pub fn is_intersecting(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    /// Ids currently inside the band, in no particular order.
    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, intersecting)| **intersecting)
            .map(|(id, _)| id.as_str())
    }

    pub fn clear(&mut self) {
        self.flags.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
