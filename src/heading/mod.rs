//! Document headings and the two-level outline built from them.
//!
//! Only `h2` and `h3` participate. The extraction result is an [`Outline`]:
//!
//! - a flat list of [`Heading`]s in document order, each carrying its
//!   position (`index`) in that list;
//! - a list of [`OutlineNode`]s, one per `h2`, holding the `h3`s that follow
//!   it until the next `h2`;
//! - an id → index lookup used by the scroll-spy to map observed elements
//!   back to positions.
//!
//! An `h3` that appears before the first `h2` has no parent. It stays in the
//! flat list (so it can still become active) but is left out of the nested
//! outline. [`Outline::orphans`] lists such headings.

mod extract;
mod slug;

pub use extract::{extract_headings, extract_outline};
pub use slug::slugify_fragment;

use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};

// ============================================================================
// HeadingLevel
// ============================================================================

/// Heading depth. Serialized as the bare number (`2` or `3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeadingLevel {
    H2,
    H3,
}

impl HeadingLevel {
    /// Map an element tag name (`h2`, `H3`, ...) to a participating level.
    pub fn from_tag(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            _ => None,
        }
    }

    pub const fn depth(self) -> u8 {
        match self {
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }
}

impl Serialize for HeadingLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.depth())
    }
}

// ============================================================================
// HeadingDescriptor
// ============================================================================

/// A heading as reported by a [`crate::source::HeadingSource`], before
/// indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingDescriptor {
    /// Anchor id, if the element carries one.
    pub id: Option<String>,
    /// Display text.
    pub title: String,
    pub level: HeadingLevel,
    /// 1-based source line, when the source knows it.
    pub line: Option<usize>,
}

impl HeadingDescriptor {
    pub fn new(level: HeadingLevel, title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            level,
            line: None,
        }
    }

    pub fn h2(id: &str, title: &str) -> Self {
        Self::new(HeadingLevel::H2, title).with_id(id)
    }

    pub fn h3(id: &str, title: &str) -> Self {
        Self::new(HeadingLevel::H3, title).with_id(id)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

// ============================================================================
// Heading / OutlineNode / Outline
// ============================================================================

/// One indexed heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Anchor id, unique within the outline.
    pub id: String,
    pub title: String,
    pub level: HeadingLevel,
    /// Position in the flat, document-order heading list.
    pub index: usize,
    /// 1-based source line, when the source reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Heading {
    /// Fragment link to this heading (`#id`).
    pub fn url(&self) -> String {
        format!("#{}", self.id)
    }
}

/// An `h2` and the `h3`s nested under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineNode {
    pub heading: Heading,
    pub children: Vec<Heading>,
}

/// Read-only snapshot of a document's headings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Outline {
    headings: Vec<Heading>,
    nodes: Vec<OutlineNode>,
    #[serde(skip)]
    lookup: FxHashMap<String, usize>,
}

impl Outline {
    pub(crate) fn new(headings: Vec<Heading>, nodes: Vec<OutlineNode>) -> Self {
        let lookup = headings
            .iter()
            .map(|heading| (heading.id.clone(), heading.index))
            .collect();
        Self {
            headings,
            nodes,
            lookup,
        }
    }

    /// Flat heading list in document order.
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    /// Nested outline (`h2` → `h3` children).
    pub fn nodes(&self) -> &[OutlineNode] {
        &self.nodes
    }

    /// Position of the heading with anchor `id`.
    ///
    /// Ids are the ones the outline assigned. When a page repeats an
    /// explicit id, the later headings are renamed `id-1`, `id-2`, ...,
    /// while the page itself still carries the repeated id. Lookups by the
    /// page's id then resolve to the first of them, and a feed reporting
    /// raw element ids never reaches the renamed ones.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    pub fn get(&self, index: usize) -> Option<&Heading> {
        self.headings.get(index)
    }

    pub fn len(&self) -> usize {
        self.headings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    /// `h3` headings that precede every `h2` and therefore have no place in
    /// the nested outline.
    pub fn orphans(&self) -> impl Iterator<Item = &Heading> {
        self.headings
            .iter()
            .take_while(|heading| heading.level != HeadingLevel::H2)
    }

    /// Anchor id → flat index for every heading. Unordered.
    pub(crate) fn id_map(&self) -> FxHashMap<String, usize> {
        self.lookup.clone()
    }
}
