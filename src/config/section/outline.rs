//! `[outline]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [outline]
//! exclude = ["Table of contents", "Contents"]
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutlineConfig {
    /// Heading titles skipped before indexing (trimmed, case-insensitive).
    ///
    /// The sidebar renders its own "Table of contents" heading into the page,
    /// which must not show up in the outline it renders.
    pub exclude: Vec<String>,
}

impl OutlineConfig {
    pub const EXCLUDE: FieldPath = FieldPath::new("outline.exclude");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.exclude.iter().any(|title| title.trim().is_empty()) {
            diag.error_with_hint(
                Self::EXCLUDE,
                "contains an empty title",
                "remove the empty entry; untitled headings are never excluded",
            );
        }
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["Table of contents".to_string()],
        }
    }
}
