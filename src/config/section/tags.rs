//! `[tags]` section configuration.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TagsConfig {
    /// Number of popular tags listed.
    pub max: usize,
}

impl TagsConfig {
    pub const MAX: FieldPath = FieldPath::new("tags.max");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.max == 0 {
            diag.error(Self::MAX, "must list at least one tag");
        }
    }
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self { max: 5 }
    }
}
