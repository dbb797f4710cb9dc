//! Config field path used to point diagnostics at a key.

use owo_colors::OwoColorize;
use std::fmt;

/// A dotted path to a config key, e.g. `spy.top-margin`.
///
/// Section structs expose their paths as associated constants so that
/// validators never spell a key by hand:
///
/// ```ignore
/// diag.error(SpyConfig::TOP_MARGIN, "must be a finite, non-negative number");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}
