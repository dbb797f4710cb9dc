//! `[spy]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [spy]
//! top-margin = 110.0       # px hidden behind the sticky navigation
//! bottom-fraction = 0.4    # bottom share of the viewport that never activates
//! debounce-ms = 250        # scroll trigger debounce
//! policy = "topmost"       # topmost | reading-position
//! read-ahead = 0.3         # reading-position: advance when next heading is this high
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::spy::{ActivePolicy, ViewportBand};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SpyConfig {
    /// Pixels at the top of the viewport excluded from the band.
    pub top_margin: f64,
    /// Fraction of the viewport height excluded at the bottom.
    pub bottom_fraction: f64,
    /// Debounce interval for the scroll trigger, in milliseconds.
    pub debounce_ms: u64,
    /// How the scroll trigger resolves the active heading.
    pub policy: ActivePolicy,
    /// Fraction of the viewport (below the top margin) that makes the
    /// reading-position policy advance to the next heading.
    pub read_ahead: f64,
}

impl SpyConfig {
    pub const TOP_MARGIN: FieldPath = FieldPath::new("spy.top-margin");
    pub const BOTTOM_FRACTION: FieldPath = FieldPath::new("spy.bottom-fraction");
    pub const READ_AHEAD: FieldPath = FieldPath::new("spy.read-ahead");

    /// The viewport band described by this section.
    pub fn band(&self) -> ViewportBand {
        ViewportBand {
            top_margin: self.top_margin,
            bottom_fraction: self.bottom_fraction,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.top_margin.is_finite() || self.top_margin < 0.0 {
            diag.error(Self::TOP_MARGIN, "must be a finite, non-negative number of pixels");
        }
        if !(0.0..1.0).contains(&self.bottom_fraction) {
            diag.error_with_hint(
                Self::BOTTOM_FRACTION,
                format!("{} is outside [0, 1)", self.bottom_fraction),
                "1.0 would exclude the whole viewport",
            );
        }
        if !(0.0..=1.0).contains(&self.read_ahead) {
            diag.error(
                Self::READ_AHEAD,
                format!("{} is outside [0, 1]", self.read_ahead),
            );
        }
    }
}

impl Default for SpyConfig {
    fn default() -> Self {
        let band = ViewportBand::default();
        Self {
            top_margin: band.top_margin,
            bottom_fraction: band.bottom_fraction,
            debounce_ms: 250,
            policy: ActivePolicy::Topmost,
            read_ahead: 0.3,
        }
    }
}
