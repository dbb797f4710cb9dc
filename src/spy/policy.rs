//! Rules for picking the active heading.

use serde::{Deserialize, Serialize};

use super::Viewport;

/// How the active heading is resolved.
///
/// The two rules are alternatives and are never combined.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ActivePolicy {
    /// Of all headings inside the band, the first in document order.
    #[default]
    Topmost,
    /// The last heading scrolled past the top margin, or the next one when
    /// it is already near the top of the viewport. Needs heading offsets,
    /// so only the scroll trigger can apply it.
    ReadingPosition,
}

/// Smallest index among the visible ones; `None` when nothing is visible.
pub fn topmost(visible: impl IntoIterator<Item = usize>) -> Option<usize> {
    visible.into_iter().min()
}

/// Reading-position rule over ascending heading `offsets`.
///
/// A heading is "scrolled past" once its offset is above
/// `scroll_y + top_margin`. If nothing is scrolled past, the first heading
/// is active. If the heading after the last scrolled-past one is within
/// `read_ahead * height` below the margin line, it wins instead.
pub fn reading_position(
    offsets: &[f64],
    viewport: Viewport,
    top_margin: f64,
    read_ahead: f64,
) -> Option<usize> {
    if offsets.is_empty() {
        return None;
    }

    let margin_line = viewport.scroll_y + top_margin;
    let passed = offsets
        .iter()
        .take_while(|&&offset| margin_line > offset)
        .count();
    if passed == 0 {
        return Some(0);
    }

    let mut current = passed - 1;
    let next_near_top = offsets
        .get(current + 1)
        .is_some_and(|&next| margin_line + read_ahead * viewport.height > next);
    if next_near_top {
        current += 1;
    }

    Some(current)
}
