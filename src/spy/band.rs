//! The viewport band a heading must be inside to count as "in view".

/// Visible window onto the document, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Document offset of the viewport's top edge.
    pub scroll_y: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(scroll_y: f64, height: f64) -> Self {
        Self { scroll_y, height }
    }
}

/// The band of the viewport in which headings are tracked.
///
/// The top `top_margin` pixels sit under the sticky navigation and the
/// bottom `bottom_fraction` of the viewport is too far down to count as
/// being read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBand {
    pub top_margin: f64,
    pub bottom_fraction: f64,
}

impl Default for ViewportBand {
    fn default() -> Self {
        Self {
            top_margin: 110.0,
            bottom_fraction: 0.4,
        }
    }
}

impl ViewportBand {
    /// Document offset of the band's top edge (inclusive).
    pub fn top(&self, viewport: Viewport) -> f64 {
        viewport.scroll_y + self.top_margin
    }

    /// Document offset of the band's bottom edge (exclusive).
    pub fn bottom(&self, viewport: Viewport) -> f64 {
        viewport.scroll_y + viewport.height * (1.0 - self.bottom_fraction)
    }

    /// Whether a heading whose top edge sits at document offset `offset` is
    /// inside the band.
    pub fn contains(&self, offset: f64, viewport: Viewport) -> bool {
        offset >= self.top(viewport) && offset < self.bottom(viewport)
    }
}
