//! Scroll trigger: turns debounced scroll positions into intersection
//! entries.
//!
//! Used where no intersection feed exists. Given each heading's document
//! offset, the trigger recomputes band membership after scrolling settles
//! and reports only the headings whose membership changed, the way an
//! intersection observer would.

use std::time::{Duration, Instant};
use thiserror::Error;

use super::policy::reading_position;
use super::{
    ActivePolicy, FeedUnavailable, IntersectionEntry, Listener, ManualFeed, ObservationFeed,
    Subscription, Viewport, ViewportBand,
};
use crate::config::SpyConfig;
use crate::debug;
use crate::heading::Outline;

// ============================================================================
// Debouncer
// ============================================================================

/// Trailing-edge debouncer with an injected clock.
///
/// Ready once `interval` has passed since the last recorded event. Every new
/// event restarts the wait.
#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    last_event: Option<Instant>,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_event: None,
        }
    }

    pub fn record(&mut self, now: Instant) {
        self.last_event = Some(now);
    }

    pub fn is_ready(&self, now: Instant) -> bool {
        self.last_event
            .is_some_and(|last| now.saturating_duration_since(last) >= self.interval)
    }

    /// Consume the pending event if the interval elapsed.
    pub fn take_if_ready(&mut self, now: Instant) -> bool {
        if !self.is_ready(now) {
            return false;
        }
        self.last_event = None;
        true
    }

    /// Time left until [`is_ready`](Self::is_ready), `None` when idle.
    pub fn sleep_duration(&self, now: Instant) -> Option<Duration> {
        let last = self.last_event?;
        Some(
            self.interval
                .saturating_sub(now.saturating_duration_since(last)),
        )
    }
}

// ============================================================================
// ScrollTrigger
// ============================================================================

/// Heading offsets that cannot describe the outline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OffsetError {
    /// One offset is required per heading, in flat order.
    #[error("expected {expected} heading offsets, found {found}")]
    Count { expected: usize, found: usize },

    /// Headings appear in document order, so offsets never decrease.
    #[error("heading offset #{index} ({offset}) is above the heading before it")]
    Unordered { index: usize, offset: f64 },
}

/// Debounced scroll positions as an [`ObservationFeed`].
pub struct ScrollTrigger {
    ids: Vec<String>,
    offsets: Vec<f64>,
    band: ViewportBand,
    policy: ActivePolicy,
    read_ahead: f64,
    debouncer: Debouncer,
    pending: Option<Viewport>,
    /// Membership last reported, `None` before the first evaluation.
    reported: Option<Vec<bool>>,
    feed: ManualFeed,
}

impl ScrollTrigger {
    pub fn new(outline: &Outline, offsets: &[f64], config: &SpyConfig) -> Result<Self, OffsetError> {
        let headings = outline.headings();
        if headings.len() != offsets.len() {
            return Err(OffsetError::Count {
                expected: headings.len(),
                found: offsets.len(),
            });
        }
        // NaN compares as unordered too
        if let Some(index) = offsets
            .windows(2)
            .position(|pair| pair[0].partial_cmp(&pair[1]).is_none_or(|o| o.is_gt()))
        {
            return Err(OffsetError::Unordered {
                index: index + 1,
                offset: offsets[index + 1],
            });
        }

        Ok(Self {
            ids: headings.iter().map(|h| h.id.clone()).collect(),
            offsets: offsets.to_vec(),
            band: config.band(),
            policy: config.policy,
            read_ahead: config.read_ahead,
            debouncer: Debouncer::new(config.debounce()),
            pending: None,
            reported: None,
            feed: ManualFeed::new(),
        })
    }

    /// Record a scroll to `viewport` at time `now`. Nothing is evaluated
    /// until the debounce interval passes.
    pub fn on_scroll(&mut self, viewport: Viewport, now: Instant) {
        self.pending = Some(viewport);
        self.debouncer.record(now);
    }

    /// Evaluate the latest viewport if scrolling has settled.
    ///
    /// Returns `true` when an evaluation ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.debouncer.take_if_ready(now) {
            return false;
        }
        self.evaluate_pending()
    }

    /// Evaluate the latest viewport now, skipping the debounce wait.
    pub fn flush(&mut self) -> bool {
        self.debouncer.last_event = None;
        self.evaluate_pending()
    }

    /// How long until [`poll`](Self::poll) would evaluate.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.debouncer.sleep_duration(now)
    }

    /// Compute membership for `viewport` and report the changes.
    pub fn evaluate(&mut self, viewport: Viewport) {
        let membership = self.membership(viewport);

        let entries: Vec<IntersectionEntry> = match &self.reported {
            None => self
                .ids
                .iter()
                .zip(&membership)
                .map(|(id, &inside)| IntersectionEntry::new(id.as_str(), inside))
                .collect(),
            Some(previous) => self
                .ids
                .iter()
                .zip(membership.iter().zip(previous))
                .filter(|(_, (now, before))| now != before)
                .map(|(id, (&inside, _))| IntersectionEntry::new(id.as_str(), inside))
                .collect(),
        };

        debug!("spy"; "scroll_y={} -> {} changed", viewport.scroll_y, entries.len());
        self.reported = Some(membership);

        if !entries.is_empty() {
            self.feed.emit(&entries);
        }
    }

    fn evaluate_pending(&mut self) -> bool {
        let Some(viewport) = self.pending.take() else {
            return false;
        };
        self.evaluate(viewport);
        true
    }

    fn membership(&self, viewport: Viewport) -> Vec<bool> {
        match self.policy {
            ActivePolicy::Topmost => self
                .offsets
                .iter()
                .map(|&offset| self.band.contains(offset, viewport))
                .collect(),
            // Only the chosen heading reports as intersecting, so the
            // tracker's topmost rule resolves to it
            ActivePolicy::ReadingPosition => {
                let current = reading_position(
                    &self.offsets,
                    viewport,
                    self.band.top_margin,
                    self.read_ahead,
                );
                (0..self.offsets.len()).map(|i| current == Some(i)).collect()
            }
        }
    }
}

impl ObservationFeed for ScrollTrigger {
    fn observe(
        &self,
        targets: &[String],
        mut listener: Listener,
    ) -> Result<Subscription, FeedUnavailable> {
        // A new observer learns the current membership of its targets
        // straight away instead of waiting for the next change
        if let Some(reported) = &self.reported {
            let initial: Vec<IntersectionEntry> = self
                .ids
                .iter()
                .zip(reported)
                .filter(|(id, _)| targets.contains(*id))
                .map(|(id, &inside)| IntersectionEntry::new(id.as_str(), inside))
                .collect();
            if !initial.is_empty() {
                listener(&initial);
            }
        }
        self.feed.observe(targets, listener)
    }
}
