//! Mount and teardown of a scroll-spy on one rendered document.

use std::cell::RefCell;
use std::rc::Rc;

use super::{IntersectionEntry, Listener, ObservationFeed, Subscription, VisibilityTracker};
use crate::debug;
use crate::heading::{Heading, Outline};

/// A tracker subscribed to an [`ObservationFeed`].
///
/// Dropping the spy unmounts it.
pub struct ScrollSpy {
    tracker: Rc<RefCell<VisibilityTracker>>,
    subscription: Option<Subscription>,
}

impl ScrollSpy {
    /// Observe every heading of `outline` through `feed`.
    ///
    /// If the feed is unavailable the spy still mounts, with no active
    /// heading ever reported.
    pub fn mount<F: ObservationFeed + ?Sized>(outline: &Outline, feed: &F) -> Self {
        Self::mount_with(outline, feed, |_| {})
    }

    /// Like [`mount`](Self::mount), calling `on_change` with the new active
    /// index whenever it changes.
    pub fn mount_with<F, C>(outline: &Outline, feed: &F, mut on_change: C) -> Self
    where
        F: ObservationFeed + ?Sized,
        C: FnMut(Option<usize>) + 'static,
    {
        let tracker = Rc::new(RefCell::new(VisibilityTracker::new(outline)));
        let targets: Vec<String> = outline.headings().iter().map(|h| h.id.clone()).collect();

        let shared = Rc::clone(&tracker);
        let listener: Listener = Box::new(move |entries: &[IntersectionEntry]| {
            let changed = shared.borrow_mut().apply(entries);
            if changed {
                let active = shared.borrow().active_index();
                on_change(active);
            }
        });

        let subscription = match feed.observe(&targets, listener) {
            Ok(subscription) => Some(subscription),
            Err(err) => {
                debug!("spy"; "{err}, active heading tracking disabled");
                tracker.borrow_mut().detach();
                None
            }
        };

        Self {
            tracker,
            subscription,
        }
    }

    /// Index of the active heading.
    pub fn active_index(&self) -> Option<usize> {
        self.tracker.borrow().active_index()
    }

    pub fn active_heading<'a>(&self, outline: &'a Outline) -> Option<&'a Heading> {
        self.active_index().and_then(|index| outline.get(index))
    }

    /// Whether events are still being delivered.
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Stop observing. Later events change nothing. Idempotent.
    pub fn unmount(&mut self) {
        self.tracker.borrow_mut().detach();
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }
}

impl Drop for ScrollSpy {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpyConfig;
    use crate::heading::{HeadingDescriptor, extract_headings};
    use crate::spy::{ManualFeed, NoFeed, ScrollTrigger, Viewport};

    fn outline() -> Outline {
        extract_headings(&vec![
            HeadingDescriptor::h2("intro", "Intro"),
            HeadingDescriptor::h3("sub", "Sub"),
            HeadingDescriptor::h2("next", "Next"),
        ])
    }

    #[test]
    fn test_mount_follows_feed() {
        let outline = outline();
        let feed = ManualFeed::new();
        let spy = ScrollSpy::mount(&outline, &feed);
        assert!(spy.is_mounted());
        assert_eq!(spy.active_index(), None);

        feed.emit(&[IntersectionEntry::entered("next"), IntersectionEntry::entered("sub")]);
        assert_eq!(spy.active_index(), Some(1));
        assert_eq!(spy.active_heading(&outline).map(|h| h.id.as_str()), Some("sub"));
    }

    #[test]
    fn test_on_change_fires_only_on_change() {
        let outline = outline();
        let feed = ManualFeed::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _spy = ScrollSpy::mount_with(&outline, &feed, move |active| sink.borrow_mut().push(active));

        feed.emit(&[IntersectionEntry::entered("intro")]);
        feed.emit(&[IntersectionEntry::entered("next")]);
        feed.emit(&[IntersectionEntry::left("intro")]);

        assert_eq!(*seen.borrow(), vec![Some(0), Some(2)]);
    }

    #[test]
    fn test_unmount_ignores_later_events() {
        let outline = outline();
        let feed = ManualFeed::new();
        let mut spy = ScrollSpy::mount(&outline, &feed);
        feed.emit(&[IntersectionEntry::entered("intro")]);

        spy.unmount();
        assert!(!spy.is_mounted());
        assert_eq!(feed.subscriber_count(), 0);

        feed.emit(&[IntersectionEntry::entered("sub")]);
        assert_eq!(spy.active_index(), Some(0));

        // Idempotent
        spy.unmount();
    }

    #[test]
    fn test_drop_unsubscribes() {
        let outline = outline();
        let feed = ManualFeed::new();
        {
            let _spy = ScrollSpy::mount(&outline, &feed);
            assert_eq!(feed.subscriber_count(), 1);
        }
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn test_unavailable_feed_degrades() {
        let outline = outline();
        let spy = ScrollSpy::mount(&outline, &NoFeed);
        assert!(!spy.is_mounted());
        assert_eq!(spy.active_index(), None);
    }

    #[test]
    fn test_empty_outline() {
        let outline = extract_headings(&Vec::<HeadingDescriptor>::new());
        let feed = ManualFeed::new();
        let spy = ScrollSpy::mount(&outline, &feed);
        feed.emit(&[IntersectionEntry::entered("anything")]);
        assert_eq!(spy.active_index(), None);
        assert!(spy.active_heading(&outline).is_none());
    }

    #[test]
    fn test_scroll_trigger_drives_spy() {
        let outline = outline();
        let mut trigger =
            ScrollTrigger::new(&outline, &[300.0, 700.0, 1500.0], &SpyConfig::default()).unwrap();
        let spy = ScrollSpy::mount(&outline, &trigger);

        // Band [110, 600): intro only
        trigger.evaluate(Viewport::new(0.0, 1000.0));
        assert_eq!(spy.active_index(), Some(0));

        // Band [1110, 1600): next only
        trigger.evaluate(Viewport::new(1000.0, 1000.0));
        assert_eq!(spy.active_index(), Some(2));

        // Band [3110, 3600): nothing, keep "next"
        trigger.evaluate(Viewport::new(3000.0, 1000.0));
        assert_eq!(spy.active_index(), Some(2));
    }

    #[test]
    fn test_remount_on_evaluated_trigger() {
        let outline = outline();
        let mut trigger =
            ScrollTrigger::new(&outline, &[300.0, 700.0, 1500.0], &SpyConfig::default()).unwrap();

        let first = ScrollSpy::mount(&outline, &trigger);
        trigger.evaluate(Viewport::new(0.0, 1000.0));
        assert_eq!(first.active_index(), Some(0));
        drop(first);

        // Same viewport, so no change would ever be reported again
        let second = ScrollSpy::mount(&outline, &trigger);
        assert_eq!(second.active_index(), Some(0));
        trigger.evaluate(Viewport::new(0.0, 1000.0));
        assert_eq!(second.active_index(), Some(0));
    }

    #[test]
    fn test_on_change_may_emit_on_same_feed() {
        let outline = outline();
        let feed = ManualFeed::new();
        let inner = feed.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let spy = ScrollSpy::mount_with(&outline, &feed, move |active| {
            sink.borrow_mut().push(active);
            if active == Some(2) {
                inner.emit(&[IntersectionEntry::entered("sub")]);
            }
        });

        feed.emit(&[IntersectionEntry::entered("next")]);

        // The nested event lands after the outer one
        assert_eq!(*seen.borrow(), vec![Some(2), Some(1)]);
        assert_eq!(spy.active_index(), Some(1));
    }
}
