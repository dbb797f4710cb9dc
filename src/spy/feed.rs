//! Observation feeds: the event sources that report band changes.
//!
//! A feed is the headless stand-in for a browser's intersection observer.
//! [`ScrollSpy`](super::ScrollSpy) subscribes once at mount and drops the
//! [`Subscription`] at unmount, which stops delivery.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use thiserror::Error;

use super::IntersectionEntry;
use crate::debug;

/// Callback receiving the entries of one change event.
pub type Listener = Box<dyn FnMut(&[IntersectionEntry])>;

/// Returned when a feed cannot observe anything, e.g. when rendering
/// happens without a viewport.
#[derive(Debug, Clone, Error)]
#[error("observation feed unavailable: {reason}")]
pub struct FeedUnavailable {
    pub reason: String,
}

/// Source of intersection-change events.
pub trait ObservationFeed {
    /// Start delivering changes for `targets` to `listener` until the
    /// returned subscription is dropped.
    fn observe(&self, targets: &[String], listener: Listener)
    -> Result<Subscription, FeedUnavailable>;
}

// ============================================================================
// Subscription
// ============================================================================

/// Guard for an active observation. Dropping it unsubscribes.
#[must_use = "dropping a subscription stops delivery immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Unsubscribe now.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

// ============================================================================
// ManualFeed
// ============================================================================

struct Registration {
    key: u64,
    targets: Rc<[String]>,
    listener: Rc<RefCell<Listener>>,
}

#[derive(Default)]
struct Registry {
    next_key: u64,
    registrations: Vec<Registration>,
    /// Events emitted while a delivery is running, delivered after it.
    queued: VecDeque<Vec<IntersectionEntry>>,
    delivering: bool,
}

/// A feed driven by explicit [`emit`](ManualFeed::emit) calls.
///
/// Used directly in tests and as the delivery half of
/// [`ScrollTrigger`](super::ScrollTrigger).
#[derive(Clone, Default)]
pub struct ManualFeed {
    registry: Rc<RefCell<Registry>>,
}

impl ManualFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `entries` to every subscriber, each receiving only the
    /// entries for targets it observes.
    ///
    /// Listeners may unsubscribe (or subscribe) while being notified; a
    /// listener cancelled mid-delivery receives nothing further.
    ///
    /// A listener may also emit on this feed while being notified. That
    /// event is queued and delivered, in order, once the current delivery
    /// has reached every subscriber.
    pub fn emit(&self, entries: &[IntersectionEntry]) {
        {
            let mut registry = self.registry.borrow_mut();
            registry.queued.push_back(entries.to_vec());
            if registry.delivering {
                return;
            }
            registry.delivering = true;
        }

        loop {
            let next = {
                let mut registry = self.registry.borrow_mut();
                let next = registry.queued.pop_front();
                if next.is_none() {
                    registry.delivering = false;
                }
                next
            };
            match next {
                Some(entries) => self.deliver(&entries),
                None => break,
            }
        }
    }

    fn deliver(&self, entries: &[IntersectionEntry]) {
        let snapshot: Vec<_> = self
            .registry
            .borrow()
            .registrations
            .iter()
            .map(|reg| (reg.key, Rc::clone(&reg.targets), Rc::clone(&reg.listener)))
            .collect();

        for (key, targets, listener) in snapshot {
            if !self.is_registered(key) {
                continue;
            }

            let observed: Vec<IntersectionEntry> = entries
                .iter()
                .filter(|entry| targets.contains(&entry.id))
                .cloned()
                .collect();
            if observed.is_empty() {
                continue;
            }

            match listener.try_borrow_mut() {
                Ok(mut listener) => (*listener)(&observed),
                // Only reachable if a listener is re-entered from outside
                // this feed's queue
                Err(_) => debug!("spy"; "listener {} busy, dropped {} entries", key, observed.len()),
            }
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().registrations.len()
    }

    fn is_registered(&self, key: u64) -> bool {
        self.registry
            .borrow()
            .registrations
            .iter()
            .any(|reg| reg.key == key)
    }
}

impl ObservationFeed for ManualFeed {
    fn observe(
        &self,
        targets: &[String],
        listener: Listener,
    ) -> Result<Subscription, FeedUnavailable> {
        let key = {
            let mut registry = self.registry.borrow_mut();
            let key = registry.next_key;
            registry.next_key += 1;
            registry.registrations.push(Registration {
                key,
                targets: targets.into(),
                listener: Rc::new(RefCell::new(listener)),
            });
            key
        };

        let registry: Weak<RefCell<Registry>> = Rc::downgrade(&self.registry);
        Ok(Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry
                    .borrow_mut()
                    .registrations
                    .retain(|reg| reg.key != key);
            }
        }))
    }
}

// ============================================================================
// NoFeed
// ============================================================================

/// A feed for contexts without a viewport. Every subscription fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeed;

impl ObservationFeed for NoFeed {
    fn observe(&self, _: &[String], _: Listener) -> Result<Subscription, FeedUnavailable> {
        Err(FeedUnavailable {
            reason: "no viewport in this rendering context".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<Vec<IntersectionEntry>>>>, Listener) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let listener: Listener = Box::new(move |entries: &[IntersectionEntry]| {
            sink.borrow_mut().push(entries.to_vec());
        });
        (seen, listener)
    }

    #[test]
    fn test_emit_filters_by_target() {
        let feed = ManualFeed::new();
        let (seen, listener) = recorder();
        let _sub = feed.observe(&["a".to_string()], listener).unwrap();

        feed.emit(&[IntersectionEntry::entered("a"), IntersectionEntry::entered("b")]);
        feed.emit(&[IntersectionEntry::entered("b")]);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], vec![IntersectionEntry::entered("a")]);
    }

    #[test]
    fn test_dropping_subscription_stops_delivery() {
        let feed = ManualFeed::new();
        let (seen, listener) = recorder();
        let sub = feed.observe(&["a".to_string()], listener).unwrap();
        assert_eq!(feed.subscriber_count(), 1);

        drop(sub);
        assert_eq!(feed.subscriber_count(), 0);

        feed.emit(&[IntersectionEntry::entered("a")]);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_cancel_is_explicit_drop() {
        let feed = ManualFeed::new();
        let (_, listener) = recorder();
        feed.observe(&["a".to_string()], listener).unwrap().cancel();
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_feed() {
        let feed = ManualFeed::new();
        let (_, listener) = recorder();
        let sub = feed.observe(&["a".to_string()], listener).unwrap();
        drop(feed);
        // Registry is gone; cancelling must not panic
        drop(sub);
    }

    #[test]
    fn test_emit_from_listener_is_queued() {
        let feed = ManualFeed::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let inner_feed = feed.clone();
        let sink = Rc::clone(&order);
        let _first = feed
            .observe(
                &["a".to_string(), "b".to_string()],
                Box::new(move |entries: &[IntersectionEntry]| {
                    sink.borrow_mut().push(format!("first:{}", entries[0].id));
                    if entries[0].id == "a" {
                        inner_feed.emit(&[IntersectionEntry::entered("b")]);
                    }
                }),
            )
            .unwrap();

        let sink = Rc::clone(&order);
        let _second = feed
            .observe(
                &["a".to_string(), "b".to_string()],
                Box::new(move |entries: &[IntersectionEntry]| {
                    sink.borrow_mut().push(format!("second:{}", entries[0].id));
                }),
            )
            .unwrap();

        feed.emit(&[IntersectionEntry::entered("a")]);

        // "b" reaches everyone only after "a" has reached everyone
        assert_eq!(
            *order.borrow(),
            vec!["first:a", "second:a", "first:b", "second:b"]
        );

        // The feed is idle again afterwards
        feed.emit(&[IntersectionEntry::left("a")]);
        assert_eq!(order.borrow().len(), 6);
    }

    #[test]
    fn test_no_feed_is_unavailable() {
        let (_, listener) = recorder();
        let err = NoFeed.observe(&["a".to_string()], listener).unwrap_err();
        assert!(err.to_string().contains("unavailable"));
    }
}
