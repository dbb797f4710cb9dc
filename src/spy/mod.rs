//! Scroll-spy: which heading is "active" while the reader scrolls.
//!
//! # Module Structure
//!
//! ```text
//! spy/
//! ├── band       # Viewport, ViewportBand (which offsets count as in view)
//! ├── state      # VisibilityState, IntersectionEntry
//! ├── policy     # ActivePolicy and the two resolution rules
//! ├── tracker    # VisibilityTracker (merge entries, pick active index)
//! ├── feed       # ObservationFeed trait, Subscription, ManualFeed, NoFeed
//! ├── scroll     # Debouncer + ScrollTrigger (scroll positions as a feed)
//! └── mount      # ScrollSpy (mount/unmount lifecycle)
//! ```
//!
//! Everything runs on one thread inside the callbacks of the event source.
//! The tracker is shared between [`ScrollSpy`] and the feed listener
//! through `Rc<RefCell<_>>`.

mod band;
mod feed;
mod mount;
mod policy;
mod scroll;
mod state;
mod tracker;

pub use band::{Viewport, ViewportBand};
pub use feed::{FeedUnavailable, Listener, ManualFeed, NoFeed, ObservationFeed, Subscription};
pub use mount::ScrollSpy;
pub use policy::{ActivePolicy, reading_position, topmost};
pub use scroll::{Debouncer, OffsetError, ScrollTrigger};
pub use state::{IntersectionEntry, VisibilityState};
pub use tracker::VisibilityTracker;
