//! Configuration section definitions.
//!
//! Each module corresponds to a section in `tocspy.toml`:
//!
//! | Module    | TOML Section  | Purpose                                  |
//! |-----------|---------------|------------------------------------------|
//! | `outline` | `[outline]`   | Heading extraction (excluded titles)     |
//! | `spy`     | `[spy]`       | Viewport band, debounce, active policy   |
//! | `tags`    | `[tags]`      | Tag popularity listing                   |

mod outline;
mod spy;
mod tags;

pub use outline::OutlineConfig;
pub use spy::SpyConfig;
pub use tags::TagsConfig;
