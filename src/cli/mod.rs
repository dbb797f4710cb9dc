//! Command-line interface module.

mod args;
pub mod common;
pub mod outline;
pub mod spy;
pub mod tags;

pub use args::{Cli, Commands, DEFAULT_CONFIG, OutlineArgs, SpyArgs, TagsArgs};
