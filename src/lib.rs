//! tocspy - table of contents and scroll-spy for Markdown blog posts.
//!
//! Headings come in through a [`source::HeadingSource`], are indexed into a
//! [`heading::Outline`], and a [`spy::ScrollSpy`] tracks which one the
//! reader is on. [`tags`] ranks the tags of a post directory.

pub mod cli;
pub mod config;
pub mod frontmatter;
pub mod heading;
pub mod logger;
pub mod source;
pub mod spy;
pub mod tags;
pub mod utils;
