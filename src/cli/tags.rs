//! `tags` command: popular tags, or the posts carrying one tag.

use anyhow::Result;
use std::io::{self, Write};

use super::TagsArgs;
use super::common::write_json;
use crate::config::TocConfig;
use crate::log;
use crate::tags::{filter_by_tag, load_posts, most_popular_tags};
use crate::utils::plural::plural_count;

pub fn run_tags(args: &TagsArgs, config: &TocConfig) -> Result<()> {
    write_tags(args, config, &mut io::stdout().lock())
}

fn write_tags<W: Write + ?Sized>(args: &TagsArgs, config: &TocConfig, out: &mut W) -> Result<()> {
    let posts = load_posts(&args.dir)?;
    log!(
        "tags";
        "loaded {} from {}",
        plural_count(posts.len(), "post"),
        args.dir.display()
    );

    match &args.tag {
        Some(tag) => {
            let matching = filter_by_tag(&posts, tag);
            if args.json {
                return write_json(out, &matching, true);
            }
            for post in matching {
                writeln!(out, "{:<12} {}", post.date.as_deref().unwrap_or("-"), post.title)?;
            }
        }
        None => {
            let popular = most_popular_tags(&posts, config.tags.max);
            if args.json {
                return write_json(out, &popular, true);
            }
            for tag in popular {
                writeln!(out, "{} ({})", tag.name, tag.count)?;
            }
        }
    }

    Ok(())
}
