//! `outline` command: print the heading outline of a post.

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};

use super::OutlineArgs;
use super::common::{load_outline, report_orphans, write_json};
use crate::config::TocConfig;
use crate::heading::{Heading, Outline};
use crate::log;
use crate::utils::plural::plural_count;

pub fn run_outline(args: &OutlineArgs, config: &TocConfig) -> Result<()> {
    let (_, outline) = load_outline(&args.file, config)?;
    report_orphans(&outline, &args.file);

    log!(
        "outline";
        "{} in {}",
        plural_count(outline.len(), "heading"),
        args.file.display()
    );

    if args.json {
        write_json(&mut std::io::stdout().lock(), &outline, args.pretty)
    } else {
        print!("{}", render_tree(&outline));
        Ok(())
    }
}

/// Indented `- Title #id` lines, `h3`s under their `h2`.
fn render_tree(outline: &Outline) -> String {
    outline
        .nodes()
        .iter()
        .flat_map(|node| {
            std::iter::once(tree_line(&node.heading, 0))
                .chain(node.children.iter().map(|child| tree_line(child, 1)))
        })
        .collect()
}

fn tree_line(heading: &Heading, depth: usize) -> String {
    let url = heading.url();
    format!(
        "{}- {} {}\n",
        "  ".repeat(depth),
        heading.title,
        url.if_supports_color(Stream::Stdout, |url| url.dimmed())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::{HeadingDescriptor, extract_headings};

    #[test]
    fn test_render_tree() {
        owo_colors::set_override(false);
        let outline = extract_headings(&vec![
            HeadingDescriptor::h3("early", "Early"),
            HeadingDescriptor::h2("a", "Intro"),
            HeadingDescriptor::h3("b", "Sub"),
            HeadingDescriptor::h2("c", "Next"),
        ]);

        // The orphaned h3 has no place in the tree
        assert_eq!(render_tree(&outline), "- Intro #a\n  - Sub #b\n- Next #c\n");
    }

    #[test]
    fn test_render_empty() {
        let outline = extract_headings(&Vec::<HeadingDescriptor>::new());
        assert!(render_tree(&outline).is_empty());
    }
}
