//! Heading Extractor: one fold from descriptors to [`Outline`].

use rustc_hash::FxHashSet;

use super::{Heading, HeadingDescriptor, HeadingLevel, Outline, OutlineNode, slugify_fragment};
use crate::config::OutlineConfig;
use crate::debug;
use crate::source::HeadingSource;

/// Build the outline of every heading `source` reports.
///
/// Never fails: an empty source yields an empty outline, and headings
/// without a usable id receive a generated one.
pub fn extract_headings<S: HeadingSource + ?Sized>(source: &S) -> Outline {
    build(source.headings())
}

/// Like [`extract_headings`], but drops headings whose title is listed in
/// `[outline] exclude` before indexing.
pub fn extract_outline<S: HeadingSource + ?Sized>(source: &S, config: &OutlineConfig) -> Outline {
    let descriptors = source
        .headings()
        .into_iter()
        .filter(|desc| !is_excluded(&desc.title, &config.exclude))
        .collect();
    build(descriptors)
}

fn is_excluded(title: &str, exclude: &[String]) -> bool {
    let title = title.trim();
    exclude
        .iter()
        .any(|excluded| excluded.trim().eq_ignore_ascii_case(title))
}

fn build(descriptors: Vec<HeadingDescriptor>) -> Outline {
    let mut ids = IdAllocator::default();
    let capacity = descriptors.len();

    let (headings, nodes) = descriptors.into_iter().enumerate().fold(
        (Vec::with_capacity(capacity), Vec::<OutlineNode>::new()),
        |(mut headings, mut nodes), (index, desc)| {
            let heading = Heading {
                id: ids.claim(desc.id.as_deref(), &desc.title, index),
                title: desc.title,
                level: desc.level,
                index,
                line: desc.line,
            };

            match heading.level {
                HeadingLevel::H2 => nodes.push(OutlineNode {
                    heading: heading.clone(),
                    children: Vec::new(),
                }),
                HeadingLevel::H3 => match nodes.last_mut() {
                    Some(parent) => parent.children.push(heading.clone()),
                    None => {
                        debug!("outline"; "`{}` precedes every h2, kept out of the outline", heading.id)
                    }
                },
            }

            headings.push(heading);
            (headings, nodes)
        },
    );

    Outline::new(headings, nodes)
}

/// Hands out anchor ids, guaranteeing they are non-empty and unique.
///
/// Priority: the element's own id, then a slug of its title, then
/// `heading-{index}`. A taken id gets `-1`, `-2`, ... appended.
#[derive(Default)]
struct IdAllocator {
    used: FxHashSet<String>,
}

impl IdAllocator {
    fn claim(&mut self, id: Option<&str>, title: &str, index: usize) -> String {
        let base = match id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => {
                let slug = slugify_fragment(title);
                let generated = if slug.is_empty() {
                    format!("heading-{index}")
                } else {
                    slug
                };
                debug!("outline"; "heading {} has no id, using `{}`", index, generated);
                generated
            }
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while self.used.contains(&candidate) {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }
        if candidate != base {
            debug!("outline"; "duplicate id `{}` renamed to `{}`", base, candidate);
        }

        self.used.insert(candidate.clone());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(outline: &Outline) -> Vec<&str> {
        outline.headings().iter().map(|h| h.id.as_str()).collect()
    }

    #[test]
    fn test_flat_indices_follow_document_order() {
        let source = vec![
            HeadingDescriptor::h3("a", "A"),
            HeadingDescriptor::h2("b", "B"),
            HeadingDescriptor::h3("c", "C"),
            HeadingDescriptor::h3("d", "D"),
            HeadingDescriptor::h2("e", "E"),
        ];
        let outline = extract_headings(&source);
        for (i, heading) in outline.headings().iter().enumerate() {
            assert_eq!(heading.index, i);
        }
        assert_eq!(ids(&outline), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_intro_sub_next() {
        let source = vec![
            HeadingDescriptor::h2("a", "Intro"),
            HeadingDescriptor::h3("b", "Sub"),
            HeadingDescriptor::h2("c", "Next"),
        ];
        let outline = extract_headings(&source);

        let flat: Vec<_> = outline
            .headings()
            .iter()
            .map(|h| (h.id.as_str(), h.level.depth(), h.index))
            .collect();
        assert_eq!(flat, vec![("a", 2, 0), ("b", 3, 1), ("c", 2, 2)]);

        let nodes = outline.nodes();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].heading.id, "a");
        assert_eq!(nodes[0].children.len(), 1);
        assert_eq!(nodes[0].children[0].id, "b");
        assert_eq!(nodes[1].heading.id, "c");
        assert!(nodes[1].children.is_empty());
    }

    #[test]
    fn test_leading_h3_is_kept_flat_but_not_nested() {
        let source = vec![
            HeadingDescriptor::h3("early", "Early"),
            HeadingDescriptor::h2("first", "First"),
            HeadingDescriptor::h3("late", "Late"),
        ];
        let outline = extract_headings(&source);

        assert_eq!(outline.index_of("early"), Some(0));
        assert!(
            outline
                .nodes()
                .iter()
                .all(|node| node.children.iter().all(|c| c.id != "early"))
        );
        let orphans: Vec<_> = outline.orphans().map(|h| h.id.as_str()).collect();
        assert_eq!(orphans, vec!["early"]);
    }

    #[test]
    fn test_empty_source() {
        let outline = extract_headings(&Vec::<HeadingDescriptor>::new());
        assert!(outline.is_empty());
        assert!(outline.nodes().is_empty());
        assert_eq!(outline.orphans().count(), 0);
    }

    #[test]
    fn test_missing_ids_get_fallbacks() {
        let source = vec![
            HeadingDescriptor::new(HeadingLevel::H2, "Getting Started"),
            HeadingDescriptor::new(HeadingLevel::H2, "🎉"),
            HeadingDescriptor::new(HeadingLevel::H3, "").with_id("   "),
        ];
        let outline = extract_headings(&source);
        let ids = ids(&outline);

        assert_eq!(ids[0], "getting-started");
        assert!(!ids[1].is_empty());
        assert_eq!(ids[2], "heading-2");
        assert_eq!(outline.len(), 3);
    }

    #[test]
    fn test_duplicate_ids_are_made_unique() {
        let source = vec![
            HeadingDescriptor::h2("setup", "Setup"),
            HeadingDescriptor::h3("setup", "Setup"),
            HeadingDescriptor::new(HeadingLevel::H3, "Setup"),
        ];
        let outline = extract_headings(&source);
        assert_eq!(ids(&outline), vec!["setup", "setup-1", "setup-2"]);
        assert_eq!(outline.index_of("setup"), Some(0));
        assert_eq!(outline.index_of("setup-2"), Some(2));
    }

    #[test]
    fn test_excluded_titles_are_skipped_before_indexing() {
        let source = vec![
            HeadingDescriptor::h2("toc", "  table of Contents "),
            HeadingDescriptor::h2("a", "Intro"),
        ];
        let outline = extract_outline(&source, &OutlineConfig::default());
        assert_eq!(ids(&outline), vec!["a"]);
        assert_eq!(outline.get(0).map(|h| h.index), Some(0));
    }
}
