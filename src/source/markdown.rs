//! Headings from Markdown source, parsed with `pulldown-cmark`.

use pulldown_cmark::{Event, HeadingLevel as CmarkLevel, Options, Parser, Tag, TagEnd};

use crate::frontmatter;
use crate::heading::{HeadingDescriptor, HeadingLevel};

use super::HeadingSource;

/// The `##`/`###` headings of a Markdown document.
///
/// Ids come from `{#custom-id}` heading attributes when present. Otherwise
/// they are left empty so the extractor slugs the title, matching the ids a
/// renderer's autolink-headers step produces.
#[derive(Debug, Clone, Default)]
pub struct MarkdownSource {
    headings: Vec<HeadingDescriptor>,
}

/// Heading currently being read.
struct OpenHeading {
    level: HeadingLevel,
    id: Option<String>,
    line: usize,
    title: String,
}

impl MarkdownSource {
    /// Parse `content`, skipping a leading front matter block.
    pub fn parse(content: &str) -> Self {
        let (body, first_line) = match frontmatter::split(content) {
            Some(fm) => (fm.body, fm.body_line),
            None => (content, 1),
        };

        let mut options = Options::empty();
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let mut headings = Vec::new();
        let mut open: Option<OpenHeading> = None;

        for (event, range) in Parser::new_ext(body, options).into_offset_iter() {
            match event {
                Event::Start(Tag::Heading { level, id, .. }) => {
                    open = participating(level).map(|level| OpenHeading {
                        level,
                        id: id.map(|id| id.to_string()),
                        line: first_line + body[..range.start].matches('\n').count(),
                        title: String::new(),
                    });
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some(heading) = open.as_mut() {
                        heading.title.push_str(&text);
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    if let Some(heading) = open.as_mut() {
                        heading.title.push(' ');
                    }
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(heading) = open.take() {
                        let mut desc = HeadingDescriptor::new(heading.level, heading.title.trim())
                            .with_line(heading.line);
                        desc.id = heading.id;
                        headings.push(desc);
                    }
                }
                _ => {}
            }
        }

        Self { headings }
    }
}

fn participating(level: CmarkLevel) -> Option<HeadingLevel> {
    match level {
        CmarkLevel::H2 => Some(HeadingLevel::H2),
        CmarkLevel::H3 => Some(HeadingLevel::H3),
        _ => None,
    }
}

impl HeadingSource for MarkdownSource {
    fn headings(&self) -> Vec<HeadingDescriptor> {
        self.headings.clone()
    }
}
