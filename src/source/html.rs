//! Headings from rendered HTML, parsed with `tl`.

use crate::heading::{HeadingDescriptor, HeadingLevel};
use crate::utils::html::{collapse_whitespace, unescape};

use super::HeadingSource;

/// The `h2`/`h3` elements of a rendered page, in document order.
#[derive(Debug, Clone, Default)]
pub struct HtmlSource {
    headings: Vec<HeadingDescriptor>,
}

impl HtmlSource {
    /// Parse `html` and collect its headings.
    ///
    /// Heading text is what a reader would see: entities decoded, markup
    /// stripped and whitespace collapsed. Elements without an `id` are kept
    /// with `id: None`; the extractor assigns them one.
    pub fn parse(html: &str) -> Result<Self, tl::ParseError> {
        let dom = tl::parse(html, tl::ParserOptions::default())?;
        let parser = dom.parser();

        let mut headings = Vec::new();
        for handle in dom.children() {
            collect(*handle, parser, &mut headings);
        }

        Ok(Self { headings })
    }
}

/// Depth-first walk, so headings come out in document order.
fn collect(handle: tl::NodeHandle, parser: &tl::Parser, out: &mut Vec<HeadingDescriptor>) {
    let Some(tl::Node::Tag(tag)) = handle.get(parser) else {
        return;
    };

    let name = tag.name().as_utf8_str();
    if let Some(level) = HeadingLevel::from_tag(&name) {
        let text = tag.inner_text(parser);
        let mut desc = HeadingDescriptor::new(level, collapse_whitespace(&unescape(&text)));
        desc.id = tag
            .attributes()
            .id()
            .map(|id| unescape(&id.as_utf8_str()).trim().to_string())
            .filter(|id| !id.is_empty());
        out.push(desc);
        // Headings do not nest
        return;
    }

    for child in tag.children().top().iter() {
        collect(*child, parser, out);
    }
}

impl HeadingSource for HtmlSource {
    fn headings(&self) -> Vec<HeadingDescriptor> {
        self.headings.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Vec<HeadingDescriptor> {
        HtmlSource::parse(html).unwrap().headings()
    }

    #[test]
    fn test_collects_h2_h3_in_document_order() {
        let headings = parse(
            r#"<html><body>
                <h1>Post title</h1>
                <article>
                  <h2 id="intro">Intro</h2>
                  <p>text</p>
                  <section><h3 id="sub">Sub</h3></section>
                  <h4 id="deep">Too deep</h4>
                  <h2 id="next">Next</h2>
                </article>
            </body></html>"#,
        );

        let summary: Vec<_> = headings
            .iter()
            .map(|h| (h.level, h.id.as_deref(), h.title.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (HeadingLevel::H2, Some("intro"), "Intro"),
                (HeadingLevel::H3, Some("sub"), "Sub"),
                (HeadingLevel::H2, Some("next"), "Next"),
            ]
        );
    }

    #[test]
    fn test_heading_text_is_reader_visible() {
        let headings = parse(
            "<h2 id=\"q\">\n  Tom &amp; <em>Jerry</em>\n  <a href=\"#q\" aria-hidden=\"true\"></a>\n</h2>",
        );
        assert_eq!(headings[0].title, "Tom & Jerry");
    }

    #[test]
    fn test_missing_or_blank_id_is_none() {
        let headings = parse("<h2>No id</h2><H3 ID=\"  \">Blank</H3>");
        assert_eq!(headings.len(), 2);
        assert!(headings.iter().all(|h| h.id.is_none()));
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("").is_empty());
        assert!(parse("<p>no headings</p>").is_empty());
    }
}
