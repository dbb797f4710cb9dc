//! Heading sources: where descriptors come from.
//!
//! The extractor never touches a DOM or a parser directly. It asks a
//! [`HeadingSource`] for the ordered list of `h2`/`h3` descriptors, which
//! keeps extraction testable without a rendering environment.
//!
//! | Source                     | Input                                  |
//! |----------------------------|----------------------------------------|
//! | [`HtmlSource`]             | Rendered HTML (parsed with `tl`)       |
//! | [`MarkdownSource`]         | Markdown with optional front matter    |
//! | `Vec<HeadingDescriptor>`   | Descriptors built by the caller        |

mod html;
mod markdown;

pub use html::HtmlSource;
pub use markdown::MarkdownSource;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::heading::HeadingDescriptor;

/// Supplies a document's participating headings in document order.
pub trait HeadingSource {
    fn headings(&self) -> Vec<HeadingDescriptor>;
}

impl HeadingSource for [HeadingDescriptor] {
    fn headings(&self) -> Vec<HeadingDescriptor> {
        self.to_vec()
    }
}

impl HeadingSource for Vec<HeadingDescriptor> {
    fn headings(&self) -> Vec<HeadingDescriptor> {
        self.clone()
    }
}

/// Errors raised while loading a document from disk.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` is not parseable HTML: {1}")]
    Html(PathBuf, String),
}

/// Document format, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Html,
    Markdown,
}

impl DocumentKind {
    /// `.html`/`.htm` are rendered pages; everything else is treated as
    /// Markdown (`.md`, `.mdx`, ...).
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("html" | "htm") => Self::Html,
            _ => Self::Markdown,
        }
    }
}

/// A document loaded from disk, whichever its format.
#[derive(Debug)]
pub enum Document {
    Html(HtmlSource),
    Markdown(MarkdownSource),
}

impl Document {
    /// Read and parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let content =
            std::fs::read_to_string(path).map_err(|err| SourceError::Io(path.to_path_buf(), err))?;

        Ok(match DocumentKind::from_path(path) {
            DocumentKind::Html => Self::Html(
                HtmlSource::parse(&content)
                    .map_err(|err| SourceError::Html(path.to_path_buf(), format!("{err:?}")))?,
            ),
            DocumentKind::Markdown => Self::Markdown(MarkdownSource::parse(&content)),
        })
    }

    pub const fn kind(&self) -> DocumentKind {
        match self {
            Self::Html(_) => DocumentKind::Html,
            Self::Markdown(_) => DocumentKind::Markdown,
        }
    }
}

impl HeadingSource for Document {
    fn headings(&self) -> Vec<HeadingDescriptor> {
        match self {
            Self::Html(source) => source.headings(),
            Self::Markdown(source) => source.headings(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(DocumentKind::from_path(Path::new("a/post.html")), DocumentKind::Html);
        assert_eq!(DocumentKind::from_path(Path::new("post.HTM")), DocumentKind::Html);
        assert_eq!(DocumentKind::from_path(Path::new("post.mdx")), DocumentKind::Markdown);
        assert_eq!(DocumentKind::from_path(Path::new("README")), DocumentKind::Markdown);
    }

    #[test]
    fn test_load_dispatches_on_extension() {
        let temp = TempDir::new().unwrap();
        let html = temp.path().join("index.html");
        let md = temp.path().join("index.md");
        std::fs::write(&html, "<h2 id=\"a\">A</h2>").unwrap();
        std::fs::write(&md, "## A\n").unwrap();

        let doc = Document::load(&html).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Html);
        assert_eq!(doc.headings()[0].id.as_deref(), Some("a"));

        let doc = Document::load(&md).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Markdown);
        assert_eq!(doc.headings()[0].title, "A");
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = Document::load(&temp.path().join("gone.md")).unwrap_err();
        assert!(matches!(err, SourceError::Io(..)));
        assert!(format!("{err}").contains("gone.md"));
    }
}
