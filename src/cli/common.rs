//! Common utilities shared across CLI commands.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::TocConfig;
use crate::heading::{Outline, extract_outline};
use crate::log;
use crate::source::{Document, DocumentKind};

/// Load `path` and extract its outline with the configured exclusions.
pub fn load_outline(path: &Path, config: &TocConfig) -> Result<(DocumentKind, Outline)> {
    let document = Document::load(path)?;
    let outline = extract_outline(&document, &config.outline);
    Ok((document.kind(), outline))
}

/// Warn about `h3`s that precede every `h2`.
pub fn report_orphans(outline: &Outline, path: &Path) {
    for orphan in outline.orphans() {
        log!(
            "warning";
            "`{}` in {} is an h3 before any h2, left out of the outline",
            orphan.title,
            path.display()
        );
    }
}

/// Write `value` as one JSON document to `out`.
pub fn write_json<W, T>(out: &mut W, value: &T, pretty: bool) -> Result<()>
where
    W: Write + ?Sized,
    T: Serialize + ?Sized,
{
    let formatted = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;

    writeln!(out, "{formatted}")?;
    Ok(())
}
