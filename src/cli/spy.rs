//! `spy` command: simulate scrolling through a post.
//!
//! Each scroll position is fed to a [`ScrollTrigger`] and allowed to settle
//! for one debounce interval before the active heading is printed.

use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};

use super::SpyArgs;
use super::common::{load_outline, report_orphans};
use crate::config::TocConfig;
use crate::heading::Outline;
use crate::log;
use crate::source::DocumentKind;
use crate::spy::{ScrollSpy, ScrollTrigger, Viewport};
use crate::utils::plural::plural_count;

pub fn run_spy(args: &SpyArgs, config: &TocConfig) -> Result<()> {
    simulate(args, config, &mut io::stdout().lock())
}

/// One `<scroll_y> <active heading>` line per scroll position.
fn simulate<W: Write + ?Sized>(args: &SpyArgs, config: &TocConfig, out: &mut W) -> Result<()> {
    if !args.viewport_height.is_finite() || args.viewport_height <= 0.0 {
        bail!("--viewport-height must be a positive number of pixels");
    }

    let (kind, outline) = load_outline(&args.file, config)?;
    report_orphans(&outline, &args.file);

    if outline.is_empty() {
        log!("spy"; "no h2/h3 headings in {}", args.file.display());
        return Ok(());
    }

    let offsets = match &args.offsets {
        Some(offsets) => offsets.clone(),
        None => estimate_offsets(&outline, kind, args.line_height, &args.file)?,
    };

    let mut trigger = ScrollTrigger::new(&outline, &offsets, &config.spy)
        .with_context(|| format!("cannot track {}", args.file.display()))?;
    let spy = ScrollSpy::mount(&outline, &trigger);

    log!(
        "spy";
        "{} positions over {} ({:?} policy)",
        args.scroll.len(),
        plural_count(outline.len(), "heading"),
        config.spy.policy
    );

    let mut now = Instant::now();
    for &scroll_y in &args.scroll {
        trigger.on_scroll(Viewport::new(scroll_y, args.viewport_height), now);
        if let Some(wait) = trigger.next_deadline(now) {
            now += wait;
        }
        trigger.poll(now);

        let active = spy
            .active_heading(&outline)
            .map(|heading| format!("{} {}", heading.title, heading.url()))
            .unwrap_or_else(|| "(none)".to_string());
        writeln!(out, "{scroll_y:>10} {active}")?;
    }

    Ok(())
}

/// Approximate offsets as `(line - 1) * line_height` from Markdown source
/// lines.
fn estimate_offsets(
    outline: &Outline,
    kind: DocumentKind,
    line_height: f64,
    path: &Path,
) -> Result<Vec<f64>> {
    if kind == DocumentKind::Html {
        bail!(
            "{} is rendered HTML; pass heading offsets with --offsets",
            path.display()
        );
    }
    if !line_height.is_finite() || line_height <= 0.0 {
        bail!("--line-height must be a positive number of pixels");
    }

    outline
        .headings()
        .iter()
        .map(|heading| {
            heading
                .line
                .map(|line| line.saturating_sub(1) as f64 * line_height)
        })
        .collect::<Option<Vec<_>>>()
        .with_context(|| format!("no source lines for headings in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::HeadingDescriptor;
    use crate::heading::extract_headings;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_estimate_offsets_from_lines() {
        let outline = extract_headings(&vec![
            HeadingDescriptor::h2("a", "A").with_line(1),
            HeadingDescriptor::h2("b", "B").with_line(41),
        ]);
        let offsets =
            estimate_offsets(&outline, DocumentKind::Markdown, 20.0, Path::new("p.md")).unwrap();
        assert_eq!(offsets, vec![0.0, 800.0]);
    }

    #[test]
    fn test_html_requires_offsets() {
        let outline = extract_headings(&vec![HeadingDescriptor::h2("a", "A")]);
        let err = estimate_offsets(&outline, DocumentKind::Html, 20.0, Path::new("p.html"))
            .unwrap_err();
        assert!(err.to_string().contains("--offsets"));
    }

    #[test]
    fn test_missing_lines() {
        let outline = extract_headings(&vec![HeadingDescriptor::h2("a", "A")]);
        assert!(
            estimate_offsets(&outline, DocumentKind::Markdown, 20.0, Path::new("p.md")).is_err()
        );
    }

    fn spy_args(file: &Path, scroll: &[f64]) -> SpyArgs {
        SpyArgs {
            file: file.to_path_buf(),
            scroll: scroll.to_vec(),
            offsets: None,
            viewport_height: 800.0,
            line_height: 20.0,
            policy: None,
        }
    }

    #[test]
    fn test_simulate_prints_active_heading_per_position() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.md");
        // Headings on lines 1, 41 and 81: offsets 0, 800 and 1600
        let mut content = String::from("## Intro\n");
        content.push_str(&"\n".repeat(39));
        content.push_str("## Setup\n");
        content.push_str(&"\n".repeat(39));
        content.push_str("## Wrap up\n");
        fs::write(&path, content).unwrap();

        // Band is [scroll_y + 110, scroll_y + 480)
        let args = spy_args(&path, &[0.0, 500.0, 1400.0, 5000.0]);
        let mut out = Vec::new();
        simulate(&args, &TocConfig::default(), &mut out).unwrap();

        let lines: Vec<_> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| line.trim_start().to_string())
            .collect();
        assert_eq!(
            lines,
            vec![
                "0 (none)",
                "500 Setup #setup",
                "1400 Wrap up #wrap-up",
                "5000 Wrap up #wrap-up",
            ]
        );
    }

    #[test]
    fn test_simulate_rejects_unordered_offsets() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.html");
        fs::write(&path, "<h2 id=\"a\">A</h2><h2 id=\"b\">B</h2>").unwrap();

        let mut args = spy_args(&path, &[0.0]);
        assert!(simulate(&args, &TocConfig::default(), &mut Vec::new()).is_err());

        args.offsets = Some(vec![900.0, 200.0]);
        let err = simulate(&args, &TocConfig::default(), &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("above the heading before it"));
    }
}
