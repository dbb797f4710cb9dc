//! Tag index over a directory of posts.
//!
//! Counts tags across posts, ranks the most popular ones and filters posts
//! by tag.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::debug;
use crate::frontmatter::{self, PostMeta};

/// Extensions treated as posts.
const POST_EXTENSIONS: &[&str] = &["md", "mdx"];

#[derive(Debug, Error)]
pub enum TagError {
    #[error("failed to read {0}")]
    Io(PathBuf, #[source] io::Error),
    #[error("{0} has no front matter")]
    MissingFrontmatter(PathBuf),
    #[error("invalid front matter in {0}")]
    Frontmatter(PathBuf, #[source] toml::de::Error),
}

/// A post as far as the tag index is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub date: Option<String>,
    pub tags: Vec<String>,
}

impl Post {
    pub fn new(slug: impl Into<String>, tags: &[&str]) -> Self {
        let slug = slug.into();
        Self {
            title: slug.clone(),
            slug,
            date: None,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// Count how many posts carry each tag, most used first.
/// Tags with equal counts keep the order they were first seen in.
pub fn count_tags(posts: &[Post]) -> Vec<TagCount> {
    let mut slots: FxHashMap<&str, usize> = FxHashMap::default();
    let mut counts: Vec<TagCount> = Vec::new();

    for tag in posts.iter().flat_map(|post| &post.tags) {
        match slots.get(tag.as_str()) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                slots.insert(tag.as_str(), counts.len());
                counts.push(TagCount {
                    name: tag.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The `max` most used tags.
pub fn most_popular_tags(posts: &[Post], max: usize) -> Vec<TagCount> {
    let mut counts = count_tags(posts);
    counts.truncate(max);
    counts
}

pub fn filter_by_tag<'a>(posts: &'a [Post], tag: &str) -> Vec<&'a Post> {
    posts.iter().filter(|post| post.has_tag(tag)).collect()
}

// ============================================================================
// Loading
// ============================================================================

/// Load every post directly under `dir`, newest first.
///
/// A post is either `<slug>.md(x)` or a bundle `<slug>/index.md(x)`.
/// Drafts are skipped.
pub fn load_posts(dir: &Path) -> Result<Vec<Post>, TagError> {
    let entries = fs::read_dir(dir).map_err(|e| TagError::Io(dir.to_path_buf(), e))?;

    let mut posts = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| TagError::Io(dir.to_path_buf(), e))?.path();
        let Some((slug, file)) = post_file(&path) else {
            continue;
        };

        let content = fs::read_to_string(&file).map_err(|e| TagError::Io(file.clone(), e))?;
        let fm = frontmatter::split(&content)
            .ok_or_else(|| TagError::MissingFrontmatter(file.clone()))?;
        let meta = PostMeta::parse(&fm).map_err(|e| TagError::Frontmatter(file.clone(), e))?;

        if meta.draft {
            debug!("tags"; "skip draft {}", file.display());
            continue;
        }

        posts.push(Post {
            title: meta.title.unwrap_or_else(|| slug.clone()),
            slug,
            date: meta.date,
            tags: meta.tags,
        });
    }

    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
    Ok(posts)
}

/// Resolve `path` to `(slug, post file)` if it is a post.
fn post_file(path: &Path) -> Option<(String, PathBuf)> {
    if path.is_dir() {
        let slug = path.file_name()?.to_str()?.to_string();
        return POST_EXTENSIONS
            .iter()
            .map(|ext| path.join(format!("index.{ext}")))
            .find(|index| index.is_file())
            .map(|index| (slug, index));
    }

    let ext = path.extension()?.to_str()?;
    if !POST_EXTENSIONS.contains(&ext) {
        return None;
    }
    let slug = path.file_stem()?.to_str()?.to_string();
    Some((slug, path.to_path_buf()))
}
