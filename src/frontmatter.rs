//! Front matter detection for Markdown posts.
//!
//! Posts open with either a YAML-like block fenced by `---` or a TOML block
//! fenced by `+++`. Only the handful of fields this tool needs are read;
//! everything else is ignored.

use serde::Deserialize;

/// Which fence opened the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    Yaml,
    Toml,
}

/// A detected front matter block and the body after it.
#[derive(Debug, Clone, Copy)]
pub struct Frontmatter<'a> {
    pub raw: &'a str,
    pub body: &'a str,
    pub format: FrontmatterFormat,
    /// 1-based line of `content` on which `body` starts.
    pub body_line: usize,
}

/// Split `content` into front matter and body.
/// Returns `None` when the content does not start with a fenced block.
pub fn split(content: &str) -> Option<Frontmatter<'_>> {
    let trimmed = content.trim_start();

    let (fence, format) = if trimmed.starts_with("---") {
        ("\n---", FrontmatterFormat::Yaml)
    } else if trimmed.starts_with("+++") {
        ("\n+++", FrontmatterFormat::Toml)
    } else {
        return None;
    };

    let end = trimmed[3..].find(fence)?;
    let raw = trimmed[3..3 + end].trim();
    let body = trimmed[3 + end + fence.len()..].trim_start_matches(['\r', '\n']);

    // `body` is always a suffix of `content`
    let offset = content.len() - body.len();
    let body_line = content[..offset].matches('\n').count() + 1;

    Some(Frontmatter {
        raw,
        body,
        format,
        body_line,
    })
}

// ============================================================================
// PostMeta
// ============================================================================

/// The post fields read from front matter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostMeta {
    pub title: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub draft: bool,
}

/// Deserialize tags, treating a missing list as empty
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

impl PostMeta {
    /// Parse the fields out of a detected block.
    pub fn parse(frontmatter: &Frontmatter<'_>) -> Result<Self, toml::de::Error> {
        match frontmatter.format {
            FrontmatterFormat::Toml => toml::from_str(frontmatter.raw),
            FrontmatterFormat::Yaml => Ok(Self::parse_yaml_like(frontmatter.raw)),
        }
    }

    /// Parse simple YAML-like front matter (`key: value`).
    ///
    /// `tags` accepts a flow list (`[a, 'b']`), a comma list (`a, b`), a
    /// block list (`- a` lines under an empty `tags:`) or `null`.
    fn parse_yaml_like(content: &str) -> Self {
        let mut meta = Self::default();
        let mut in_tag_block = false;

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if in_tag_block {
                if let Some(item) = trimmed.strip_prefix('-') {
                    push_tag(&mut meta.tags, item);
                    continue;
                }
                in_tag_block = false;
            }

            let Some((key, value)) = trimmed.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match key.trim().to_lowercase().as_str() {
                "title" => meta.title = Some(unquote(value).to_string()),
                "date" => meta.date = Some(unquote(value).to_string()),
                "draft" => meta.draft = value.eq_ignore_ascii_case("true"),
                "tags" => {
                    if value.is_empty() {
                        in_tag_block = true;
                    } else if !matches!(value, "null" | "~" | "[]") {
                        let list = value
                            .strip_prefix('[')
                            .and_then(|v| v.strip_suffix(']'))
                            .unwrap_or(value);
                        for item in list.split(',') {
                            push_tag(&mut meta.tags, item);
                        }
                    }
                }
                _ => {}
            }
        }

        meta
    }
}

fn push_tag(tags: &mut Vec<String>, item: &str) {
    let tag = unquote(item.trim());
    if !tag.is_empty() {
        tags.push(tag.to_string());
    }
}

/// Strip one pair of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
