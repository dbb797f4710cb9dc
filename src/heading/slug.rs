//! Anchor slugs for headings that arrive without an id.

use deunicode::deunicode;

/// Turn heading text into an anchor fragment.
///
/// Follows the slugger used by common Markdown renderers: transliterate to
/// ASCII, lowercase, drop punctuation and turn each space into a dash.
/// Consecutive spaces therefore yield consecutive dashes (`a  b` → `a--b`).
///
/// # Examples
/// ```ignore
/// slugify_fragment("Hello, World!")   -> "hello-world"
/// slugify_fragment("Crème brûlée")    -> "creme-brulee"
/// slugify_fragment("use_state hooks") -> "use_state-hooks"
/// ```
pub fn slugify_fragment(text: &str) -> String {
    deunicode(text.trim())
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            _ => None,
        })
        .collect()
}
