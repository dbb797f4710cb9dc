//! Count phrases for log lines ("1 heading", "3 headings").

/// Format `count` with `noun`, appending `s` unless the count is exactly one.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
