//! Rendered records: one output line per input line.

use std::fmt;

/// Default number of characters of trimmed content shown per line
pub const DEFAULT_PREVIEW_WIDTH: usize = 40;

/// Whitespace as trimmed from previews: Unicode whitespace plus the
/// information separators `\x1c`..=`\x1f`
fn is_trimmed(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// First `width` characters of `line` with surrounding whitespace removed
#[must_use]
pub fn preview(line: &str, width: usize) -> &str {
    let trimmed = line.trim_matches(is_trimmed);
    match trimmed.char_indices().nth(width) {
        Some((end, _)) => &trimmed[..end],
        None => trimmed,
    }
}

/// One annotated line, rendered as `"{number:>3} [{depth:>2}] {preview}"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// 1-based line number
    pub number: usize,
    /// Depth before this line's braces were counted
    pub depth: i64,
    pub preview: &'a str,
}

impl<'a> Record<'a> {
    #[must_use]
    pub fn new(number: usize, depth: i64, line: &'a str, width: usize) -> Self {
        Self {
            number,
            depth,
            preview: preview(line, width),
        }
    }
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3} [{:>2}] {}", self.number, self.depth, self.preview)
    }
}
