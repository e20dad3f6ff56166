//! Brace-depth counting
//!
//! Depth is inferred purely from `{` and `}` characters. Braces inside strings,
//! comments, or character literals count the same as any other brace.

/// Net brace change of one line: `{` count minus `}` count
#[must_use]
pub fn brace_delta(line: &str) -> i64 {
    line.bytes().fold(0, |acc, b| match b {
        b'{' => acc + 1,
        b'}' => acc - 1,
        _ => acc,
    })
}

/// Running brace depth with a one-line lag.
///
/// [`DepthCounter::advance`] returns the depth *before* the line's own braces are
/// applied, so the value reported for line `i` covers lines `1..i` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthCounter {
    depth: i64,
}

impl DepthCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current depth (sum of all deltas seen so far)
    #[must_use]
    pub fn depth(&self) -> i64 {
        self.depth
    }

    /// Report the depth for `line`, then fold its braces into the counter
    pub fn advance(&mut self, line: &str) -> i64 {
        let before = self.depth;
        self.depth += brace_delta(line);
        before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brace_delta() {
        assert_eq!(brace_delta("fn main() {"), 1);
        assert_eq!(brace_delta("}"), -1);
        assert_eq!(brace_delta("} else {"), 0);
        assert_eq!(brace_delta("let x = 1;"), 0);
        assert_eq!(brace_delta("{{{"), 3);
    }

    #[test]
    fn test_braces_in_strings_are_counted() {
        assert_eq!(brace_delta(r#"println!("{{");"#), 2);
        assert_eq!(brace_delta("// }"), -1);
    }

    #[test]
    fn test_non_ascii_line() {
        assert_eq!(brace_delta("let s = \"é{ü\";"), 1);
    }

    #[test]
    fn test_counter_lags_one_line() {
        let mut counter = DepthCounter::new();
        assert_eq!(counter.advance("int main() {"), 0);
        assert_eq!(counter.advance("  return 0;"), 1);
        assert_eq!(counter.advance("}"), 1);
        assert_eq!(counter.depth(), 0);
    }

    #[test]
    fn test_counter_goes_negative() {
        let mut counter = DepthCounter::new();
        assert_eq!(counter.advance("}"), 0);
        assert_eq!(counter.advance("}"), -1);
        assert_eq!(counter.depth(), -2);
    }
}
