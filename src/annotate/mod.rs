//! Line annotation.
//!
//! This module contains the core of bracedepth:
//! - [`depth`]: counts `{`/`}` per line and keeps the lagged running depth
//! - [`record`]: renders one line as `"{number:>3} [{depth:>2}] {preview}"`
//!
//! [`Annotator`] ties the two together: it walks lines in order and yields one
//! [`Record`] per line.

pub mod depth;
pub mod record;

pub use depth::{brace_delta, DepthCounter};
pub use record::{preview, Record, DEFAULT_PREVIEW_WIDTH};

/// Walks lines in order, producing one [`Record`] per line
#[derive(Debug, Clone)]
pub struct Annotator {
    counter: DepthCounter,
    next_number: usize,
    width: usize,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_WIDTH)
    }
}

impl Annotator {
    /// Create an annotator showing at most `width` characters of each line
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            counter: DepthCounter::new(),
            next_number: 1,
            width,
        }
    }

    /// Render `line` with the current depth, then apply its braces
    pub fn annotate<'a>(&mut self, line: &'a str) -> Record<'a> {
        let depth = self.counter.advance(line);
        let record = Record::new(self.next_number, depth, line, self.width);
        self.next_number += 1;
        record
    }

    /// Number of lines annotated so far
    #[must_use]
    pub fn lines_seen(&self) -> usize {
        self.next_number - 1
    }

    /// Depth after every line seen so far
    #[must_use]
    pub fn depth(&self) -> i64 {
        self.counter.depth()
    }
}
