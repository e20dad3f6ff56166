//! Loading of source text.
//!
//! A [`SourceText`] is read in one piece before any annotation happens, so a
//! failed read never produces partial output.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::AnnotateError;

/// Display name used for standard input
pub const STDIN_NAME: &str = "-";

/// The full contents of one input, split into lines on demand
#[derive(Debug, Clone)]
pub struct SourceText {
    name: PathBuf,
    text: String,
}

impl SourceText {
    /// Wrap already-loaded text
    pub fn new(name: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a whole file, refusing files larger than `max_size` bytes
    pub fn from_path(path: &Path, max_size: u64) -> Result<Self, AnnotateError> {
        let unavailable = |source| AnnotateError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        };

        // Check size BEFORE reading to avoid loading huge files
        let size = std::fs::metadata(path).map_err(unavailable)?.len();
        if size > max_size {
            return Err(AnnotateError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit: max_size,
            });
        }

        let text = std::fs::read_to_string(path).map_err(unavailable)?;
        Ok(Self::new(path, text))
    }

    /// Read everything from `reader` (used for stdin)
    pub fn from_reader<R: Read>(
        reader: R,
        name: impl Into<PathBuf>,
        max_size: u64,
    ) -> Result<Self, AnnotateError> {
        let name = name.into();
        let unavailable = |source| AnnotateError::InputUnavailable {
            path: name.clone(),
            source,
        };

        // Read one byte past the limit so oversized input is detected without reading it all
        let mut bytes = Vec::new();
        reader
            .take(max_size.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(unavailable)?;
        let size = bytes.len() as u64;
        if size > max_size {
            return Err(AnnotateError::TooLarge {
                path: name,
                size,
                limit: max_size,
            });
        }

        let text = String::from_utf8(bytes)
            .map_err(|e| unavailable(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        Ok(Self { name, text })
    }

    #[must_use]
    pub fn name(&self) -> &Path {
        &self.name
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines in input order, terminators stripped
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        split_lines(&self.text)
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        split_lines(&self.text).count()
    }
}

/// Split on `\r\n`, `\n`, or a lone `\r`.
///
/// A terminator at the very end does not start another line, so `"a\n"` and
/// `"a"` both hold one line and `""` holds none.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(end) = rest.find(|c: char| c == '\r' || c == '\n') else {
            let line = rest;
            rest = "";
            return Some(line);
        };
        let line = &rest[..end];
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
        Some(line)
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_lines_without_trailing_newline() {
        let source = SourceText::new("a.rs", "fn a() {\n}");
        assert_eq!(source.lines().collect::<Vec<_>>(), vec!["fn a() {", "}"]);
        assert_eq!(source.line_count(), 2);
    }

    #[test]
    fn test_crlf_lines() {
        let source = SourceText::new("a.rs", "x {\r\n}\r\n");
        assert_eq!(source.lines().collect::<Vec<_>>(), vec!["x {", "}"]);
    }

    #[test]
    fn test_lone_carriage_return_ends_a_line() {
        let source = SourceText::new("mac.rs", "a {\rb\r}\r");
        assert_eq!(source.lines().collect::<Vec<_>>(), vec!["a {", "b", "}"]);
        assert_eq!(source.line_count(), 3);
    }

    #[test]
    fn test_mixed_terminators() {
        let lines: Vec<&str> = split_lines("a\r\nb\rc\nd").collect();
        assert_eq!(lines, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let lines: Vec<&str> = split_lines("\n\r\r\n\nx").collect();
        assert_eq!(lines, vec!["", "", "", "", "x"]);
    }

    #[test]
    fn test_empty_source_has_no_lines() {
        let source = SourceText::new("empty.rs", "");
        assert_eq!(source.line_count(), 0);
    }

    #[test]
    fn test_missing_file_is_input_unavailable() {
        let err = SourceText::from_path(Path::new("does/not/exist.rs"), u64::MAX).unwrap_err();
        assert!(err.is_input_unavailable());
        assert!(err.to_string().contains("does/not/exist.rs"));
    }

    #[test]
    fn test_reader_rejects_invalid_utf8() {
        let bytes: &[u8] = &[0x66, 0x6f, 0xff, 0xfe];
        let err = SourceText::from_reader(Cursor::new(bytes), STDIN_NAME, u64::MAX).unwrap_err();
        assert!(err.is_input_unavailable());
    }

    #[test]
    fn test_reader_size_limit() {
        let err = SourceText::from_reader(Cursor::new("0123456789"), STDIN_NAME, 4).unwrap_err();
        assert!(matches!(err, AnnotateError::TooLarge { limit: 4, .. }));

        let ok = SourceText::from_reader(Cursor::new("0123"), STDIN_NAME, 4).unwrap();
        assert_eq!(ok.text(), "0123");
    }

    #[test]
    fn test_reader_size_limit_inside_multibyte_char() {
        // The limit falls in the middle of the second "é"
        let err = SourceText::from_reader(Cursor::new("éééé"), STDIN_NAME, 3).unwrap_err();
        assert!(matches!(err, AnnotateError::TooLarge { size: 4, limit: 3, .. }));
    }
}
