//! Annotation pipeline
//!
//! Loads one input completely, then writes one record per line:
//! - Load: the whole input is read before anything is written
//! - Annotate: each line is rendered with the depth before its own braces

use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::annotate::Annotator;
use crate::config::Config;
use crate::error::AnnotateError;
use crate::source::SourceText;

/// Outcome of annotating one input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of records written (equals the number of input lines)
    pub lines: usize,
    /// Depth after the last line
    pub final_depth: i64,
}

/// Write one record per line of `source` to `output`
pub fn annotate_source<W: Write>(
    source: &SourceText,
    output: &mut W,
    width: usize,
) -> Result<Summary, AnnotateError> {
    let mut annotator = Annotator::new(width);
    for line in source.lines() {
        let record = annotator.annotate(line);
        writeln!(output, "{record}")?;
    }

    let summary = Summary {
        lines: annotator.lines_seen(),
        final_depth: annotator.depth(),
    };
    debug!(
        input = %source.name().display(),
        lines = summary.lines,
        final_depth = summary.final_depth,
        "annotated"
    );
    Ok(summary)
}

/// Read all of `input`, then annotate it
///
/// `name` identifies the input in error messages.
pub fn annotate_file<R: Read, W: Write>(
    input: R,
    output: &mut W,
    config: &Config,
    name: &str,
) -> Result<Summary, AnnotateError> {
    let source = SourceText::from_reader(input, name, config.max_file_size)?;
    annotate_source(&source, output, config.preview_width)
}

/// Annotate the file at `path`
///
/// Nothing is written if the file cannot be loaded.
pub fn annotate_path<W: Write>(
    path: &Path,
    output: &mut W,
    config: &Config,
) -> Result<Summary, AnnotateError> {
    let source = SourceText::from_path(path, config.max_file_size)?;
    annotate_source(&source, output, config.preview_width)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run(input: &str, config: &Config) -> (String, Summary) {
        let mut output = Vec::new();
        let summary = annotate_file(Cursor::new(input), &mut output, config, "test.rs").unwrap();
        (String::from_utf8(output).unwrap(), summary)
    }

    #[test]
    fn test_annotate_small_program() {
        let (result, summary) = run("int main() {\n  return 0;\n}\n", &Config::default());
        assert_eq!(result, "  1 [ 0] int main() {\n  2 [ 1] return 0;\n  3 [ 1] }\n");
        assert_eq!(summary, Summary { lines: 3, final_depth: 0 });
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let (result, summary) = run("", &Config::default());
        assert!(result.is_empty());
        assert_eq!(summary.lines, 0);
    }

    #[test]
    fn test_record_count_matches_line_count() {
        let input = "a {\n\n\nb }\nc";
        let (result, summary) = run(input, &Config::default());
        assert_eq!(result.lines().count(), 5);
        assert_eq!(summary.lines, 5);
    }

    #[test]
    fn test_custom_preview_width() {
        let config = Config {
            preview_width: 4,
            ..Default::default()
        };
        let (result, _) = run("struct Foo {\n", &config);
        assert_eq!(result, "  1 [ 0] stru\n");
    }

    #[test]
    fn test_unclosed_braces_leave_positive_depth() {
        let (result, summary) = run("fn a() {\n    if x {\n", &Config::default());
        assert_eq!(result, "  1 [ 0] fn a() {\n  2 [ 1] if x {\n");
        assert_eq!(summary.final_depth, 2);
    }

    #[test]
    fn test_invalid_utf8_writes_nothing() {
        let mut output = Vec::new();
        let bytes: &[u8] = b"fn a() {\n\xff\n}\n";
        let err =
            annotate_file(Cursor::new(bytes), &mut output, &Config::default(), "bad.rs").unwrap_err();
        assert!(err.is_input_unavailable());
        assert!(output.is_empty());
    }
}
