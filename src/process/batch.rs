//! Multi-file annotation
//!
//! Each file is annotated into its own buffer, so files can be processed on
//! the rayon pool while the caller still writes results in input order.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::pipeline::{annotate_path, Summary};
use crate::config::Config;
use crate::error::AnnotateError;

/// Result of annotating one file
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Rendered records; empty when loading failed
    pub output: Vec<u8>,
    pub result: Result<Summary, AnnotateError>,
}

impl FileOutcome {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

fn annotate_one(path: &Path, config: &Config) -> FileOutcome {
    let mut output = Vec::new();
    let result = annotate_path(path, &mut output, config);
    if result.is_err() {
        output.clear();
    }
    FileOutcome {
        path: path.to_path_buf(),
        output,
        result,
    }
}

/// Annotate every file, returning outcomes in the same order as `files`
#[must_use]
pub fn annotate_all(files: &[PathBuf], config: &Config, parallel: bool) -> Vec<FileOutcome> {
    if parallel {
        files
            .par_iter()
            .map(|path| annotate_one(path, config))
            .collect()
    } else {
        files.iter().map(|path| annotate_one(path, config)).collect()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = TempDir::new().unwrap();
        let mut files = Vec::new();
        for i in 0..16 {
            let path = dir.path().join(format!("f{i:02}.rs"));
            let body = format!("fn f{i}() {{\n{}\n}}\n", "    {\n".repeat(i));
            std::fs::write(&path, body).unwrap();
            files.push(path);
        }

        let config = Config::default();
        let sequential = annotate_all(&files, &config, false);
        let parallel = annotate_all(&files, &config, true);

        assert_eq!(sequential.len(), parallel.len());
        for (s, p) in sequential.iter().zip(&parallel) {
            assert_eq!(s.path, p.path);
            assert_eq!(s.output, p.output);
        }
    }

    #[test]
    fn test_failure_does_not_stop_others() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.rs");
        std::fs::write(&good, "x {\n}\n").unwrap();
        let missing = dir.path().join("missing.rs");

        let outcomes = annotate_all(&[missing.clone(), good.clone()], &Config::default(), true);
        assert_eq!(outcomes[0].path, missing);
        assert!(!outcomes[0].is_ok());
        assert!(outcomes[0].output.is_empty());
        assert!(outcomes[1].is_ok());
        assert_eq!(
            String::from_utf8(outcomes[1].output.clone()).unwrap(),
            "  1 [ 0] x {\n  2 [ 1] }\n"
        );
    }
}
