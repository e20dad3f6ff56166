//! Input collection
//!
//! Expands command-line inputs into the list of files to annotate. Explicit
//! file paths are kept as given, even when they do not exist, so that a missing
//! input is reported rather than silently skipped. Directories contribute the
//! files whose extension is configured.

use std::path::{Component, Path, PathBuf};

use glob::Pattern;
use tracing::warn;
use walkdir::WalkDir;

/// Maximum directory depth for recursive traversal
const MAX_WALK_DEPTH: usize = 256;

/// How directory inputs are expanded
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Descend into subdirectories
    pub recursive: bool,
    /// Extensions (with or without leading dot) picked up from directories
    pub extensions: Vec<String>,
    /// Glob patterns of paths to skip
    pub exclude: Vec<String>,
}

/// Compile glob patterns, warning about (and dropping) invalid ones
#[must_use]
pub fn compile_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("ignoring invalid exclude pattern {p:?}: {e}");
                None
            }
        })
        .collect()
}

/// Collect all files to annotate, in input order
///
/// Files found inside one directory are sorted so the order does not depend on
/// the filesystem.
#[must_use]
pub fn collect_files(inputs: &[PathBuf], options: &CollectOptions) -> Vec<PathBuf> {
    let exclude_patterns = compile_patterns(&options.exclude);
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found = collect_dir(input, options, &exclude_patterns);
            found.sort();
            files.extend(found);
        } else if !is_excluded(input, &exclude_patterns) {
            files.push(input.clone());
        }
    }

    files
}

fn collect_dir(dir: &Path, options: &CollectOptions, exclude_patterns: &[Pattern]) -> Vec<PathBuf> {
    let keep = |path: &Path| {
        path.is_file()
            && has_extension(path, &options.extensions)
            && !is_excluded(path, exclude_patterns)
    };

    if options.recursive {
        // WalkDir reports symlink loops as errors when following links; those entries are skipped
        WalkDir::new(dir)
            .follow_links(true)
            .max_depth(MAX_WALK_DEPTH)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .map(walkdir::DirEntry::into_path)
            .filter(|path| keep(path.as_path()))
            .collect()
    } else {
        match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(std::result::Result::ok)
                .map(|entry| entry.path())
                .filter(|path| keep(path.as_path()))
                .collect(),
            Err(e) => {
                warn!("cannot list {}: {e}", dir.display());
                Vec::new()
            }
        }
    }
}

/// Check if a path matches any exclusion pattern
///
/// A pattern matches against the full path, the file name, or any single
/// path component.
#[must_use]
pub fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path.components().any(|component| match component {
                Component::Normal(c) => pattern.matches(&c.to_string_lossy()),
                _ => false,
            })
    })
}

/// Check if a file has one of the given extensions (leading dots are ignored)
#[must_use]
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|wanted| wanted.strip_prefix('.').unwrap_or(wanted) == ext)
        })
}
