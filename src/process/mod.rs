//! Input processing.
//!
//! Each input goes through two steps:
//!
//! **Load:** read the whole file (or stdin) into a [`SourceText`](crate::source::SourceText).
//! A read failure stops here, before any output.
//!
//! **Annotate:** walk the lines in order and write one record per line,
//! tracking brace depth as described in [`crate::annotate`].
//!
//! The entry points are [`annotate_path`] for files and [`annotate_file`] for
//! any reader; both write to any `Write` implementation. [`annotate_all`]
//! handles several files, optionally in parallel.

pub mod batch;
pub mod pipeline;

pub use batch::{annotate_all, FileOutcome};
pub use pipeline::{annotate_file, annotate_path, annotate_source, Summary};
