//! Error types and result aliases for bracedepth.
//!
//! This module defines the error handling infrastructure:
//! - [`AnnotateError`]: failures of the annotation library (unreadable input, output sink)
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used by the application layer

use std::io;
use std::path::PathBuf;

use anyhow::Result as AnyhowResult;
use thiserror::Error;

pub type Result<T> = AnyhowResult<T>;

/// Errors raised while loading or annotating a single input
#[derive(Debug, Error)]
pub enum AnnotateError {
    /// The input does not exist, is not readable, or is not UTF-8 text
    #[error("input unavailable: {}: {source}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("input too large: {} is {size} bytes (limit {limit})", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("failed to write annotation: {0}")]
    Output(#[from] io::Error),
}

impl AnnotateError {
    /// Whether this error means the input could not be loaded at all
    #[must_use]
    pub fn is_input_unavailable(&self) -> bool {
        matches!(self, Self::InputUnavailable { .. })
    }
}
