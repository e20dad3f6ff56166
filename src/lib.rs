//! bracedepth - Annotate source lines with a running brace depth
//!
//! Every line is printed with its 1-based number, the brace depth before that
//! line, and a trimmed preview of its content. Depth is a plain count of `{`
//! minus `}`; strings and comments are not recognized.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod annotate;
pub mod cli;
pub mod config;
pub mod error;
pub mod inputs;
pub mod process;
pub mod source;

// Re-export commonly used types
pub use annotate::{Annotator, Record};
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::{AnnotateError, Result};
pub use source::SourceText;
