//! Command-line interface for bracedepth.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to annotate (`-` for stdin)
    pub inputs: Vec<PathBuf>,

    /// Characters of trimmed content shown per line
    pub width: Option<usize>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Extra file extensions picked up from directories
    pub extensions: Vec<String>,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Enable debug output
    pub debug: bool,

    /// Silent mode (no progress or summary on stderr)
    pub silent: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("bracedepth")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print each line with its number and running brace depth")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to annotate, or - for stdin [default: from config]")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("width")
                .short('w')
                .long("width")
                .help("Characters of trimmed line content to show [default: 40]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Descend into directories recursively")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching pattern (glob syntax, can be repeated)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("ext")
                .short('x')
                .long("ext")
                .help("Additional file extension for directory inputs (can be repeated)")
                .value_name("EXT")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output on stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (no progress or summary on stderr)")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        width: matches.get_one::<usize>("width").copied(),
        recursive: matches.get_flag("recursive"),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        extensions: matches
            .get_many::<String>("ext")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        jobs: matches.get_one::<usize>("jobs").copied(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        debug: matches.get_flag("debug"),
        silent: matches.get_flag("silent"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_builds() {
        let cmd = build_cli();
        assert_eq!(cmd.get_name(), "bracedepth");
        cmd.debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let args = parse_args_from(vec!["bracedepth"]);
        assert!(args.inputs.is_empty());
        assert_eq!(args.width, None);
        assert_eq!(args.jobs, None);
        assert!(!args.recursive);
        assert!(!args.debug);
        assert!(!args.silent);
    }

    #[test]
    fn test_multiple_inputs() {
        let args = parse_args_from(vec!["bracedepth", "a.rs", "src/"]);
        assert_eq!(
            args.inputs,
            vec![PathBuf::from("a.rs"), PathBuf::from("src/")]
        );
    }

    #[test]
    fn test_stdin_input() {
        let args = parse_args_from(vec!["bracedepth", "-"]);
        assert_eq!(args.inputs, vec![PathBuf::from("-")]);
    }

    #[test]
    fn test_width() {
        let args = parse_args_from(vec!["bracedepth", "-w", "60", "a.rs"]);
        assert_eq!(args.width, Some(60));
        let args = parse_args_from(vec!["bracedepth", "--width", "12", "a.rs"]);
        assert_eq!(args.width, Some(12));
    }

    #[test]
    fn test_exclude_multiple() {
        let args = parse_args_from(vec![
            "bracedepth",
            "-r",
            "-e",
            "target",
            "--exclude",
            "*_test.rs",
            "src/",
        ]);
        assert!(args.recursive);
        assert_eq!(args.exclude, vec!["target", "*_test.rs"]);
    }

    #[test]
    fn test_extensions_multiple() {
        let args = parse_args_from(vec!["bracedepth", "-x", "c", "--ext", ".h", "src/"]);
        assert_eq!(args.extensions, vec!["c", ".h"]);
    }

    #[test]
    fn test_jobs_and_config() {
        let args = parse_args_from(vec!["bracedepth", "-j", "1", "-c", "cfg.toml", "a.rs"]);
        assert_eq!(args.jobs, Some(1));
        assert_eq!(args.config, Some(PathBuf::from("cfg.toml")));
    }

    #[test]
    fn test_debug_and_silent_flags() {
        let args = parse_args_from(vec!["bracedepth", "-D", "-S", "a.rs"]);
        assert!(args.debug);
        assert!(args.silent);
    }
}
