//! bracedepth - Annotate source lines with a running brace depth

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Context;
use bracedepth::inputs::{collect_files, CollectOptions};
use bracedepth::process::{annotate_all, annotate_file, FileOutcome};
use bracedepth::source::STDIN_NAME;
use bracedepth::{parse_args, CliArgs, Config, Result};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let args = parse_args();
    init_tracing(&args);

    let config = build_config(&args)?;

    let wants_stdin = args
        .inputs
        .iter()
        .any(|input| input.as_os_str() == STDIN_NAME);
    if wants_stdin {
        if args.inputs.len() > 1 {
            anyhow::bail!("stdin ({STDIN_NAME}) cannot be combined with other inputs");
        }
        return process_stdin(&config);
    }

    let inputs = if args.inputs.is_empty() {
        vec![config.input.clone()]
    } else {
        args.inputs.clone()
    };

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                warn!("failed to configure thread pool: {e}");
            }
        }
    }

    let options = CollectOptions {
        recursive: args.recursive,
        extensions: config.extensions.clone(),
        exclude: args.exclude.clone(),
    };
    let files = collect_files(&inputs, &options);
    if files.is_empty() {
        warn!("no input files found");
        return Ok(());
    }
    debug!(count = files.len(), "collected input files");

    let parallel = args.jobs != Some(1) && files.len() > 1;
    let outcomes = annotate_all(&files, &config, parallel);
    write_outcomes(outcomes, files.len() > 1)
}

/// Initialize tracing on stderr; `RUST_LOG` overrides the flag-derived level
fn init_tracing(args: &CliArgs) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if args.debug {
        "debug"
    } else if args.silent {
        "error"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .with_level(true)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Build configuration from an explicit or discovered config file plus CLI overrides
fn build_config(args: &CliArgs) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        debug!(path = %config_path.display(), "using explicit config file");
        Config::from_toml_file(config_path)
            .with_context(|| format!("failed to load config {}", config_path.display()))?
    } else {
        let cwd = std::env::current_dir().unwrap_or_default();
        Config::from_discovered_files(&cwd)
    };

    if let Some(width) = args.width {
        config.preview_width = width;
    }
    for ext in &args.extensions {
        if !config.extensions.contains(ext) {
            config.extensions.push(ext.clone());
        }
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        debug!("configuration:\n{}", config.to_toml_string()?);
    }

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Annotate stdin to stdout
fn process_stdin(config: &Config) -> Result<()> {
    let stdin = io::stdin().lock();
    let mut stdout = BufWriter::new(io::stdout().lock());
    annotate_file(stdin, &mut stdout, config, STDIN_NAME)?;
    stdout.flush()?;
    Ok(())
}

/// Write each file's records in input order; headers separate multiple files
fn write_outcomes(outcomes: Vec<FileOutcome>, with_headers: bool) -> Result<()> {
    let total = outcomes.len();
    let mut stdout = BufWriter::new(io::stdout().lock());
    let mut failures = Vec::new();
    let mut written = 0usize;

    for outcome in outcomes {
        match outcome.result {
            Ok(_) => {
                if with_headers {
                    if written > 0 {
                        writeln!(stdout)?;
                    }
                    writeln!(stdout, "==> {} <==", outcome.path.display())?;
                }
                stdout.write_all(&outcome.output)?;
                written += 1;
            }
            Err(e) => failures.push((outcome.path, e)),
        }
    }
    stdout.flush()?;

    if failures.is_empty() {
        if with_headers {
            info!("annotated {written} files");
        }
        return Ok(());
    }

    if total == 1 {
        if let Some((_, e)) = failures.pop() {
            return Err(e.into());
        }
    }

    for (path, e) in &failures {
        error!("{}: {e}", path.display());
    }
    let failed: Vec<PathBuf> = failures.into_iter().map(|(path, _)| path).collect();
    anyhow::bail!(
        "{} of {total} inputs could not be annotated (first: {})",
        failed.len(),
        failed[0].display()
    )
}
