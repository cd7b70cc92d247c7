use crate::cli::Cli;
use crate::commands::{run_transform, RunOptions};
use crate::config::Config;
use anyhow::Result;
use clap::Parser;
use tracing::debug;

/// Runs arrow2fn with the given arguments, writing program output to stdout.
///
/// # Errors
///
/// Returns an error only if writing to stdout fails; every other failure is
/// reported on stderr and turned into exit code 1.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run arrow2fn with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if writing help or version text to `writer` fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["arrow2fn".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    // Let clap print help/version as intended, but captured by redirect
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(1);
                }
            }
        }
    };

    crate::logging::init(cli_var.output_args.verbose);
    debug!(version = env!("CARGO_PKG_VERSION"), "arrow2fn starting");

    let config = match &cli_var.config {
        Some(path) => match Config::load_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {:#}", anyhow::Error::from(e));
                return Ok(1);
            }
        },
        None => Config::load_from_path(&cli_var.input),
    };
    if let Some(path) = &config.config_file_path {
        debug!(path = %path.display(), "using config file");
    }

    // CLI flags take precedence over config values
    let mut options = config.transform_options();
    if let Some(siblings) = cli_var.rewrite.siblings {
        options.siblings = siblings.into();
    }
    if cli_var.rewrite.include_var {
        options.include_var = true;
    }
    debug!(?options, "resolved transform options");

    let run = RunOptions {
        input: cli_var.input,
        output: cli_var.output,
        dry_run: cli_var.output_args.dry_run,
        check: cli_var.output_args.check,
        json: cli_var.output_args.json,
    };

    match run_transform(&options, &run, writer) {
        Ok(code) => Ok(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            Ok(1)
        }
    }
}
