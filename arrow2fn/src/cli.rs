use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

use crate::transform::SiblingPolicy;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.arrow2fn.toml):
  Searched for from the input file's directory upwards.

  [arrow2fn]
  siblings = \"preserve\"     # or \"drop\": fate of `a` in `const a = 1, f = () => 2;`
  include_var = false        # also rewrite `var` declarations

  A package.json with an \"arrow2fn\" object is read the same way.
";

/// `--siblings` values, mapped onto [`SiblingPolicy`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingsArg {
    /// Re-emit other bindings as their own declaration
    Preserve,
    /// Discard other bindings
    Drop,
}

impl From<SiblingsArg> for SiblingPolicy {
    fn from(arg: SiblingsArg) -> Self {
        match arg {
            SiblingsArg::Preserve => Self::Preserve,
            SiblingsArg::Drop => Self::Drop,
        }
    }
}

/// Options that change what gets rewritten.
#[derive(Args, Debug, Default, Clone)]
pub struct RewriteArgs {
    /// How to handle non-arrow bindings that share a statement with an arrow binding.
    #[arg(long, value_enum)]
    pub siblings: Option<SiblingsArg>,

    /// Also rewrite `var` declarations.
    #[arg(long)]
    pub include_var: bool,
}

/// Options for output mode and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputArgs {
    /// Print the rewritten source to stdout instead of writing OUTPUT.
    #[arg(long, conflicts_with_all = ["check", "json"])]
    pub dry_run: bool,

    /// Write nothing; exit with 1 if any declaration would be rewritten.
    #[arg(long)]
    pub check: bool,

    /// Print a JSON summary instead of the human-readable one.
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Command-line arguments for arrow2fn.
#[derive(Parser, Debug)]
#[command(
    name = "arrow2fn",
    version,
    about = "Rewrite arrow-function declarations into named function declarations",
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// JavaScript file to read (UTF-8).
    pub input: PathBuf,

    /// File to write the rewritten source to.
    /// Not needed with --check or --dry-run.
    #[arg(required_unless_present_any = ["check", "dry_run"])]
    pub output: Option<PathBuf>,

    /// Use this config file instead of searching for one.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Rewrite options (override the config file).
    #[command(flatten)]
    pub rewrite: RewriteArgs,

    /// Output options.
    #[command(flatten)]
    pub output_args: OutputArgs,
}
