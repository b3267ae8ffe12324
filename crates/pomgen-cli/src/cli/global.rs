//! Flags that shape how a run reports, independent of what it generates.
//!
//! Flattened into [`super::Cli`] so `-v`, `-q` and friends sit next to the
//! positional arguments.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for INFO (`-v`), twice for DEBUG (`-vv`), three times for
    /// TRACE (`-vvv`).  Conflicts with `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Warnings only
    -v      - Info level (lookups, specification summary)
    -vv     - Debug level (every command executed)
    -vvv    - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Suppress progress lines; warnings and errors still print.
    #[arg(
        short = 'q',
        long = "quiet",
        conflicts_with = "verbose",
        help = "Suppress progress output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>).
    #[arg(long = "no-color", env = "NO_COLOR", help = "Disable colored output")]
    pub no_color: bool,

    /// pomgen settings file (TOML).
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "pomgen settings file (TOML)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

/// How progress and the final summary are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human when stdout is a terminal, plain otherwise.
    #[default]
    Auto,
    /// Coloured lines with status symbols.
    Human,
    /// Uncoloured lines.
    Plain,
    /// Summary as one JSON object on stdout; progress lines are dropped.
    Json,
}
