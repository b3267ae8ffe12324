//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, help
//! text and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

pub const DEFAULT_SPECIFICATION: &str = "project-specification.json";

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "pomgen",
    bin_name = "pomgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate a Maven multi-module project from a JSON specification",
    long_about = "pomgen reads project-specification.json (creating any missing keys \
                  with their defaults) and writes the parent and module POMs, Gradle \
                  plugin builds, helper scripts and imported sources. Rerunning \
                  leaves unchanged files untouched.",
    after_help = "EXAMPLES:\n\
        \x20 pomgen\n\
        \x20 pomgen project-specification.json ../widget\n\
        \x20 pomgen -v --output-format json",
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub generate: GenerateArgs,
}

/// What to generate, and where.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Specification file name, relative to the base directory.
    #[arg(
        value_name = "CONFIG_FILE",
        default_value = DEFAULT_SPECIFICATION,
        help = "Project specification file, relative to BASE_DIRECTORY"
    )]
    pub config_file: PathBuf,

    /// Directory the project is generated into.
    #[arg(
        value_name = "BASE_DIRECTORY",
        default_value = ".",
        help = "Directory to generate the project into"
    )]
    pub base_directory: PathBuf,
}

impl GenerateArgs {
    /// `BASE_DIRECTORY/CONFIG_FILE`
    pub fn specification_path(&self) -> PathBuf {
        self.base_directory.join(&self.config_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positionals_default_to_current_directory() {
        let cli = Cli::parse_from(["pomgen"]);
        assert_eq!(cli.generate.config_file, Path::new(DEFAULT_SPECIFICATION));
        assert_eq!(cli.generate.base_directory, Path::new("."));
    }

    #[test]
    fn specification_resolves_under_base_directory() {
        let cli = Cli::parse_from(["pomgen", "spec.json", "../widget"]);
        assert_eq!(
            cli.generate.specification_path(),
            Path::new("../widget/spec.json")
        );
    }

    #[test]
    fn output_format_parses() {
        let cli = Cli::parse_from(["pomgen", "--output-format", "json"]);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["pomgen", "--quiet", "--verbose"]);
        assert!(result.is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::parse_from(["pomgen", "-vv"]);
        assert_eq!(cli.global.verbose, 2);
    }
}
