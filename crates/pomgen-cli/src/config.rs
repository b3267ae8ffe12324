//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.
//! The CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables, `POMGEN__SECTION__KEY`
//! 2. The `--config` file, else `config.toml` in the user config dir
//! 3. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use pomgen_adapters::MAVEN_CENTRAL;

const ENV_PREFIX: &str = "POMGEN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub repository: RepositoryConfig,
    pub output: OutputConfig,
    pub render: RenderConfig,
    pub specification: SpecificationConfig,
}

/// Where release metadata is fetched from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl RepositoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Spaces per nesting level in generated POMs and Gradle scripts.
    pub indent: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificationConfig {
    /// Write a `documentation` entry beside every specification key.
    pub document: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            repository: RepositoryConfig {
                url: MAVEN_CENTRAL.into(),
                timeout_secs: 30,
            },
            output: OutputConfig { no_color: false },
            render: RenderConfig { indent: 4 },
            specification: SpecificationConfig { document: false },
        }
    }
}

impl AppConfig {
    /// Layer defaults, the settings file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is used
    /// only when present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("repository.url", defaults.repository.url)?
            .set_default("repository.timeout_secs", defaults.repository.timeout_secs)?
            .set_default("output.no_color", defaults.output.no_color)?
            .set_default("render.indent", defaults.render.indent as u64)?
            .set_default("specification.document", defaults.specification.document)?
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid settings in {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.pomgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "pomgen", "pomgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".pomgen.toml"))
    }
}
