//! One complete generation run: load, generate, execute.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::{
        Environment, Outcome,
        ports::VersionLookup,
        services::{CachingVersionLookup, Generator, SourceImporter, SpecificationLoader, VersionResolver},
    },
    error::PomgenResult,
};

/// Tally of command outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub created: usize,
    pub modified: usize,
    pub unchanged: usize,
    pub directories_created: usize,
    pub config_values: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Created => self.created += 1,
            Outcome::Modified => self.modified += 1,
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::DirectoryCreated => self.directories_created += 1,
            Outcome::DirectoryExisted => {}
            Outcome::ConfigStored => self.config_values += 1,
        }
    }

    /// True when nothing on disk had to change.
    pub fn is_converged(&self) -> bool {
        self.created == 0 && self.modified == 0 && self.directories_created == 0
    }
}

pub struct ProjectRunner {
    environment: Environment,
    lookup: Arc<dyn VersionLookup>,
    indent: usize,
    document: bool,
}

impl ProjectRunner {
    pub fn new(environment: Environment, lookup: Arc<dyn VersionLookup>) -> Self {
        Self {
            environment,
            lookup,
            indent: 4,
            document: false,
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Store documentation beside each specification key.
    pub fn with_documentation(mut self, document: bool) -> Self {
        self.document = document;
        self
    }

    /// Generate the project described by `spec_file` into `base`.
    ///
    /// Commands run in order and the first failure aborts the run; files
    /// already written stay in place.
    #[instrument(skip_all, fields(spec = %spec_file.display(), base = %base.display()))]
    pub fn run(&self, spec_file: &Path, base: &Path) -> PomgenResult<RunSummary> {
        let env = &self.environment;
        env.filesystem.create_dir_all(base)?;

        let loader = SpecificationLoader::new(Arc::clone(&env.filesystem), Arc::clone(&env.stores))
            .with_documentation(self.document);
        let project = loader.load_primary(spec_file, base)?;

        let versions = VersionResolver::new(Arc::new(CachingVersionLookup::new(Arc::clone(&self.lookup))));
        let sources = SourceImporter::new(
            Arc::clone(&env.filesystem),
            Arc::new(loader),
            Arc::clone(&env.notifications),
        );
        let commands = Generator::new(versions, sources, base)
            .with_indent(self.indent)
            .generate(&project)?;

        let mut summary = RunSummary::default();
        for command in &commands {
            summary.record(command.execute(env)?);
        }
        info!(?summary, "Run complete");
        Ok(summary)
    }
}
