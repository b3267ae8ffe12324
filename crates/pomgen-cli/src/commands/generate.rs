//! The one thing pomgen does: generate a project from its specification.
//!
//! Responsibility: build the production adapters from settings, hand them
//! to the core runner, and report the summary. No business logic lives
//! here.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use pomgen_adapters::{JsonStoreFactory, LocalFilesystem, MavenCentralLookup};
use pomgen_core::application::{Environment, ProjectRunner, RunSummary, ports::Filesystem};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    reporter::TerminalReporter,
};

#[instrument(skip_all, fields(base = %args.base_directory.display()))]
pub fn execute(args: &GenerateArgs, config: &AppConfig, output: &OutputManager) -> CliResult<RunSummary> {
    if config.render.indent == 0 {
        return Err(CliError::InvalidInput {
            message: "render.indent must be at least 1".into(),
        });
    }

    let spec_file = args.specification_path();
    debug!(
        spec = %spec_file.display(),
        repository = %config.repository.url,
        "Generating"
    );

    let reporter = Arc::new(TerminalReporter::new(output.clone()));
    let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let lookup = MavenCentralLookup::new(&config.repository.url, config.repository.timeout())?
        .with_notifications(reporter.clone());

    let environment = Environment::new(
        Arc::clone(&filesystem),
        Arc::new(JsonStoreFactory::new(filesystem)),
        reporter,
    );
    let summary = ProjectRunner::new(environment, Arc::new(lookup))
        .with_indent(config.render.indent)
        .with_documentation(config.specification.document)
        .run(&spec_file, &args.base_directory)?;

    report(&summary, output)?;
    info!(
        created = summary.created,
        modified = summary.modified,
        unchanged = summary.unchanged,
        "Generation finished"
    );
    Ok(summary)
}

fn report(summary: &RunSummary, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(summary)?;
        return Ok(());
    }
    output.success(&summary_line(summary))?;
    Ok(())
}

fn summary_line(summary: &RunSummary) -> String {
    format!(
        "{} created, {} modified, {} unchanged, {} directories created",
        summary.created, summary.modified, summary.unchanged, summary.directories_created
    )
}
