//! Turns a [`Project`] into the ordered list of [`Command`]s for one run.
//!
//! Building the list performs no writes: remote version lookups and reads
//! of foreign projects happen here, every write happens when the commands
//! are executed.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{info, instrument};

use crate::{
    application::{
        Command,
        services::{GradleScriptBuilder, MavenPomBuilder, SourceImporter, VersionResolver, helper_file_commands},
    },
    domain::{GradlePluginSpec, KeyPath, MarkupRenderer, Project},
    error::PomgenResult,
};

pub const CODE_STRUCTURE_CONFIG: &str = "code-structure-config.json";

pub struct Generator {
    poms: MavenPomBuilder,
    gradle: GradleScriptBuilder,
    sources: SourceImporter,
    renderer: MarkupRenderer,
    base: PathBuf,
}

impl Generator {
    pub fn new(versions: VersionResolver, sources: SourceImporter, base: impl Into<PathBuf>) -> Self {
        Self {
            poms: MavenPomBuilder::new(versions.clone()),
            gradle: GradleScriptBuilder::new(versions),
            sources,
            renderer: MarkupRenderer::default(),
            base: base.into(),
        }
    }

    /// Spaces per nesting level in generated XML and Kotlin DSL.
    pub fn with_indent(mut self, width: usize) -> Self {
        self.renderer = MarkupRenderer::new(width);
        self
    }

    /// Root POM, modules, helper files, code-structure settings, imported
    /// sources, then Gradle plugin modules.
    #[instrument(skip_all, fields(group = %project.group_id(), base = %self.base.display()))]
    pub fn generate(&self, project: &Project) -> PomgenResult<Vec<Command>> {
        let mut commands = vec![Command::write_file(
            self.base.join("pom.xml"),
            self.renderer.xml_document(&self.poms.root_pom(project)?),
        )];

        for module in project.modules.keys() {
            commands.extend(self.module_directories(project, module));
            if project.gradle_plugin_for(module).is_some() {
                continue;
            }
            commands.push(Command::write_file(
                self.base.join(module).join("pom.xml"),
                self.renderer.xml_document(&self.poms.module_pom(project, module)?),
            ));
        }

        commands.extend(helper_file_commands(project, &self.base));
        commands.extend(code_structure_commands(project, &self.base.join(CODE_STRUCTURE_CONFIG)));
        commands.extend(self.sources.commands(project, &self.base)?);

        for spec in &project.gradle_plugin {
            commands.extend(self.gradle_plugin_commands(project, spec)?);
        }

        info!(commands = commands.len(), "Commands generated");
        Ok(commands)
    }

    /// `src/main` and `src/test` package directories of a module.
    fn module_directories(&self, project: &Project, module: &str) -> [Command; 2] {
        ["main", "test"].map(|set| {
            let root = self
                .base
                .join(module)
                .join("src")
                .join(set)
                .join(&project.language);
            Command::create_directory(
                project
                    .package_segments(module)
                    .iter()
                    .fold(root, |path, segment| path.join(segment)),
            )
        })
    }

    fn gradle_plugin_commands(&self, project: &Project, spec: &GradlePluginSpec) -> PomgenResult<Vec<Command>> {
        let module_dir = self.base.join(&spec.module);
        let build = self.renderer.render(&self.gradle.build_script(project, spec)?);
        let settings = self.renderer.render(&self.gradle.settings_script(project, spec));
        let pom = self
            .renderer
            .xml_document(&self.poms.gradle_plugin_pom(project, spec)?);

        let mut commands: Vec<Command> = self.module_directories(project, &spec.module).into();
        commands.extend([
            Command::write_file(module_dir.join("build.gradle.kts"), build),
            Command::write_file(module_dir.join("settings.gradle.kts"), settings),
            Command::write_file(module_dir.join("pom.xml"), pom),
        ]);
        Ok(commands)
    }
}

/// Settings of the code-structure analyzer, one value per command.
fn code_structure_commands(project: &Project, path: &Path) -> Vec<Command> {
    let source_prefix = format!(
        "https://github.com/{}/{}/blob/master/",
        project.developer.github_name,
        project.repository_name()
    );
    let entries: Vec<(KeyPath, serde_json::Value)> = vec![
        (["countAsErrors", "inDirectCycle"].into(), json!(true)),
        (["countAsErrors", "inGroupCycle"].into(), json!(true)),
        (["countAsErrors", "ancestorDependsOnDescendant"].into(), json!(true)),
        (["countAsErrors", "descendantDependsOnAncestor"].into(), json!(true)),
        ("maximumAllowedErrorCount".into(), json!(0)),
        ("inputDir".into(), json!(".")),
        ("outputDir".into(), json!("generated/code-structure")),
        ("useObservationsCache".into(), json!(false)),
        ("includeJvmDynamicInvocations".into(), json!(false)),
        ("sourcePrefix".into(), json!(source_prefix)),
        (
            ["sourceFileRegexPatterns", "include"].into(),
            json!([".*/src/main/(kotlin|java)/.*\\.(kt|java)"]),
        ),
        (["sourceFileRegexPatterns", "exclude"].into(), json!([])),
        ("nodeLimitForGraph".into(), json!(100)),
        (["binaryFileRegexPatterns", "include"].into(), json!([".*/target/.*\\.class"])),
        (
            ["binaryFileRegexPatterns", "exclude"].into(),
            json!([".*/testdata/.*", ".*/generated/.*"]),
        ),
    ];
    entries
        .into_iter()
        .map(|(key, value)| Command::set_json(path, key, value))
        .collect()
}
