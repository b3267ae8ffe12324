//! Maven POM trees: the parent POM, one POM per module and the companion POM
//! of a Gradle plugin module.
//!
//! Builders return [`XmlNode`] trees; rendering to lines is the caller's job.
//! Every versioned coordinate goes through the [`VersionResolver`].

use tracing::{debug, instrument};

use crate::{
    application::services::VersionResolver,
    domain::{
        Classification, Coordinate, DependencySpec, DomainError, GradlePluginSpec, Project, XmlNode, classify,
        classify_global,
    },
    error::PomgenResult,
};

const MODEL_VERSION: &str = "4.0.0";
const PROJECT_VERSION: &str = "${project.version}";
const PROJECT_NAME: &str = "${project.groupId}:${project.artifactId}";

const MAVEN_PLUGINS_GROUP: &str = "org.apache.maven.plugins";
const KOTLIN_GROUP: &str = "org.jetbrains.kotlin";
const SCALA_GROUP: &str = "net.alchim31.maven";
const CENTRAL_GROUP: &str = "org.sonatype.central";
const CENTRAL_PLUGIN: &str = "central-publishing-maven-plugin";

const PROJECT_ATTRIBUTES: [(&str, &str); 3] = [
    ("xmlns", "http://maven.apache.org/POM/4.0.0"),
    ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    (
        "xsi:schemaLocation",
        "http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd",
    ),
];

type LanguagePlugin = fn(&MavenPomBuilder, &Project) -> PomgenResult<XmlNode>;

/// Compiler integration plugin per `language`.
const LANGUAGE_PLUGINS: &[(&str, LanguagePlugin)] = &[
    ("kotlin", MavenPomBuilder::kotlin_plugin),
    ("scala", MavenPomBuilder::scala_plugin),
];

pub struct MavenPomBuilder {
    versions: VersionResolver,
}

impl MavenPomBuilder {
    pub fn new(versions: VersionResolver) -> Self {
        Self { versions }
    }

    /// The parent (aggregator) POM.
    #[instrument(skip_all, fields(group = %project.group_id()))]
    pub fn root_pom(&self, project: &Project) -> PomgenResult<XmlNode> {
        let mut children = vec![
            text("modelVersion", MODEL_VERSION),
            text("groupId", project.group_id()),
            text("artifactId", project.parent_artifact_id()),
            text("version", &project.version),
            text("packaging", "pom"),
            global_dependencies(project)?,
            self.dependency_management(project)?,
            modules(project),
            el(
                "properties",
                vec![text("project.build.sourceEncoding", "UTF-8")],
            ),
            self.root_build(project)?,
        ];
        children.extend(publication_metadata(project));
        if project.deployable {
            children.push(self.stage_profile(project)?);
        }
        Ok(project_node(children))
    }

    /// POM of one declared module.
    #[instrument(skip_all, fields(module = %module))]
    pub fn module_pom(&self, project: &Project, module: &str) -> PomgenResult<XmlNode> {
        let mut children = vec![
            text("modelVersion", MODEL_VERSION),
            text("artifactId", project.artifact_id(module)),
        ];
        if project.is_maven_plugin(module) {
            children.push(text("packaging", "maven-plugin"));
        }
        if let Some(dependencies) = module_dependencies(project, module)? {
            children.push(dependencies);
        }
        children.push(parent_reference(project));
        children.push(text("name", PROJECT_NAME));
        if let Some(build) = self.module_build(project, module)? {
            children.push(build);
        }
        Ok(project_node(children))
    }

    /// Companion POM of a Gradle plugin module: delegates the build to the
    /// Gradle wrapper and switches off Maven's own compile and publish steps.
    #[instrument(skip_all, fields(module = %spec.module))]
    pub fn gradle_plugin_pom(&self, project: &Project, spec: &GradlePluginSpec) -> PomgenResult<XmlNode> {
        let mut children = vec![
            text("modelVersion", MODEL_VERSION),
            text("artifactId", project.artifact_id(&spec.module)),
            parent_reference(project),
            text("packaging", "pom"),
            text("name", PROJECT_NAME),
        ];
        children.extend(
            publication_metadata(project)
                .into_iter()
                .filter(|node| node.name() != Some("name")),
        );

        let kotlin = el(
            "plugin",
            vec![
                text("groupId", KOTLIN_GROUP),
                text("artifactId", "kotlin-maven-plugin"),
                el(
                    "executions",
                    vec![
                        el("execution", vec![text("id", "compile"), text("phase", "none")]),
                        el("execution", vec![text("id", "test-compile"), text("phase", "none")]),
                    ],
                ),
            ],
        );
        let exec_version = self.versions.resolve(project, "org.codehaus.mojo", "exec-maven-plugin")?;
        let exec = el(
            "plugin",
            vec![
                text("groupId", "org.codehaus.mojo"),
                text("artifactId", "exec-maven-plugin"),
                text("version", exec_version),
                el(
                    "executions",
                    vec![
                        gradle_execution("gradle-build", "compile", "build"),
                        gradle_execution("gradle-publish-local", "install", "publishToMavenLocal"),
                    ],
                ),
            ],
        );
        let central = el(
            "plugin",
            vec![
                text("groupId", CENTRAL_GROUP),
                text("artifactId", CENTRAL_PLUGIN),
                configuration(&[("skipPublishing", "true")]),
                el(
                    "executions",
                    vec![el(
                        "execution",
                        vec![text("id", "injected-central-publishing"), text("phase", "none")],
                    )],
                ),
            ],
        );
        let plugins = vec![
            kotlin,
            exec,
            skipped_plugin("maven-install-plugin"),
            skipped_plugin("maven-deploy-plugin"),
            central,
        ];
        children.push(el("build", vec![el("plugins", plugins)]));
        Ok(project_node(children))
    }

    // ── Root sections ─────────────────────────────────────────────────────────

    fn dependency_management(&self, project: &Project) -> PomgenResult<XmlNode> {
        let mut dependencies = Vec::new();
        for spec in project.dependencies.values() {
            if let DependencySpec::External {
                group,
                artifact,
                scope,
            } = spec
            {
                let coordinate = self.versions.coordinate(project, group, artifact, scope.as_deref())?;
                dependencies.push(el("dependency", coordinate_nodes(&coordinate, true, true)));
            }
        }
        Ok(el(
            "dependencyManagement",
            vec![el("dependencies", dependencies)],
        ))
    }

    fn root_build(&self, project: &Project) -> PomgenResult<XmlNode> {
        let language = &project.language;
        let mut plugins = vec![
            self.compiler_plugin(project)?,
            self.source_plugin(project)?,
            self.language_plugin(project)?,
            self.code_structure_plugin(project)?,
        ];
        if project.deployable {
            plugins.push(self.central_publishing_plugin(project)?);
        }
        Ok(el(
            "build",
            vec![
                text(
                    "sourceDirectory",
                    format!("${{project.basedir}}/src/main/{}", language),
                ),
                text(
                    "testSourceDirectory",
                    format!("${{project.basedir}}/src/test/{}", language),
                ),
                el("plugins", plugins),
            ],
        ))
    }

    fn stage_profile(&self, project: &Project) -> PomgenResult<XmlNode> {
        let plugins = vec![self.gpg_plugin(project)?, self.documentation_plugin(project)?];
        let profile = el(
            "profile",
            vec![
                text("id", "stage"),
                el("build", vec![el("plugins", plugins)]),
            ],
        );
        Ok(el("profiles", vec![profile]))
    }

    // ── Plugins ───────────────────────────────────────────────────────────────

    fn plugin_coordinates(&self, project: &Project, group: &str, artifact: &str) -> PomgenResult<Vec<XmlNode>> {
        let coordinate = self.versions.coordinate(project, group, artifact, None)?;
        Ok(coordinate_nodes(&coordinate, true, false))
    }

    fn compiler_plugin(&self, project: &Project) -> PomgenResult<XmlNode> {
        let mut children = self.plugin_coordinates(project, MAVEN_PLUGINS_GROUP, "maven-compiler-plugin")?;
        children.push(configuration(&[
            ("source", project.java_version.as_str()),
            ("target", project.java_version.as_str()),
        ]));
        Ok(el("plugin", children))
    }

    fn source_plugin(&self, project: &Project) -> PomgenResult<XmlNode> {
        let mut children = self.plugin_coordinates(project, MAVEN_PLUGINS_GROUP, "maven-source-plugin")?;
        children.push(el(
            "executions",
            vec![execution(
                "attach-sources",
                "verify",
                &["jar-no-fork", "test-jar-no-fork"],
            )],
        ));
        Ok(el("plugin", children))
    }

    fn language_plugin(&self, project: &Project) -> PomgenResult<XmlNode> {
        let (_, build) = LANGUAGE_PLUGINS
            .iter()
            .find(|(language, _)| *language == project.language)
            .ok_or_else(|| DomainError::UnsupportedLanguage {
                language: project.language.clone(),
            })?;
        debug!(language = %project.language, "Language plugin selected");
        build(self, project)
    }

    fn kotlin_plugin(&self, project: &Project) -> PomgenResult<XmlNode> {
        let mut children = self.plugin_coordinates(project, KOTLIN_GROUP, "kotlin-maven-plugin")?;
        children.push(el(
            "executions",
            vec![
                el("execution", vec![text("id", "compile"), goals(&["compile"])]),
                el(
                    "execution",
                    vec![text("id", "test-compile"), goals(&["test-compile"])],
                ),
            ],
        ));
        children.push(configuration(&[("jvmTarget", project.java_version.as_str())]));
        Ok(el("plugin", children))
    }

    fn scala_plugin(&self, project: &Project) -> PomgenResult<XmlNode> {
        let mut children = self.plugin_coordinates(project, SCALA_GROUP, "scala-maven-plugin")?;
        children.push(el(
            "executions",
            vec![el("execution", vec![goals(&["compile", "testCompile"])])],
        ));
        children.push(el(
            "configuration",
            vec![
                el(
                    "jvmArgs",
                    vec![text("jvmArg", "-Xms64m"), text("jvmArg", "-Xmx1024m")],
                ),
                el(
                    "args",
                    vec![
                        text("arg", "-unchecked"),
                        text("arg", "-deprecation"),
                        text("arg", "-feature"),
                    ],
                ),
            ],
        ));
        Ok(el("plugin", children))
    }

    fn code_structure_plugin(&self, project: &Project) -> PomgenResult<XmlNode> {
        let mut children =
            self.plugin_coordinates(project, "com.seanshubin.code.structure", "code-structure-maven")?;
        children.push(text("inherited", "false"));
        children.push(el(
            "executions",
            vec![el(
                "execution",
                vec![goals(&["analyze"]), text("phase", "verify")],
            )],
        ));
        children.push(configuration(&[("configBaseName", "code-structure")]));
        Ok(el("plugin", children))
    }

    fn central_publishing_plugin(&self, project: &Project) -> PomgenResult<XmlNode> {
        let mut children = self.plugin_coordinates(project, CENTRAL_GROUP, CENTRAL_PLUGIN)?;
        children.push(text("extensions", "true"));
        children.push(configuration(&[("publishingServerId", "central")]));
        Ok(el("plugin", children))
    }

    fn gpg_plugin(&self, project: &Project) -> PomgenResult<XmlNode> {
        let mut children = self.plugin_coordinates(project, MAVEN_PLUGINS_GROUP, "maven-gpg-plugin")?;
        children.push(el(
            "executions",
            vec![execution("sign-artifacts", "verify", &["sign"])],
        ));
        Ok(el("plugin", children))
    }

    /// Dokka for Kotlin, Scaladoc for Scala, Javadoc otherwise.
    fn documentation_plugin(&self, project: &Project) -> PomgenResult<XmlNode> {
        let (group, artifact, id, goal) = match project.language.to_lowercase().as_str() {
            "kotlin" => (
                "org.jetbrains.dokka",
                "dokka-maven-plugin",
                "generate-dokka-javadoc",
                "javadocJar",
            ),
            "scala" => (SCALA_GROUP, "scala-maven-plugin", "generate-scaladoc", "doc-jar"),
            _ => (
                MAVEN_PLUGINS_GROUP,
                "maven-javadoc-plugin",
                "generate-javadoc",
                "jar",
            ),
        };
        let mut children = self.plugin_coordinates(project, group, artifact)?;
        children.push(el("executions", vec![execution(id, "package", &[goal])]));
        Ok(el("plugin", children))
    }

    // ── Module sections ───────────────────────────────────────────────────────

    fn module_build(&self, project: &Project, module: &str) -> PomgenResult<Option<XmlNode>> {
        let mut plugins = Vec::new();
        if let Some(main_class) = project.entry_points.get(module) {
            plugins.push(self.assembly_plugin(project, module, main_class)?);
        }
        if project.is_maven_plugin(module) {
            plugins.push(self.maven_plugin_plugin(project)?);
        }
        if plugins.is_empty() {
            return Ok(None);
        }
        Ok(Some(el("build", vec![el("plugins", plugins)])))
    }

    fn assembly_plugin(&self, project: &Project, module: &str, main_class: &str) -> PomgenResult<XmlNode> {
        let mut children = self.plugin_coordinates(project, MAVEN_PLUGINS_GROUP, "maven-assembly-plugin")?;
        children.push(el(
            "configuration",
            vec![
                text("finalName", project.artifact_id(module)),
                text("appendAssemblyId", "false"),
                el(
                    "descriptorRefs",
                    vec![text("descriptorRef", "jar-with-dependencies")],
                ),
                el(
                    "archive",
                    vec![el("manifest", vec![text("mainClass", main_class)])],
                ),
            ],
        ));
        children.push(el(
            "executions",
            vec![execution("make-assembly", "package", &["single"])],
        ));
        Ok(el("plugin", children))
    }

    fn maven_plugin_plugin(&self, project: &Project) -> PomgenResult<XmlNode> {
        let mut children = self.plugin_coordinates(project, MAVEN_PLUGINS_GROUP, "maven-plugin-plugin")?;
        let goal_prefix = project.name.join("-");
        children.push(configuration(&[("goalPrefix", goal_prefix.as_str())]));
        children.push(el(
            "executions",
            vec![
                execution("default-descriptor", "process-classes", &["descriptor"]),
                execution("help-descriptor", "process-classes", &["helpmojo"]),
            ],
        ));
        Ok(el("plugin", children))
    }
}

// ── Tree helpers ──────────────────────────────────────────────────────────────

fn el(name: &str, children: Vec<XmlNode>) -> XmlNode {
    XmlNode::element(name, children)
}

fn text(name: &str, value: impl Into<String>) -> XmlNode {
    XmlNode::text_element(name, value)
}

fn project_node(children: Vec<XmlNode>) -> XmlNode {
    PROJECT_ATTRIBUTES
        .iter()
        .fold(el("project", children), |node, (key, value)| {
            node.with_attribute(*key, *value)
        })
}

fn coordinate_nodes(coordinate: &Coordinate, with_version: bool, with_scope: bool) -> Vec<XmlNode> {
    let mut nodes = vec![
        text("groupId", &coordinate.group),
        text("artifactId", &coordinate.artifact),
    ];
    if with_version {
        nodes.push(text("version", &coordinate.version));
    }
    if let (true, Some(scope)) = (with_scope, &coordinate.scope) {
        nodes.push(text("scope", scope));
    }
    nodes
}

fn goals(goals: &[&str]) -> XmlNode {
    el("goals", goals.iter().map(|goal| text("goal", *goal)).collect())
}

fn execution(id: &str, phase: &str, goal_names: &[&str]) -> XmlNode {
    el(
        "execution",
        vec![text("id", id), text("phase", phase), goals(goal_names)],
    )
}

fn configuration(entries: &[(&str, &str)]) -> XmlNode {
    el(
        "configuration",
        entries.iter().map(|(key, value)| text(key, *value)).collect(),
    )
}

fn gradle_execution(id: &str, phase: &str, task: &str) -> XmlNode {
    el(
        "execution",
        vec![
            text("id", id),
            text("phase", phase),
            goals(&["exec"]),
            el(
                "configuration",
                vec![
                    text("executable", "${basedir}/gradlew"),
                    el(
                        "arguments",
                        vec![text("argument", task), text("argument", "--no-daemon")],
                    ),
                ],
            ),
        ],
    )
}

fn skipped_plugin(artifact: &str) -> XmlNode {
    el(
        "plugin",
        vec![
            text("groupId", MAVEN_PLUGINS_GROUP),
            text("artifactId", artifact),
            configuration(&[("skip", "true")]),
        ],
    )
}

fn parent_reference(project: &Project) -> XmlNode {
    el(
        "parent",
        vec![
            text("groupId", project.group_id()),
            text("artifactId", project.parent_artifact_id()),
            text("version", &project.version),
        ],
    )
}

fn global_dependencies(project: &Project) -> PomgenResult<XmlNode> {
    let mut dependencies = Vec::with_capacity(project.global.len());
    for alias in &project.global {
        let (group, artifact) = classify_global(project, alias)?;
        dependencies.push(el(
            "dependency",
            vec![text("groupId", group), text("artifactId", artifact)],
        ));
    }
    Ok(el("dependencies", dependencies))
}

fn modules(project: &Project) -> XmlNode {
    el(
        "modules",
        project
            .aggregated_modules()
            .into_iter()
            .map(|module| text("module", module))
            .collect(),
    )
}

/// Internal dependencies first, then external ones; `None` when empty.
fn module_dependencies(project: &Project, module: &str) -> PomgenResult<Option<XmlNode>> {
    let references = project
        .modules
        .get(module)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut internal = Vec::new();
    let mut external = Vec::new();
    for reference in references {
        match classify(project, reference)? {
            Classification::Internal { module, scope } => {
                let mut children = vec![
                    text("groupId", project.group_id()),
                    text("artifactId", project.artifact_id(module)),
                    text("version", PROJECT_VERSION),
                ];
                if let Some(scope) = scope {
                    children.push(text("scope", scope));
                }
                internal.push(el("dependency", children));
            }
            Classification::External { group, artifact, .. } => {
                external.push(el(
                    "dependency",
                    vec![text("groupId", group), text("artifactId", artifact)],
                ));
            }
        }
    }

    if internal.is_empty() && external.is_empty() {
        return Ok(None);
    }
    internal.append(&mut external);
    Ok(Some(el("dependencies", internal)))
}

/// name, description, url, licenses, developers, scm.
fn publication_metadata(project: &Project) -> Vec<XmlNode> {
    let developer = &project.developer;
    let url = project.github_url();
    let connection = format!(
        "git@github.com:{}/{}.git",
        developer.github_name,
        project.repository_name()
    );
    vec![
        text("name", PROJECT_NAME),
        text("description", &project.description),
        text("url", &url),
        el(
            "licenses",
            vec![el(
                "license",
                vec![
                    text("name", "Unlicense"),
                    text("url", "http://unlicense.org/"),
                ],
            )],
        ),
        el(
            "developers",
            vec![el(
                "developer",
                vec![
                    text("name", &developer.name),
                    text("organization", &developer.organization),
                    text("organizationUrl", &developer.url),
                ],
            )],
        ),
        el(
            "scm",
            vec![
                text("connection", &connection),
                text("developerConnection", &connection),
                text("url", url),
            ],
        ),
    ]
}
