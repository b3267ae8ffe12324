//! Kotlin DSL build scripts for Gradle plugin modules.

use tracing::instrument;

use crate::{
    application::services::VersionResolver,
    domain::{DslNode, GradlePluginSpec, Project, module_name_parts, quote},
    error::PomgenResult,
};

const PLUGIN_PUBLISH_VERSION: &str = "1.3.0";
const LONG_DESCRIPTION: usize = 80;

pub struct GradleScriptBuilder {
    versions: VersionResolver,
}

impl GradleScriptBuilder {
    pub fn new(versions: VersionResolver) -> Self {
        Self { versions }
    }

    /// `build.gradle.kts` of the plugin module.
    #[instrument(skip_all, fields(module = %spec.module))]
    pub fn build_script(&self, project: &Project, spec: &GradlePluginSpec) -> PomgenResult<DslNode> {
        let kotlin_version = self
            .versions
            .resolve(project, "org.jetbrains.kotlin", "kotlin-stdlib")?;
        let group_id = project.group_id();
        let github_url = project.github_url();
        let java_version = &project.java_version;

        let plugins = DslNode::block(
            "plugins",
            vec![
                DslNode::KotlinPlugin {
                    name: "jvm".into(),
                    version: kotlin_version,
                },
                DslNode::BacktickPlugin("java-gradle-plugin".into()),
                DslNode::BacktickPlugin("maven-publish".into()),
                DslNode::PluginId {
                    id: "com.gradle.plugin-publish".into(),
                    version: Some(PLUGIN_PUBLISH_VERSION.into()),
                },
            ],
        );

        let dependencies = spec
            .depends_on
            .iter()
            .map(|module| DslNode::Dependency {
                configuration: "implementation".into(),
                notation: quote(&format!(
                    "{}:{}:{}",
                    group_id,
                    project.artifact_id(module),
                    project.version
                )),
            })
            .collect();

        let website = spec.website.clone().unwrap_or_else(|| github_url.clone());
        let vcs_url = spec
            .vcs_url
            .clone()
            .unwrap_or_else(|| format!("{}.git", github_url));

        let gradle_plugin = DslNode::block(
            "gradlePlugin",
            vec![
                DslNode::set_quoted("website", &website),
                DslNode::set_quoted("vcsUrl", &vcs_url),
                DslNode::EmptyLine,
                DslNode::block(
                    "plugins",
                    vec![DslNode::block(
                        format!("create({})", quote(&camel_case(&spec.module))),
                        plugin_declaration(spec),
                    )],
                ),
            ],
        );

        let java = DslNode::block(
            "java",
            vec![
                DslNode::statement(format!("sourceCompatibility = JavaVersion.VERSION_{}", java_version)),
                DslNode::statement(format!("targetCompatibility = JavaVersion.VERSION_{}", java_version)),
                DslNode::statement("withJavadocJar()"),
                DslNode::statement("withSourcesJar()"),
            ],
        );

        let kotlin = DslNode::block(
            "kotlin",
            vec![DslNode::statement(format!("jvmToolchain({})", java_version))],
        );

        Ok(DslNode::Root(vec![
            plugins,
            DslNode::EmptyLine,
            DslNode::statement(format!("group = {}", quote(&group_id))),
            DslNode::statement(format!("version = {}", quote(&project.version))),
            DslNode::EmptyLine,
            DslNode::block(
                "repositories",
                vec![
                    DslNode::statement("mavenCentral()"),
                    DslNode::statement("mavenLocal()"),
                ],
            ),
            DslNode::EmptyLine,
            DslNode::block("dependencies", dependencies),
            DslNode::EmptyLine,
            gradle_plugin,
            DslNode::EmptyLine,
            java,
            DslNode::EmptyLine,
            kotlin,
            DslNode::EmptyLine,
            publishing(project, spec, &github_url),
        ]))
    }

    /// `settings.gradle.kts` naming the standalone build.
    pub fn settings_script(&self, project: &Project, spec: &GradlePluginSpec) -> DslNode {
        let name = project
            .prefix
            .iter()
            .chain(&project.name)
            .map(String::as_str)
            .chain(std::iter::once(spec.module.as_str()))
            .collect::<Vec<_>>()
            .join("-");
        DslNode::Root(vec![DslNode::statement(format!(
            "rootProject.name = {}",
            quote(&name)
        ))])
    }
}

fn plugin_declaration(spec: &GradlePluginSpec) -> Vec<DslNode> {
    let mut declaration = vec![
        DslNode::statement(format!("id = {}", quote(&spec.plugin_id))),
        DslNode::statement(format!(
            "implementationClass = {}",
            quote(&spec.implementation_class)
        )),
        DslNode::statement(format!("displayName = {}", quote(&spec.display_name))),
    ];
    if spec.description.len() > LONG_DESCRIPTION {
        declaration.push(DslNode::statement("description ="));
        declaration.push(DslNode::statement(format!("    {}", quote(&spec.description))));
    } else {
        declaration.push(DslNode::statement(format!(
            "description = {}",
            quote(&spec.description)
        )));
    }
    if !spec.tags.is_empty() {
        let tags = spec
            .tags
            .iter()
            .map(|tag| quote(tag))
            .collect::<Vec<_>>()
            .join(", ");
        declaration.push(DslNode::MethodCall {
            receiver: "tags".into(),
            method: "set".into(),
            args: vec![format!("listOf({})", tags)],
        });
    }
    declaration
}

fn publishing(project: &Project, spec: &GradlePluginSpec, github_url: &str) -> DslNode {
    let developer = &project.developer;
    let scm_url = format!("scm:git:{}.git", github_url);
    let display_name = project
        .prefix
        .iter()
        .chain(&project.name)
        .map(|word| capitalize(word))
        .chain(module_name_parts(&spec.module).map(|word| capitalize(&word)))
        .collect::<Vec<_>>()
        .join(" ");

    let pom = DslNode::block(
        "pom",
        vec![
            DslNode::set_quoted("name", &display_name),
            DslNode::set_quoted("description", &spec.description),
            DslNode::set_quoted("url", github_url),
            DslNode::EmptyLine,
            DslNode::block(
                "licenses",
                vec![DslNode::block(
                    "license",
                    vec![
                        DslNode::set_quoted("name", "The Unlicense"),
                        DslNode::set_quoted("url", "https://unlicense.org/"),
                    ],
                )],
            ),
            DslNode::EmptyLine,
            DslNode::block(
                "developers",
                vec![DslNode::block(
                    "developer",
                    vec![
                        DslNode::set_quoted("id", &developer.github_name),
                        DslNode::set_quoted("name", &developer.name),
                    ],
                )],
            ),
            DslNode::EmptyLine,
            DslNode::block(
                "scm",
                vec![
                    DslNode::set_quoted("connection", &scm_url),
                    DslNode::set_quoted("developerConnection", &scm_url),
                    DslNode::set_quoted("url", github_url),
                ],
            ),
        ],
    );

    let publication = DslNode::block(
        format!("create<MavenPublication>({})", quote("pluginMaven")),
        vec![
            DslNode::statement(format!(
                "artifactId = {}",
                quote(&project.artifact_id(&spec.module))
            )),
            DslNode::EmptyLine,
            pom,
        ],
    );

    DslNode::block(
        "publishing",
        vec![DslNode::block("publications", vec![publication])],
    )
}

/// `gradle-plugin` → `gradlePlugin`.
fn camel_case(module: &str) -> String {
    module
        .split('-')
        .enumerate()
        .map(|(index, word)| {
            if index == 0 {
                word.to_string()
            } else {
                capitalize(word)
            }
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockVersionLookup;
    use crate::domain::MarkupRenderer;
    use mockall::predicate::eq;
    use std::sync::Arc;

    fn spec() -> GradlePluginSpec {
        GradlePluginSpec {
            module: "gradle-plugin".into(),
            plugin_id: "com.example.widget".into(),
            implementation_class: "com.example.widget.gradle.plugin.WidgetPlugin".into(),
            display_name: "Widget".into(),
            description: "Checks widgets".into(),
            tags: vec!["widget".into(), "check".into()],
            depends_on: vec!["core".into()],
            website: None,
            vcs_url: None,
        }
    }

    fn builder() -> GradleScriptBuilder {
        let mut lookup = MockVersionLookup::new();
        lookup
            .expect_latest_release_version()
            .with(eq("org.jetbrains.kotlin"), eq("kotlin-stdlib"))
            .returning(|_, _| Ok("2.1.0".into()));
        GradleScriptBuilder::new(VersionResolver::new(Arc::new(lookup)))
    }

    fn project() -> Project {
        Project::new(["com", "example"], ["widget"]).with_version("1.2.3")
    }

    #[test]
    fn build_script_opens_with_plugins_block() {
        let script = builder().build_script(&project(), &spec()).unwrap();
        let lines = MarkupRenderer::new(4).render(&script);
        assert_eq!(
            &lines[..7],
            &[
                "plugins {",
                "    kotlin(\"jvm\") version \"2.1.0\"",
                "    `java-gradle-plugin`",
                "    `maven-publish`",
                "    id(\"com.gradle.plugin-publish\") version \"1.3.0\"",
                "}",
                "",
            ]
        );
        assert!(lines.contains(&"group = \"com.example.widget\"".to_string()));
        assert!(lines.contains(&"    implementation(\"com.example.widget:widget-core:1.2.3\")".to_string()));
        assert!(lines.contains(&"        create(\"gradlePlugin\") {".to_string()));
        assert!(lines.contains(&"            tags.set(listOf(\"widget\", \"check\"))".to_string()));
        assert!(lines.contains(&"    jvmToolchain(25)".to_string()));
    }

    #[test]
    fn publication_name_capitalizes_every_word() {
        let script = builder().build_script(&project(), &spec()).unwrap();
        let lines = MarkupRenderer::new(4).render(&script);
        assert!(
            lines
                .iter()
                .any(|l| l.trim() == "name.set(\"Com Example Widget Gradle Plugin\")")
        );
        assert!(
            lines
                .iter()
                .any(|l| l.trim() == "vcsUrl.set(\"https://github.com/developer github name/widget.git\")")
        );
    }

    #[test]
    fn long_description_wraps_onto_next_line() {
        let mut spec = spec();
        spec.description = "x".repeat(81);
        let script = builder().build_script(&project(), &spec).unwrap();
        let lines = MarkupRenderer::new(4).render(&script);
        let at = lines
            .iter()
            .position(|l| l.trim() == "description =")
            .unwrap();
        assert_eq!(lines[at + 1].trim(), format!("\"{}\"", "x".repeat(81)));
    }

    #[test]
    fn settings_names_the_standalone_build() {
        let settings = builder().settings_script(&project(), &spec());
        assert_eq!(
            MarkupRenderer::new(4).render(&settings),
            vec!["rootProject.name = \"com-example-widget-gradle-plugin\""]
        );
    }

    #[test]
    fn camel_case_joins_words() {
        assert_eq!(camel_case("gradle-plugin"), "gradlePlugin");
        assert_eq!(camel_case("single"), "single");
    }
}
