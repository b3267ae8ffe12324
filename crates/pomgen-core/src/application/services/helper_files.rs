//! Boilerplate files written next to the POMs: `.gitignore`, `UNLICENSE.txt`
//! and the `scripts/` directory.
//!
//! Templates are embedded at compile time. Scripts may carry `{{KEY}}`
//! placeholders, filled from a [`ScriptContext`].

use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};

use crate::{application::Command, domain::Project};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("hardcoded regex must compile"));

struct Template {
    file_name: &'static str,
    content: &'static str,
}

macro_rules! template {
    ($name:literal) => {
        Template {
            file_name: $name,
            content: include_str!(concat!("../../../resources/generated-project-files/", $name)),
        }
    };
}

const GITIGNORE: Template = template!("gitignore.txt");
const UNLICENSE: Template = template!("UNLICENSE.txt");

/// Written in this order, all executable.
const SCRIPTS: &[Template] = &[
    template!("_build.sh"),
    template!("_clean.sh"),
    template!("_test.sh"),
    template!("_build-skip-tests.sh"),
    template!("_install-skip-tests.sh"),
    template!("build.sh"),
    template!("clean.sh"),
    template!("test.sh"),
    template!("_publish.sh"),
    template!("publish.sh"),
    template!("clean-publish.sh"),
    template!("clean-install-skip-tests.sh"),
    template!("generate-docs.sh"),
    template!("_fetch-from-maven-repo-url.sh"),
    template!("fetch-from-maven-repo-url.sh"),
    template!("deploy-to-maven-central.sh"),
];

/// Placeholder values for script templates.
///
/// Unknown placeholders are left as written. Substitution is a single pass,
/// so placeholders inside values are never expanded.
#[derive(Debug, Clone, Default)]
pub struct ScriptContext {
    variables: IndexMap<String, String>,
}

impl ScriptContext {
    /// `GROUP_ID`, `ARTIFACT_ID` (the parent), `VERSION` and
    /// `LOCAL_REPO_PATH` (group as a path, with a trailing `/`).
    pub fn for_project(project: &Project) -> Self {
        let local_repo_path = project
            .prefix
            .iter()
            .chain(&project.name)
            .fold(String::new(), |mut path, part| {
                path.push_str(part);
                path.push('/');
                path
            });
        Self::default()
            .with_variable("GROUP_ID", project.group_id())
            .with_variable("ARTIFACT_ID", project.parent_artifact_id())
            .with_variable("VERSION", &project.version)
            .with_variable("LOCAL_REPO_PATH", local_repo_path)
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn render(&self, template: &str) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| match self.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

/// Commands for every helper file, rooted at `base`.
pub fn helper_file_commands(project: &Project, base: &Path) -> Vec<Command> {
    let scripts_dir = base.join("scripts");
    let context = ScriptContext::for_project(project);

    let mut commands = vec![
        Command::write_text(base.join(".gitignore"), GITIGNORE.content, false),
        Command::write_text(base.join(UNLICENSE.file_name), UNLICENSE.content, false),
        Command::create_directory(&scripts_dir),
    ];
    commands.extend(SCRIPTS.iter().map(|script| {
        Command::write_text(
            scripts_dir.join(script.file_name),
            context.render(script.content),
            true,
        )
    }));
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project::new(["com", "example"], ["big", "widget"]).with_version("1.0.0")
    }

    #[test]
    fn context_derives_coordinates() {
        let context = ScriptContext::for_project(&project());
        assert_eq!(context.get("GROUP_ID"), Some("com.example.big.widget"));
        assert_eq!(context.get("ARTIFACT_ID"), Some("big-widget-parent"));
        assert_eq!(context.get("VERSION"), Some("1.0.0"));
        assert_eq!(context.get("LOCAL_REPO_PATH"), Some("com/example/big/widget/"));
    }

    #[test]
    fn render_leaves_unknown_placeholders() {
        let context = ScriptContext::default().with_variable("A", "1");
        assert_eq!(context.render("{{A}}-{{B}}-{{A}}"), "1-{{B}}-1");
    }

    #[test]
    fn placeholders_inside_values_are_not_expanded() {
        let forward = ScriptContext::default()
            .with_variable("A", "{{B}}")
            .with_variable("B", "2");
        let backward = ScriptContext::default()
            .with_variable("B", "2")
            .with_variable("A", "{{B}}");
        assert_eq!(forward.render("{{A}}/{{B}}"), "{{B}}/2");
        assert_eq!(backward.render("{{A}}/{{B}}"), "{{B}}/2");
    }

    #[test]
    fn commands_follow_fixed_order() {
        let commands = helper_file_commands(&project(), Path::new("out"));
        assert_eq!(commands.len(), 3 + SCRIPTS.len());
        assert_eq!(commands[0].path(), Path::new("out/.gitignore"));
        assert_eq!(commands[1].path(), Path::new("out/UNLICENSE.txt"));
        assert_eq!(commands[2], Command::create_directory("out/scripts"));
        assert_eq!(commands[3].path(), Path::new("out/scripts/_build.sh"));
        assert_eq!(
            commands.last().map(Command::path),
            Some(Path::new("out/scripts/deploy-to-maven-central.sh"))
        );
    }

    #[test]
    fn scripts_are_executable_and_filled_in() {
        let commands = helper_file_commands(&project(), Path::new("out"));
        for command in &commands[3..] {
            match command {
                Command::WriteTextFile {
                    content,
                    executable,
                    ..
                } => {
                    assert!(*executable);
                    assert!(!content.contains("{{"), "unfilled placeholder in {:?}", command.path());
                }
                other => panic!("unexpected command {:?}", other),
            }
        }
    }
}
