//! Reading `project-specification.json` into a [`Project`].
//!
//! The primary specification is completed in place: every missing core key
//! is written back with its default, so a first run against an empty file
//! produces a fully populated template. Specifications of other projects,
//! loaded for source imports, are only read.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, KeyValueStore, KeyValueStoreFactory, ProjectLoader},
    },
    domain::{
        DependencySpec, Developer, DomainError, GradlePluginSpec, KeyPath, Project,
        SourceDependency, VersionOverride, document,
    },
    error::PomgenResult,
};

pub const SPECIFICATION_FILE: &str = "project-specification.json";

// ── Documenting decorator ─────────────────────────────────────────────────────

/// Stores a description of every key next to its value.
///
/// `load_documented(key, default, docs)` writes
/// `["path: a.b", "default value: V", "default value type: T", ...docs]`
/// under `prefix + key`, then loads `key`, creating it from `default`.
pub struct DocumentedStore<'a> {
    store: &'a dyn KeyValueStore,
    prefix: KeyPath,
}

impl<'a> DocumentedStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore, prefix: impl Into<KeyPath>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn load_documented(&self, key: &KeyPath, default: Value, docs: &[&str]) -> PomgenResult<Value> {
        let shown = match &default {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        let mut lines = vec![
            format!("path: {}", key),
            format!("default value: {}", shown),
            format!("default value type: {}", document::type_name(&default)),
        ];
        lines.extend(docs.iter().map(|line| line.to_string()));
        self.store.store(&key.prefixed(&self.prefix), json!(lines))?;
        self.store.load_with_default(key, default)
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Defaults {
    /// Write missing keys back.
    Create,
    /// Write missing keys back, with documentation entries.
    Document,
    /// Never write.
    ReadOnly,
}

pub struct SpecificationLoader {
    filesystem: Arc<dyn Filesystem>,
    stores: Arc<dyn KeyValueStoreFactory>,
    document: bool,
}

impl SpecificationLoader {
    pub fn new(filesystem: Arc<dyn Filesystem>, stores: Arc<dyn KeyValueStoreFactory>) -> Self {
        Self {
            filesystem,
            stores,
            document: false,
        }
    }

    /// Co-store documentation for each key of the primary specification.
    pub fn with_documentation(mut self, document: bool) -> Self {
        self.document = document;
        self
    }

    /// Load the specification that drives this run, completing it with
    /// defaults. Relative source project paths resolve against `base_dir`.
    #[instrument(skip_all, fields(spec = %spec_file.display()))]
    pub fn load_primary(&self, spec_file: &Path, base_dir: &Path) -> PomgenResult<Project> {
        let store = self.stores.open(spec_file)?;
        let defaults = if self.document {
            Defaults::Document
        } else {
            Defaults::Create
        };
        let project = read_project(store.as_ref(), base_dir, defaults)?;
        info!(group = %project.group_id(), modules = project.modules.len(), "Specification loaded");
        Ok(project)
    }
}

impl ProjectLoader for SpecificationLoader {
    #[instrument(skip_all, fields(project = %project_path.display()))]
    fn load_project(&self, project_path: &Path) -> PomgenResult<Project> {
        if !self.filesystem.is_dir(project_path) {
            return Err(ApplicationError::SourceProjectNotFound {
                path: project_path.to_path_buf(),
            }
            .into());
        }
        let spec_file = project_path.join(SPECIFICATION_FILE);
        if !self.filesystem.exists(&spec_file) {
            return Err(ApplicationError::SpecificationMissing { path: spec_file }.into());
        }
        let store = self.stores.open(&spec_file)?;
        let project = read_project(store.as_ref(), project_path, Defaults::ReadOnly)?;
        debug!(group = %project.group_id(), exports = ?project.exports, "Source project loaded");
        Ok(project)
    }
}

struct Reader<'a> {
    store: &'a dyn KeyValueStore,
    defaults: Defaults,
}

impl Reader<'_> {
    /// A core key: created with `default` unless read-only.
    fn value<T: DeserializeOwned>(&self, key: KeyPath, default: Value, docs: &[&str]) -> PomgenResult<T> {
        let value = match self.defaults {
            Defaults::Create => self.store.load_with_default(&key, default)?,
            Defaults::Document => {
                DocumentedStore::new(self.store, "documentation").load_documented(&key, default, docs)?
            }
            Defaults::ReadOnly => self.store.load_or_default(&key, default)?,
        };
        decode(value, &key)
    }

    /// An optional key: never created, empty when absent.
    fn optional<T: DeserializeOwned + Default>(&self, name: &str) -> PomgenResult<T> {
        let key = KeyPath::from(name);
        if !self.store.exists(&key)? {
            return Ok(T::default());
        }
        decode(self.store.load(&key)?, &key)
    }
}

fn decode<T: DeserializeOwned>(value: Value, key: &KeyPath) -> PomgenResult<T> {
    serde_json::from_value(value).map_err(|e| {
        DomainError::InvalidSpecification {
            path: key.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

#[derive(Deserialize)]
struct RawDependency {
    group: Option<String>,
    artifact: Option<String>,
    scope: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSourceDependency {
    source_project_path: PathBuf,
    #[serde(default)]
    module_mapping: IndexMap<String, String>,
}

fn read_project(store: &dyn KeyValueStore, base_dir: &Path, defaults: Defaults) -> PomgenResult<Project> {
    let reader = Reader { store, defaults };

    let prefix: Vec<String> = reader.value(
        "prefix".into(),
        json!(["prefix", "parts"]),
        &["Reverse domain name words; prefix + name joined with '.' is the group id"],
    )?;
    let name: Vec<String> = reader.value(
        "name".into(),
        json!(["name", "parts"]),
        &["Project name words; joined with '-' they prefix every artifact id"],
    )?;

    let mut project = Project::new(prefix, name);
    project.description = reader.value("description".into(), json!(project.description), &[])?;
    project.version = reader.value("version".into(), json!(project.version), &[])?;
    project.language = reader.value(
        "language".into(),
        json!(project.language),
        &["Selects the compiler plugin and the source directory name"],
    )?;

    let defaults = Developer::default();
    project.developer = Developer {
        name: reader.value(["developer", "name"].into(), json!(defaults.name), &[])?,
        github_name: reader.value(
            ["developer", "githubName"].into(),
            json!(defaults.github_name),
            &["Used for the repository, scm and documentation links"],
        )?,
        maven_user_name: reader.value(
            ["developer", "mavenUserName"].into(),
            json!(defaults.maven_user_name),
            &[],
        )?,
        organization: reader.value(
            ["developer", "organization"].into(),
            json!(defaults.organization),
            &[],
        )?,
        url: reader.value(["developer", "url"].into(), json!(defaults.url), &[])?,
    };

    project.global = reader.value(
        "global".into(),
        json!([]),
        &["Dependency aliases added to the parent POM, inherited by every module"],
    )?;
    project.modules = reader.value(
        "modules".into(),
        json!({}),
        &["Module name to dependency references, in build order"],
    )?;
    project.java_version = reader.value("javaVersion".into(), json!(project.java_version), &[])?;
    project.deployable = reader.value(
        "deployable".into(),
        json!(project.deployable),
        &["When false, central publishing and the stage profile are left out"],
    )?;

    project.dependencies = reader
        .optional::<IndexMap<String, RawDependency>>("dependencies")?
        .into_iter()
        .map(|(alias, raw)| dependency_spec(&alias, raw).map(|spec| (alias, spec)))
        .collect::<PomgenResult<_>>()?;
    project.version_overrides = reader.optional::<Vec<VersionOverride>>("versionOverrides")?;
    project.entry_points = reader.optional("entryPoints")?;
    project.source_dependencies = reader
        .optional::<Vec<RawSourceDependency>>("sourceDependencies")?
        .into_iter()
        .map(|raw| SourceDependency {
            source_project_path: normalize(&base_dir.join(raw.source_project_path)),
            module_mapping: raw.module_mapping,
        })
        .collect();
    project.maven_plugin = reader.optional("mavenPlugin")?;
    project.gradle_plugin = reader.optional::<Vec<GradlePluginSpec>>("gradlePlugin")?;
    project.exports = reader.optional("exports")?;

    Ok(project)
}

/// `{group, artifact, scope?}` is external, `{scope?}` internal.
fn dependency_spec(alias: &str, raw: RawDependency) -> PomgenResult<DependencySpec> {
    let spec = match (raw.group, raw.artifact) {
        (Some(group), Some(artifact)) => DependencySpec::external(group, artifact),
        (None, None) => DependencySpec::internal(),
        _ => {
            return Err(DomainError::InvalidSpecification {
                path: format!("dependencies.{}", alias),
                reason: "an external dependency needs both \"group\" and \"artifact\"".into(),
            }
            .into());
        }
    };
    Ok(match raw.scope {
        Some(scope) => spec.scoped(scope),
        None => spec,
    })
}

/// Lexically resolve `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = normalized.components().next_back();
                let named = matches!(last, Some(Component::Normal(_)));
                // `..` above the root is the root
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if named {
                    normalized.pop();
                } else if !at_root {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
