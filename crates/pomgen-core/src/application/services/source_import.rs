//! Copying modules of other local projects in as source.
//!
//! For each `sourceDependencies` entry the foreign specification is loaded,
//! the module mapping checked, and every file under the mapped modules'
//! package roots turned into a [`Command::CopyAndTransformSourceFile`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        Command, SourceCopy,
        ports::{Filesystem, Notification, Notifications, ProjectLoader},
    },
    domain::{PackageTransformation, Project, SourceDependency, validate_module_mapping},
    error::PomgenResult,
};

const SOURCE_SETS: [&str; 2] = ["main", "test"];

/// Rewrite rules for one import.
///
/// One rule per mapping entry, followed by a rule for every module that
/// both projects import from the same third project, so references to that
/// shared code follow it into the target's namespace.
pub fn build_transformations(
    source: &Project,
    target: &Project,
    mapping: &IndexMap<String, String>,
) -> Vec<PackageTransformation> {
    let direct = mapping.iter().map(|(source_module, target_module)| {
        PackageTransformation::new(
            source.package_segments(source_module),
            target.package_segments(target_module),
        )
    });

    let shared = source.source_dependencies.iter().flat_map(move |upstream| {
        target
            .source_dependencies
            .iter()
            .filter(move |ours| ours.source_project_path == upstream.source_project_path)
            .flat_map(move |ours| {
                upstream
                    .module_mapping
                    .values()
                    .filter(move |module| ours.module_mapping.values().any(|m| m == *module))
            })
            .map(move |module| {
                PackageTransformation::new(
                    source.package_segments(module),
                    target.package_segments(module),
                )
            })
    });

    direct.chain(shared).collect()
}

pub struct SourceImporter {
    filesystem: Arc<dyn Filesystem>,
    loader: Arc<dyn ProjectLoader>,
    notifications: Arc<dyn Notifications>,
}

impl SourceImporter {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        loader: Arc<dyn ProjectLoader>,
        notifications: Arc<dyn Notifications>,
    ) -> Self {
        Self {
            filesystem,
            loader,
            notifications,
        }
    }

    /// Copy commands for every source dependency of `project`, in
    /// declaration order.
    pub fn commands(&self, project: &Project, base: &Path) -> PomgenResult<Vec<Command>> {
        let mut commands = Vec::new();
        for dependency in &project.source_dependencies {
            commands.extend(self.import(project, base, dependency)?);
        }
        Ok(commands)
    }

    #[instrument(skip_all, fields(source = %dependency.source_project_path.display()))]
    fn import(&self, project: &Project, base: &Path, dependency: &SourceDependency) -> PomgenResult<Vec<Command>> {
        let source = self.loader.load_project(&dependency.source_project_path)?;

        let report = validate_module_mapping(&source, project, &dependency.module_mapping)?;
        if !report.missing_source_modules.is_empty() {
            self.notifications
                .emit(Notification::SourceModulesNotFound(report.missing_source_modules));
        }
        if !report.missing_target_modules.is_empty() {
            self.notifications
                .emit(Notification::TargetModulesNotFound(report.missing_target_modules));
        }
        if !report.duplicate_targets.is_empty() {
            self.notifications
                .emit(Notification::DuplicateTargetModules(report.duplicate_targets));
        }

        let transformations: Arc<[PackageTransformation]> =
            build_transformations(&source, project, &dependency.module_mapping).into();

        let mut commands = Vec::new();
        for (source_module, target_module) in &dependency.module_mapping {
            for file in self.discover(&source, project, base, dependency, source_module, target_module)? {
                commands.push(Command::CopyAndTransformSourceFile(SourceCopy {
                    source_path: file.source,
                    target_path: file.target,
                    transformations: Arc::clone(&transformations),
                    source_project_path: dependency.source_project_path.clone(),
                    source_module: source_module.clone(),
                }));
            }
        }
        info!(files = commands.len(), "Source files discovered");
        Ok(commands)
    }

    /// Source files under `<module>/src/<set>/<language>/<package path>`.
    ///
    /// Only `kotlin`, `java` and the target's own language are visited, and
    /// only files carrying that language's extension are taken. Missing
    /// directories are skipped; a file standing where a directory belongs is
    /// reported and skipped.
    fn discover(
        &self,
        source: &Project,
        target: &Project,
        base: &Path,
        dependency: &SourceDependency,
        source_module: &str,
        target_module: &str,
    ) -> PomgenResult<Vec<DiscoveredFile>> {
        let mut files = Vec::new();

        for set in SOURCE_SETS {
            let set_dir = dependency
                .source_project_path
                .join(source_module)
                .join("src")
                .join(set);
            if !self.is_walkable(&set_dir) {
                continue;
            }
            for language in languages(target) {
                let language_dir = set_dir.join(language);
                if !self.is_walkable(&language_dir) {
                    continue;
                }
                let root = join_all(&language_dir, &source.package_segments(source_module));
                if !self.is_walkable(&root) {
                    continue;
                }

                let target_root = join_all(
                    &base.join(target_module).join("src").join(set).join(language),
                    &target.package_segments(target_module),
                );
                let extension = language_extension(language);
                for file in self.filesystem.walk_files(&root)? {
                    if file.extension().and_then(|e| e.to_str()) != Some(extension) {
                        debug!(path = %file.display(), "Skipping non-source file");
                        continue;
                    }
                    let Ok(relative) = file.strip_prefix(&root) else {
                        continue;
                    };
                    let target_path = target_root.join(relative);
                    files.push(DiscoveredFile {
                        source: file,
                        target: target_path,
                    });
                }
            }
        }
        Ok(files)
    }

    fn is_walkable(&self, dir: &Path) -> bool {
        if !self.filesystem.exists(dir) {
            debug!(path = %dir.display(), "Not present");
            return false;
        }
        if !self.filesystem.is_dir(dir) {
            self.notifications
                .emit(Notification::PathNotDirectory(dir.to_path_buf()));
            return false;
        }
        true
    }
}

const KNOWN_LANGUAGES: [&str; 2] = ["kotlin", "java"];

fn languages(target: &Project) -> Vec<&str> {
    let mut languages = KNOWN_LANGUAGES.to_vec();
    if !languages.contains(&target.language.as_str()) {
        languages.push(target.language.as_str());
    }
    languages
}

fn language_extension(language: &str) -> &str {
    match language {
        "kotlin" => "kt",
        other => other,
    }
}

struct DiscoveredFile {
    source: PathBuf,
    target: PathBuf,
}

fn join_all(base: &Path, segments: &[String]) -> PathBuf {
    segments.iter().fold(base.to_path_buf(), |path, segment| path.join(segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFilesystem, MockNotifications, MockProjectLoader};
    use crate::domain::DomainError;
    use crate::error::PomgenError;
    use mockall::predicate::eq;

    fn mapping(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(s, t)| (s.to_string(), t.to_string()))
            .collect()
    }

    fn library() -> Project {
        Project::new(["com", "lib"], ["shared"])
            .with_module("util", Vec::<String>::new())
            .with_export("util")
    }

    fn application() -> Project {
        Project::new(["com", "app"], ["main"])
            .with_module("common", Vec::<String>::new())
            .with_source_dependency(SourceDependency {
                source_project_path: "/repos/lib".into(),
                module_mapping: mapping(&[("util", "common")]),
            })
    }

    #[test]
    fn direct_rule_maps_module_packages() {
        let rules = build_transformations(&library(), &application(), &mapping(&[("util", "common")]));
        assert_eq!(
            rules,
            vec![PackageTransformation::new(
                vec!["com".into(), "lib".into(), "shared".into(), "util".into()],
                vec!["com".into(), "app".into(), "main".into(), "common".into()],
            )]
        );
    }

    #[test]
    fn modules_shared_from_a_third_project_get_rules() {
        let upstream = SourceDependency {
            source_project_path: "/repos/reusable".into(),
            module_mapping: mapping(&[("di-contract", "di-contract"), ("other", "other")]),
        };
        let source = library().with_source_dependency(upstream.clone());
        let target = application().with_source_dependency(SourceDependency {
            module_mapping: mapping(&[("di-contract", "di-contract")]),
            ..upstream
        });

        let rules = build_transformations(&source, &target, &mapping(&[("util", "common")]));
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].source, vec!["com", "lib", "shared", "di", "contract"]);
        assert_eq!(rules[1].target, vec!["com", "app", "main", "di", "contract"]);
    }

    /// Filesystem mock answering `exists` / `is_dir` from fixed lists and
    /// walking every listed file under the requested root.
    fn tree(dirs: &'static [&'static str], files: &'static [&'static str]) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(move |path| dirs.iter().chain(files).any(|p| path == Path::new(p)));
        fs.expect_is_dir()
            .returning(move |path| dirs.iter().any(|p| path == Path::new(p)));
        fs.expect_walk_files().returning(move |root| {
            Ok(files
                .iter()
                .map(PathBuf::from)
                .filter(|file| file.starts_with(root))
                .collect())
        });
        fs
    }

    fn importer(fs: MockFilesystem, notifications: MockNotifications) -> SourceImporter {
        let mut loader = MockProjectLoader::new();
        loader
            .expect_load_project()
            .with(eq(Path::new("/repos/lib")))
            .returning(|_| Ok(library()));
        SourceImporter::new(Arc::new(fs), Arc::new(loader), Arc::new(notifications))
    }

    fn silent() -> MockNotifications {
        let mut notifications = MockNotifications::new();
        notifications.expect_emit().never();
        notifications
    }

    #[test]
    fn discovered_files_land_under_target_package() {
        let fs = tree(
            &[
                "/repos/lib/util/src/main",
                "/repos/lib/util/src/main/kotlin",
                "/repos/lib/util/src/main/kotlin/com/lib/shared/util",
            ],
            &[
                "/repos/lib/util/src/main/kotlin/com/lib/shared/util/Strings.kt",
                "/repos/lib/util/src/main/kotlin/com/lib/shared/util/text/Case.kt",
            ],
        );

        let commands = importer(fs, silent())
            .commands(&application(), Path::new("out"))
            .unwrap();

        let targets: Vec<_> = commands.iter().map(Command::path).collect();
        assert_eq!(
            targets,
            vec![
                Path::new("out/common/src/main/kotlin/com/app/main/common/Strings.kt"),
                Path::new("out/common/src/main/kotlin/com/app/main/common/text/Case.kt"),
            ]
        );
        match &commands[0] {
            Command::CopyAndTransformSourceFile(copy) => {
                assert_eq!(copy.source_module, "util");
                assert_eq!(copy.source_project_path, Path::new("/repos/lib"));
                assert_eq!(copy.transformations.len(), 1);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn resources_and_foreign_extensions_are_left_alone() {
        let fs = tree(
            &[
                "/repos/lib/util/src/main",
                "/repos/lib/util/src/main/kotlin",
                "/repos/lib/util/src/main/kotlin/com/lib/shared/util",
                "/repos/lib/util/src/main/resources",
                "/repos/lib/util/src/main/resources/com/lib/shared/util",
                "/repos/lib/util/src/test",
                "/repos/lib/util/src/test/java",
                "/repos/lib/util/src/test/java/com/lib/shared/util",
            ],
            &[
                "/repos/lib/util/src/main/kotlin/com/lib/shared/util/Strings.kt",
                "/repos/lib/util/src/main/kotlin/com/lib/shared/util/logo.png",
                "/repos/lib/util/src/main/kotlin/com/lib/shared/util/Legacy.java",
                "/repos/lib/util/src/main/resources/com/lib/shared/util/settings.json",
                "/repos/lib/util/src/test/java/com/lib/shared/util/StringsTest.java",
                "/repos/lib/util/src/test/java/com/lib/shared/util/fixture.properties",
            ],
        );

        let commands = importer(fs, silent())
            .commands(&application(), Path::new("out"))
            .unwrap();

        let targets: Vec<_> = commands.iter().map(Command::path).collect();
        assert_eq!(
            targets,
            vec![
                Path::new("out/common/src/main/kotlin/com/app/main/common/Strings.kt"),
                Path::new("out/common/src/test/java/com/app/main/common/StringsTest.java"),
            ]
        );
    }

    #[test]
    fn target_language_directory_is_visited() {
        let fs = tree(
            &[
                "/repos/lib/util/src/main",
                "/repos/lib/util/src/main/scala",
                "/repos/lib/util/src/main/scala/com/lib/shared/util",
            ],
            &["/repos/lib/util/src/main/scala/com/lib/shared/util/Strings.scala"],
        );
        let project = application().with_language("scala");

        let commands = importer(fs, silent())
            .commands(&project, Path::new("out"))
            .unwrap();

        assert_eq!(
            commands.iter().map(Command::path).collect::<Vec<_>>(),
            vec![Path::new("out/common/src/main/scala/com/app/main/common/Strings.scala")]
        );
    }

    #[test]
    fn file_in_place_of_source_set_is_a_warning() {
        let fs = tree(&[], &["/repos/lib/util/src/main"]);
        let mut notifications = MockNotifications::new();
        notifications
            .expect_emit()
            .with(eq(Notification::PathNotDirectory("/repos/lib/util/src/main".into())))
            .times(1)
            .return_const(());

        let commands = importer(fs, notifications)
            .commands(&application(), Path::new("out"))
            .unwrap();
        assert!(commands.is_empty());
    }

    #[test]
    fn file_in_place_of_language_directory_is_a_warning() {
        let fs = tree(&["/repos/lib/util/src/main"], &["/repos/lib/util/src/main/kotlin"]);
        let mut notifications = MockNotifications::new();
        notifications
            .expect_emit()
            .with(eq(Notification::PathNotDirectory(
                "/repos/lib/util/src/main/kotlin".into(),
            )))
            .times(1)
            .return_const(());

        let commands = importer(fs, notifications)
            .commands(&application(), Path::new("out"))
            .unwrap();
        assert!(commands.is_empty());
    }

    #[test]
    fn mapping_warnings_are_emitted_and_import_continues() {
        let mut loader = MockProjectLoader::new();
        loader.expect_load_project().returning(|_| {
            Ok(library().with_export("ghost"))
        });
        let fs = tree(&[], &[]);

        let mut notifications = MockNotifications::new();
        notifications
            .expect_emit()
            .with(eq(Notification::SourceModulesNotFound(vec!["ghost".into()])))
            .times(1)
            .return_const(());
        notifications
            .expect_emit()
            .with(eq(Notification::TargetModulesNotFound(vec!["elsewhere".into()])))
            .times(1)
            .return_const(());

        let project = Project::new(["com", "app"], ["main"])
            .with_module("common", Vec::<String>::new())
            .with_source_dependency(SourceDependency {
                source_project_path: "/repos/lib".into(),
                module_mapping: mapping(&[("util", "common"), ("ghost", "elsewhere")]),
            });
        let importer = SourceImporter::new(Arc::new(fs), Arc::new(loader), Arc::new(notifications));
        assert!(importer.commands(&project, Path::new("out")).unwrap().is_empty());
    }

    #[test]
    fn non_exported_module_aborts() {
        let mut loader = MockProjectLoader::new();
        loader
            .expect_load_project()
            .returning(|_| Ok(Project::new(["com", "lib"], ["shared"]).with_module("util", Vec::<String>::new())));
        let importer = SourceImporter::new(
            Arc::new(MockFilesystem::new()),
            Arc::new(loader),
            Arc::new(MockNotifications::new()),
        );
        let err = importer.commands(&application(), Path::new("out")).unwrap_err();
        assert!(matches!(
            err,
            PomgenError::Domain(DomainError::NonExportedModules { .. })
        ));
    }

    #[test]
    fn file_in_place_of_package_root_is_a_warning() {
        let fs = tree(
            &["/repos/lib/util/src/test", "/repos/lib/util/src/test/java"],
            &["/repos/lib/util/src/test/java/com/lib/shared/util"],
        );
        let mut notifications = MockNotifications::new();
        notifications
            .expect_emit()
            .with(eq(Notification::PathNotDirectory(
                "/repos/lib/util/src/test/java/com/lib/shared/util".into(),
            )))
            .times(1)
            .return_const(());

        let commands = importer(fs, notifications)
            .commands(&application(), Path::new("out"))
            .unwrap();
        assert!(commands.is_empty());
    }
}
