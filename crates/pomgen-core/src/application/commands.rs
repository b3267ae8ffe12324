//! Side-effecting actions produced by the generator.
//!
//! Commands are plain values: built in memory, then executed once each, in
//! order, against an [`Environment`]. Every file write is content-diffed so
//! reruns converge without touching unchanged files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    application::{Environment, ports::Notification},
    domain::{KeyPath, PackageTransformation, rewrite_source},
    error::PomgenResult,
};

/// One file to copy from a source project, with its package rewrites.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceCopy {
    pub source_path: PathBuf,
    pub target_path: PathBuf,
    /// Shared by every file of one source dependency.
    pub transformations: Arc<[PackageTransformation]>,
    pub source_project_path: PathBuf,
    pub source_module: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Lines joined with `\n`, plus a trailing newline.
    WriteFile { path: PathBuf, lines: Vec<String> },
    WriteTextFile {
        path: PathBuf,
        content: String,
        executable: bool,
    },
    CreateDirectory { path: PathBuf },
    /// Store one value inside a JSON document.
    SetJsonConfig {
        path: PathBuf,
        key: KeyPath,
        value: Value,
    },
    CopyAndTransformSourceFile(SourceCopy),
}

/// What executing a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Modified,
    Unchanged,
    DirectoryCreated,
    DirectoryExisted,
    ConfigStored,
}

impl Command {
    pub fn write_file(path: impl Into<PathBuf>, lines: Vec<String>) -> Self {
        Self::WriteFile {
            path: path.into(),
            lines,
        }
    }

    pub fn write_text(path: impl Into<PathBuf>, content: impl Into<String>, executable: bool) -> Self {
        Self::WriteTextFile {
            path: path.into(),
            content: content.into(),
            executable,
        }
    }

    pub fn create_directory(path: impl Into<PathBuf>) -> Self {
        Self::CreateDirectory { path: path.into() }
    }

    pub fn set_json(path: impl Into<PathBuf>, key: impl Into<KeyPath>, value: impl Into<Value>) -> Self {
        Self::SetJsonConfig {
            path: path.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// The path this command writes to.
    pub fn path(&self) -> &Path {
        match self {
            Self::WriteFile { path, .. }
            | Self::WriteTextFile { path, .. }
            | Self::CreateDirectory { path }
            | Self::SetJsonConfig { path, .. } => path,
            Self::CopyAndTransformSourceFile(copy) => &copy.target_path,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::WriteFile { .. } => "write-file",
            Self::WriteTextFile { .. } => "write-text-file",
            Self::CreateDirectory { .. } => "create-directory",
            Self::SetJsonConfig { .. } => "set-json-config",
            Self::CopyAndTransformSourceFile(_) => "copy-and-transform",
        }
    }

    #[instrument(skip_all, fields(command = self.kind(), path = %self.path().display()))]
    pub fn execute(&self, env: &Environment) -> PomgenResult<Outcome> {
        let outcome = match self {
            Self::WriteFile { path, lines } => {
                let mut content = lines.join("\n");
                content.push('\n');
                write_if_changed(env, path, &content, false)?
            }
            Self::WriteTextFile {
                path,
                content,
                executable,
            } => write_if_changed(env, path, content, *executable)?,
            Self::CreateDirectory { path } => create_directory(env, path)?,
            Self::SetJsonConfig { path, key, value } => {
                env.stores.open(path)?.store(key, value.clone())?;
                Outcome::ConfigStored
            }
            Self::CopyAndTransformSourceFile(copy) => {
                copy_and_transform(env, copy).inspect_err(|e| {
                    env.notify(Notification::FileTransformationError {
                        source_path: copy.source_path.clone(),
                        target_path: copy.target_path.clone(),
                        message: e.to_string(),
                    })
                })?
            }
        };
        debug!(?outcome, "Command executed");
        Ok(outcome)
    }
}

fn write_if_changed(env: &Environment, path: &Path, content: &str, executable: bool) -> PomgenResult<Outcome> {
    let fs = &env.filesystem;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs.create_dir_all(parent)?;
    }

    let existed = fs.exists(path);
    let outcome = if existed && fs.read_to_string(path)? == content {
        Outcome::Unchanged
    } else {
        fs.write_file(path, content)?;
        if existed { Outcome::Modified } else { Outcome::Created }
    };

    if executable {
        fs.set_permissions(path, true)?;
    }

    let path = path.to_path_buf();
    env.notify(match outcome {
        Outcome::Created => Notification::FileCreated(path),
        Outcome::Modified => Notification::FileModified(path),
        _ => Notification::FileUnchanged(path),
    });
    Ok(outcome)
}

fn create_directory(env: &Environment, path: &Path) -> PomgenResult<Outcome> {
    let existed = env.filesystem.is_dir(path);
    env.filesystem.create_dir_all(path)?;
    if existed {
        return Ok(Outcome::DirectoryExisted);
    }
    env.notify(Notification::DirectoryCreated(path.to_path_buf()));
    Ok(Outcome::DirectoryCreated)
}

fn copy_and_transform(env: &Environment, copy: &SourceCopy) -> PomgenResult<Outcome> {
    let original = env.filesystem.read_to_string(&copy.source_path)?;
    let transformed = rewrite_source(
        &original,
        &copy.transformations,
        &copy.source_project_path,
        &copy.source_module,
    );
    write_if_changed(env, &copy.target_path, &transformed, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::{
        KeyValueStore, KeyValueStoreFactory, MockFilesystem, MockNotifications,
    };
    use mockall::predicate::eq;

    struct NoStores;

    impl KeyValueStoreFactory for NoStores {
        fn open(&self, path: &Path) -> PomgenResult<Box<dyn KeyValueStore>> {
            Err(ApplicationError::ConfigStore {
                path: path.to_path_buf(),
                reason: "not available in this test".into(),
            }
            .into())
        }
    }

    fn env(fs: MockFilesystem, notifications: MockNotifications) -> Environment {
        Environment::new(Arc::new(fs), Arc::new(NoStores), Arc::new(notifications))
    }

    #[test]
    fn write_file_creates_missing_file_with_trailing_newline() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().return_const(false);
        fs.expect_write_file()
            .with(eq(Path::new("out/pom.xml")), eq("<a/>\n<b/>\n"))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut notifications = MockNotifications::new();
        notifications
            .expect_emit()
            .with(eq(Notification::FileCreated("out/pom.xml".into())))
            .times(1)
            .return_const(());

        let command = Command::write_file("out/pom.xml", vec!["<a/>".into(), "<b/>".into()]);
        let outcome = command.execute(&env(fs, notifications)).unwrap();
        assert_eq!(outcome, Outcome::Created);
    }

    #[test]
    fn identical_content_is_not_rewritten() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().return_const(true);
        fs.expect_read_to_string().returning(|_| Ok("same".into()));
        fs.expect_write_file().never();
        fs.expect_set_permissions()
            .with(eq(Path::new("scripts/build.sh")), eq(true))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut notifications = MockNotifications::new();
        notifications
            .expect_emit()
            .with(eq(Notification::FileUnchanged("scripts/build.sh".into())))
            .times(1)
            .return_const(());

        let command = Command::write_text("scripts/build.sh", "same", true);
        let outcome = command.execute(&env(fs, notifications)).unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn changed_content_is_modified() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().return_const(true);
        fs.expect_read_to_string().returning(|_| Ok("old".into()));
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));
        let mut notifications = MockNotifications::new();
        notifications
            .expect_emit()
            .withf(|n| matches!(n, Notification::FileModified(_)))
            .times(1)
            .return_const(());

        let outcome = Command::write_text("a.txt", "new", false)
            .execute(&env(fs, notifications))
            .unwrap();
        assert_eq!(outcome, Outcome::Modified);
    }

    #[test]
    fn existing_directory_emits_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let mut notifications = MockNotifications::new();
        notifications.expect_emit().never();

        let outcome = Command::create_directory("scripts")
            .execute(&env(fs, notifications))
            .unwrap();
        assert_eq!(outcome, Outcome::DirectoryExisted);
    }

    #[test]
    fn failed_copy_reports_then_propagates() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string().returning(|path| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "vanished".into(),
            }
            .into())
        });
        let mut notifications = MockNotifications::new();
        notifications
            .expect_emit()
            .withf(|n| {
                matches!(n, Notification::FileTransformationError { message, .. } if message.contains("vanished"))
            })
            .times(1)
            .return_const(());

        let command = Command::CopyAndTransformSourceFile(SourceCopy {
            source_path: "lib/core/src/main/kotlin/A.kt".into(),
            target_path: "app/core/src/main/kotlin/A.kt".into(),
            transformations: Arc::from(Vec::new()),
            source_project_path: "lib".into(),
            source_module: "core".into(),
        });
        assert!(command.execute(&env(fs, notifications)).is_err());
    }
}
