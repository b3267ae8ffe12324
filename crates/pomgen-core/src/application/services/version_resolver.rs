//! Override-then-lookup version resolution.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::VersionLookup},
    domain::{Coordinate, GroupArtifact, Project},
    error::PomgenResult,
};

/// Resolves the version of every coordinate the builders emit.
///
/// A pin in the project's `versionOverrides` wins and never touches the
/// network; everything else goes to the injected [`VersionLookup`].
#[derive(Clone)]
pub struct VersionResolver {
    lookup: Arc<dyn VersionLookup>,
}

impl VersionResolver {
    pub fn new(lookup: Arc<dyn VersionLookup>) -> Self {
        Self { lookup }
    }

    #[instrument(skip(self, project), level = "debug")]
    pub fn resolve(&self, project: &Project, group: &str, artifact: &str) -> PomgenResult<String> {
        if let Some(pinned) = project.version_override(group, artifact) {
            debug!(version = pinned, "Using pinned version");
            return Ok(pinned.to_string());
        }
        self.lookup.latest_release_version(group, artifact)
    }

    pub fn coordinate(
        &self,
        project: &Project,
        group: &str,
        artifact: &str,
        scope: Option<&str>,
    ) -> PomgenResult<Coordinate> {
        Ok(Coordinate {
            group: group.to_string(),
            artifact: artifact.to_string(),
            version: self.resolve(project, group, artifact)?,
            scope: scope.map(str::to_string),
        })
    }
}

/// Memoizes another lookup by (group, artifact) for the length of one run.
pub struct CachingVersionLookup {
    inner: Arc<dyn VersionLookup>,
    cache: Mutex<HashMap<GroupArtifact, String>>,
}

impl CachingVersionLookup {
    pub fn new(inner: Arc<dyn VersionLookup>) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn cache(&self) -> PomgenResult<MutexGuard<'_, HashMap<GroupArtifact, String>>> {
        self.cache
            .lock()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

impl VersionLookup for CachingVersionLookup {
    fn latest_release_version(&self, group: &str, artifact: &str) -> PomgenResult<String> {
        let key = GroupArtifact::new(group, artifact);
        let cached = self.cache()?.get(&key).cloned();
        if let Some(version) = cached {
            return Ok(version);
        }

        let version = self.inner.latest_release_version(group, artifact)?;
        self.cache()?.insert(key, version.clone());
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockVersionLookup;
    use crate::domain::VersionOverride;
    use mockall::predicate::eq;

    #[test]
    fn pinned_versions_skip_the_lookup() {
        let mut lookup = MockVersionLookup::new();
        lookup.expect_latest_release_version().never();
        let project = Project::new(["com"], ["widget"])
            .with_version_override(VersionOverride::new("org.json", "json", "20240303"));

        let resolver = VersionResolver::new(Arc::new(lookup));
        assert_eq!(resolver.resolve(&project, "org.json", "json").unwrap(), "20240303");
    }

    #[test]
    fn unpinned_versions_are_looked_up() {
        let mut lookup = MockVersionLookup::new();
        lookup
            .expect_latest_release_version()
            .with(eq("org.json"), eq("json"))
            .times(1)
            .returning(|_, _| Ok("1.2.3".into()));
        let project = Project::new(["com"], ["widget"]);

        let coordinate = VersionResolver::new(Arc::new(lookup))
            .coordinate(&project, "org.json", "json", Some("test"))
            .unwrap();
        assert_eq!(coordinate.version, "1.2.3");
        assert_eq!(coordinate.scope.as_deref(), Some("test"));
    }

    #[test]
    fn caching_lookup_fetches_each_coordinate_once() {
        let mut inner = MockVersionLookup::new();
        inner
            .expect_latest_release_version()
            .times(2)
            .returning(|_, artifact| Ok(format!("{}-1.0", artifact.len())));
        let caching = CachingVersionLookup::new(Arc::new(inner));

        assert_eq!(caching.latest_release_version("g", "a").unwrap(), "1-1.0");
        assert_eq!(caching.latest_release_version("g", "a").unwrap(), "1-1.0");
        assert_eq!(caching.latest_release_version("g", "bb").unwrap(), "2-1.0");
    }
}
