//! Release-version lookup against a Maven repository's `maven-metadata.xml`.

use std::sync::Arc;
use std::time::Duration;

use pomgen_core::{
    application::{
        ApplicationError,
        ports::{Notification, Notifications, VersionLookup},
    },
    domain::{Coordinate, is_release_version, latest_release},
    error::{PomgenError, PomgenResult},
};
use quick_xml::{Reader, escape::resolve_predefined_entity, events::Event};
use reqwest::blocking::Client;
use tracing::{debug, instrument};

pub const MAVEN_CENTRAL: &str = "https://repo1.maven.org/maven2";

const RELEASE_PATH: [&str; 3] = ["metadata", "versioning", "release"];
const VERSION_PATH: [&str; 4] = ["metadata", "versioning", "versions", "version"];

/// Blocking HTTP lookup. Every call is a fresh request; wrap it in
/// `CachingVersionLookup` to memoize within a run.
pub struct MavenCentralLookup {
    client: Client,
    base_url: String,
    notifications: Option<Arc<dyn Notifications>>,
}

impl MavenCentralLookup {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> PomgenResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pomgen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PomgenError::Configuration {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            notifications: None,
        })
    }

    /// Report each successful lookup as [`Notification::VersionResolved`].
    pub fn with_notifications(mut self, notifications: Arc<dyn Notifications>) -> Self {
        self.notifications = Some(notifications);
        self
    }

    /// `<base>/<group as path>/<artifact>/maven-metadata.xml`
    pub fn metadata_uri(&self, group: &str, artifact: &str) -> String {
        format!(
            "{}/{}/{}/maven-metadata.xml",
            self.base_url,
            group.replace('.', "/"),
            artifact
        )
    }

    fn fetch(&self, uri: &str) -> PomgenResult<String> {
        let remote_error = |reason: String| ApplicationError::RemoteLookup {
            uri: uri.to_string(),
            reason,
        };
        let response = self
            .client
            .get(uri)
            .send()
            .map_err(|e| remote_error(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(remote_error(format!("HTTP status {}", status)).into());
        }
        Ok(response.text().map_err(|e| remote_error(e.to_string()))?)
    }
}

impl VersionLookup for MavenCentralLookup {
    #[instrument(skip(self))]
    fn latest_release_version(&self, group: &str, artifact: &str) -> PomgenResult<String> {
        let uri = self.metadata_uri(group, artifact);
        let metadata = parse_metadata(&self.fetch(&uri)?).map_err(|reason| {
            ApplicationError::MalformedMetadata {
                uri: uri.clone(),
                reason,
            }
        })?;

        let version = latest_release(metadata.versions.iter().map(String::as_str))
            .map(str::to_string)
            .or_else(|| metadata.release.filter(|r| is_release_version(r)))
            .ok_or_else(|| ApplicationError::NoReleaseVersionFound {
                group: group.to_string(),
                artifact: artifact.to_string(),
            })?;
        debug!(%version, %uri, "Latest release resolved");

        if let Some(notifications) = &self.notifications {
            notifications.emit(Notification::VersionResolved {
                uri,
                coordinate: Coordinate {
                    group: group.to_string(),
                    artifact: artifact.to_string(),
                    version: version.clone(),
                    scope: None,
                },
            });
        }
        Ok(version)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Metadata {
    release: Option<String>,
    versions: Vec<String>,
}

/// Collect `versioning/release` and every `versioning/versions/version`.
/// A second `release` element is an error.
///
/// Text and entity references arrive as separate events, so a leaf's value
/// is assembled until its end tag and classified there.
fn parse_metadata(xml: &str) -> Result<Metadata, String> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();
    let mut metadata = Metadata::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                text.clear();
            }
            Ok(Event::Text(e)) => {
                text.push_str(&e.decode().map_err(|e| e.to_string())?);
            }
            Ok(Event::GeneralRef(e)) => {
                let resolved = match e.resolve_char_ref().map_err(|e| e.to_string())? {
                    Some(ch) => ch.to_string(),
                    None => {
                        let name = e.decode().map_err(|e| e.to_string())?;
                        resolve_predefined_entity(&name)
                            .ok_or_else(|| format!("unknown entity '&{};'", name))?
                            .to_string()
                    }
                };
                text.push_str(&resolved);
            }
            Ok(Event::End(_)) => {
                let value = text.trim();
                if value.is_empty() {
                    // no value, or whitespace between elements
                } else if path == RELEASE_PATH {
                    if let Some(previous) = &metadata.release {
                        return Err(format!(
                            "multiple release elements: '{}', '{}'",
                            previous, value
                        ));
                    }
                    metadata.release = Some(value.to_string());
                } else if path == VERSION_PATH {
                    metadata.versions.push(value.to_string());
                }
                path.pop();
                text.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        buf.clear();
    }
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    const METADATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>org.json</groupId>
  <artifactId>json</artifactId>
  <versioning>
    <latest>20250107-RC1</latest>
    <release>20240303</release>
    <versions>
      <version>20231013</version>
      <version>20240303</version>
      <version>20250107-RC1</version>
    </versions>
  </versioning>
</metadata>"#;

    #[test]
    fn parses_release_and_versions() {
        let metadata = parse_metadata(METADATA).unwrap();
        assert_eq!(metadata.release.as_deref(), Some("20240303"));
        assert_eq!(metadata.versions, vec!["20231013", "20240303", "20250107-RC1"]);
    }

    #[test]
    fn padded_values_and_entities_are_assembled() {
        let xml = "<metadata><versioning>\n  <release>\n    2&#46;0\n  </release>\n  <versions>\n    <version>\n      1.0\n    </version>\n    <version>1&#x2E;5&amp;x</version>\n  </versions>\n</versioning></metadata>";
        let metadata = parse_metadata(xml).unwrap();
        assert_eq!(metadata.release.as_deref(), Some("2.0"));
        assert_eq!(metadata.versions, vec!["1.0", "1.5&x"]);
    }

    #[test]
    fn unknown_entity_is_malformed() {
        let xml = "<metadata><versioning><release>1&bogus;</release></versioning></metadata>";
        assert!(parse_metadata(xml).unwrap_err().contains("bogus"));
    }

    #[test]
    fn repeated_release_is_rejected() {
        let xml = "<metadata><versioning><release>1</release><release>2</release></versioning></metadata>";
        let err = parse_metadata(xml).unwrap_err();
        assert!(err.contains("multiple release elements"));
    }

    #[test]
    fn uri_uses_group_path() {
        let lookup = MavenCentralLookup::new("https://repo.example/maven2/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            lookup.metadata_uri("org.jetbrains.kotlin", "kotlin-stdlib"),
            "https://repo.example/maven2/org/jetbrains/kotlin/kotlin-stdlib/maven-metadata.xml"
        );
    }
}
