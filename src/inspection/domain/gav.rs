use crate::shared::error::JarHellError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a single coordinate segment (security limit)
const MAX_SEGMENT_LENGTH: usize = 255;

/// Group/artifact/version coordinate of a published library unit.
///
/// The string form is `groupId:artifactId:version[:classifier]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gav {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl Gav {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: None,
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// The version-less part of this coordinate
    pub fn artifact_ref(&self) -> ArtifactRef {
        ArtifactRef::new(self.group_id.clone(), self.artifact_id.clone())
    }

    /// Whether both coordinates name the same group and artifact
    pub fn same_artifact(&self, other: &Gav) -> bool {
        self.group_id == other.group_id && self.artifact_id == other.artifact_id
    }

    /// Returns the same coordinate pointing at another version, without classifier
    pub fn with_version(&self, version: impl Into<String>) -> Gav {
        Gav::new(self.group_id.clone(), self.artifact_id.clone(), version)
    }
}

impl fmt::Display for Gav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        Ok(())
    }
}

impl FromStr for Gav {
    type Err = JarHellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = split_segments(s)?;
        match segments.as_slice() {
            [group_id, artifact_id, version] => Ok(Gav::new(*group_id, *artifact_id, *version)),
            [group_id, artifact_id, version, classifier] => {
                Ok(Gav::new(*group_id, *artifact_id, *version).with_classifier(*classifier))
            }
            other => Err(JarHellError::InvalidCoordinate {
                input: s.to_string(),
                reason: format!("expected 3 or 4 segments, found {}", other.len()),
            }),
        }
    }
}

/// Group and artifact without a version, as used by version listings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRef {
    pub group_id: String,
    pub artifact_id: String,
}

impl ArtifactRef {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

impl FromStr for ArtifactRef {
    type Err = JarHellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = split_segments(s)?;
        match segments.as_slice() {
            [group_id, artifact_id] => Ok(ArtifactRef::new(*group_id, *artifact_id)),
            other => Err(JarHellError::InvalidCoordinate {
                input: s.to_string(),
                reason: format!("expected 2 segments, found {}", other.len()),
            }),
        }
    }
}

/// A package page target: either a bare artifact or a fully-qualified coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coordinate {
    Artifact(ArtifactRef),
    Package(Gav),
}

impl Coordinate {
    pub fn artifact_ref(&self) -> ArtifactRef {
        match self {
            Coordinate::Artifact(artifact) => artifact.clone(),
            Coordinate::Package(gav) => gav.artifact_ref(),
        }
    }

    pub fn gav(&self) -> Option<&Gav> {
        match self {
            Coordinate::Artifact(_) => None,
            Coordinate::Package(gav) => Some(gav),
        }
    }
}

impl FromStr for Coordinate {
    type Err = JarHellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.split(':').count() == 2 {
            s.parse().map(Coordinate::Artifact)
        } else {
            s.parse().map(Coordinate::Package)
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Artifact(artifact) => artifact.fmt(f),
            Coordinate::Package(gav) => gav.fmt(f),
        }
    }
}

/// Splits on ':' and validates every segment; the segment count is checked by callers
fn split_segments(s: &str) -> Result<Vec<&str>, JarHellError> {
    let segments: Vec<&str> = s.split(':').collect();
    for (idx, segment) in segments.iter().enumerate() {
        if segment.trim().is_empty() {
            return Err(JarHellError::InvalidCoordinate {
                input: s.to_string(),
                reason: format!("segment {} is empty", idx + 1),
            });
        }
        if segment.len() > MAX_SEGMENT_LENGTH {
            return Err(JarHellError::InvalidCoordinate {
                input: s.to_string(),
                reason: format!(
                    "segment {} is too long ({} bytes). Maximum allowed: {} bytes",
                    idx + 1,
                    segment.len(),
                    MAX_SEGMENT_LENGTH
                ),
            });
        }
        // Security: the segments end up in URL paths
        if segment.contains('/') || segment.contains('\\') || segment.contains("..") {
            return Err(JarHellError::InvalidCoordinate {
                input: s.to_string(),
                reason: format!("segment {} contains path characters", idx + 1),
            });
        }
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_segments() {
        let gav: Gav = "org.slf4j:slf4j-api:2.0.9".parse().unwrap();
        assert_eq!(gav.group_id, "org.slf4j");
        assert_eq!(gav.artifact_id, "slf4j-api");
        assert_eq!(gav.version, "2.0.9");
        assert!(gav.classifier.is_none());
    }

    #[test]
    fn test_parse_four_segments() {
        let gav: Gav = "io.netty:netty-transport-native-epoll:4.1.100.Final:linux-x86_64"
            .parse()
            .unwrap();
        assert_eq!(gav.classifier.as_deref(), Some("linux-x86_64"));
    }

    #[test]
    fn test_round_trip_without_classifier() {
        let gav = Gav::new("com.google.guava", "guava", "33.0.0-jre");
        let text = gav.to_string();
        assert_eq!(text, "com.google.guava:guava:33.0.0-jre");
        assert_eq!(text.parse::<Gav>().unwrap(), gav);
    }

    #[test]
    fn test_round_trip_with_classifier() {
        let gav = Gav::new("org.openjfx", "javafx-base", "21").with_classifier("win");
        let text = gav.to_string();
        assert_eq!(text, "org.openjfx:javafx-base:21:win");
        assert_eq!(text.parse::<Gav>().unwrap(), gav);
    }

    #[test]
    fn test_parse_rejects_wrong_segment_counts() {
        for input in ["org.slf4j", "org.slf4j:slf4j-api", "a:b:c:d:e", ""] {
            let result = input.parse::<Gav>();
            assert!(
                matches!(result, Err(JarHellError::InvalidCoordinate { .. })),
                "expected rejection for '{}'",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_empty_required_segment() {
        assert!("org.slf4j::2.0.9".parse::<Gav>().is_err());
        assert!(":slf4j-api:2.0.9".parse::<Gav>().is_err());
        assert!("org.slf4j:slf4j-api:".parse::<Gav>().is_err());
        assert!("org.slf4j:slf4j-api:2.0.9:".parse::<Gav>().is_err());
    }

    #[test]
    fn test_parse_rejects_path_characters() {
        assert!("org/slf4j:slf4j-api:2.0.9".parse::<Gav>().is_err());
        assert!("org.slf4j:..:2.0.9".parse::<Gav>().is_err());
    }

    #[test]
    fn test_json_uses_camel_case_and_omits_classifier() {
        let gav = Gav::new("g", "a", "1.0");
        let json = serde_json::to_value(&gav).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"groupId": "g", "artifactId": "a", "version": "1.0"})
        );
    }

    #[test]
    fn test_artifact_ref_parse_and_display() {
        let artifact: ArtifactRef = "org.slf4j:slf4j-api".parse().unwrap();
        assert_eq!(artifact.to_string(), "org.slf4j:slf4j-api");
        assert!("org.slf4j:slf4j-api:1.0".parse::<ArtifactRef>().is_err());
    }

    #[test]
    fn test_coordinate_parse() {
        let artifact: Coordinate = "g:a".parse().unwrap();
        assert!(artifact.gav().is_none());
        let package: Coordinate = "g:a:1.0".parse().unwrap();
        assert_eq!(package.gav().unwrap().version, "1.0");
        assert_eq!(package.artifact_ref(), ArtifactRef::new("g", "a"));
        assert!("g".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_same_artifact() {
        let a = Gav::new("g", "a", "1.0");
        let b = Gav::new("g", "a", "2.0");
        let c = Gav::new("g", "b", "1.0");
        assert!(a.same_artifact(&b));
        assert!(!a.same_artifact(&c));
    }
}
