use super::ArtifactRef;
use serde::{Deserialize, Serialize};

/// One result of the Maven Central search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub g: String,
    pub a: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
}

impl SearchHit {
    pub fn artifact_ref(&self) -> ArtifactRef {
        ArtifactRef::new(self.g.clone(), self.a.clone())
    }

    /// `group:artifact`, abbreviating an artifact id that repeats its group id
    /// as `group:[...]suffix`
    pub fn short_label(&self) -> String {
        match self.a.strip_prefix(&self.g) {
            Some(suffix) if !suffix.is_empty() => format!("{}:[...]{}", self.g, suffix),
            _ => format!("{}:{}", self.g, self.a),
        }
    }

    /// Full coordinate of the latest version, when the index knows one
    pub fn latest_coordinate(&self) -> String {
        match &self.latest_version {
            Some(version) => format!("{}:{}:{}", self.g, self.a, version),
            None => format!("{}:{}", self.g, self.a),
        }
    }
}
