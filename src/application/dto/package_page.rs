use crate::inspection::domain::{ArtifactRef, ResolvedPackage};

/// Data behind a package page: every published version plus the versions
/// already analyzed by the backend
#[derive(Debug, Clone, PartialEq)]
pub struct PackagePage {
    pub artifact: ArtifactRef,
    /// Most recent first
    pub versions: Vec<String>,
    pub analyzed: Vec<ResolvedPackage>,
}

impl PackagePage {
    pub fn new(artifact: ArtifactRef, versions: Vec<String>, analyzed: Vec<ResolvedPackage>) -> Self {
        Self {
            artifact,
            versions,
            analyzed,
        }
    }

    pub fn has_version(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v == version)
    }

    pub fn is_analyzed(&self, version: &str) -> bool {
        self.analyzed.iter().any(|pkg| pkg.gav.version == version)
    }

    pub fn latest_version(&self) -> Option<&str> {
        self.versions.first().map(String::as_str)
    }

    /// Adds a freshly analyzed package; a version already present is kept as is
    pub fn mark_as_analyzed(&mut self, package: ResolvedPackage) {
        if !self.is_analyzed(&package.gav.version) {
            self.analyzed.push(package);
        }
    }
}
