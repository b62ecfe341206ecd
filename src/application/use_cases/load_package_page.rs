use crate::application::dto::PackagePage;
use crate::inspection::domain::Coordinate;
use crate::ports::outbound::PackageRepository;
use crate::shared::error::JarHellError;
use crate::shared::Result;
use anyhow::Context;

/// LoadPackagePageUseCase - loads the data behind a package page
///
/// Versions and analyzed packages are requested together. Versions come back
/// ascending from the backend and are reversed so the newest comes first.
pub struct LoadPackagePageUseCase<R> {
    repository: R,
}

impl<R: PackageRepository> LoadPackagePageUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// # Errors
    /// `NotFound` when the artifact is unknown, or when the coordinate names a
    /// version that was never published
    pub async fn execute(&self, coordinate: &Coordinate) -> Result<PackagePage> {
        let artifact = coordinate.artifact_ref();
        tracing::debug!(%artifact, "loading package page");

        let (mut versions, analyzed) = tokio::try_join!(
            self.repository.versions(&artifact),
            self.repository.analyzed_packages(&artifact),
        )
        .with_context(|| format!("Failed to load package page for {}", artifact))?;
        versions.reverse();

        let page = PackagePage::new(artifact, versions, analyzed);
        if let Some(gav) = coordinate.gav() {
            if !page.has_version(&gav.version) {
                return Err(JarHellError::not_found(format!(
                    "Version {} of {} does not exist",
                    gav.version, page.artifact
                ))
                .into());
            }
        }
        Ok(page)
    }
}
