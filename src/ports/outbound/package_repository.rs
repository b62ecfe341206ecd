use crate::inspection::domain::{ArtifactRef, Gav, Package, ResolvedPackage, SearchHit};
use crate::shared::Result;
use async_trait::async_trait;

/// PackageRepository port for the jar hell REST backend
///
/// Implementations must be `Send + Sync`; the tree explorer issues sibling
/// fetches concurrently through a shared reference.
///
/// Errors are reported as [`crate::shared::error::JarHellError`] wrapped in
/// `anyhow`: `NotFound` for 404-style answers, `Server` for everything else.
#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// Free-text search over Maven Central
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;

    /// All published versions of an artifact in ascending order
    ///
    /// # Errors
    /// `NotFound` when the backend does not know the artifact
    async fn versions(&self, artifact: &ArtifactRef) -> Result<Vec<String>>;

    /// Versions of an artifact that were already analyzed
    async fn analyzed_packages(&self, artifact: &ArtifactRef) -> Result<Vec<ResolvedPackage>>;

    /// Fast lookup of an analyzed package
    ///
    /// # Arguments
    /// * `gav` - Coordinate to look up
    /// * `depth` - Number of dependency levels to inline
    ///
    /// # Errors
    /// `NotFound` when the package was never analyzed
    async fn fetch_package(&self, gav: &Gav, depth: u32) -> Result<Package>;

    /// Requests analysis and blocks until it finishes; may take minutes
    async fn analyze_and_wait(&self, gav: &Gav) -> Result<Package>;

    /// Most recently analyzed packages across the whole backend
    async fn latest_packages(&self) -> Result<Vec<ResolvedPackage>>;

    /// Total number of analyzed packages
    async fn package_count(&self) -> Result<u64>;
}

#[async_trait]
impl<T: PackageRepository + ?Sized> PackageRepository for std::sync::Arc<T> {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        (**self).search(query).await
    }

    async fn versions(&self, artifact: &ArtifactRef) -> Result<Vec<String>> {
        (**self).versions(artifact).await
    }

    async fn analyzed_packages(&self, artifact: &ArtifactRef) -> Result<Vec<ResolvedPackage>> {
        (**self).analyzed_packages(artifact).await
    }

    async fn fetch_package(&self, gav: &Gav, depth: u32) -> Result<Package> {
        (**self).fetch_package(gav, depth).await
    }

    async fn analyze_and_wait(&self, gav: &Gav) -> Result<Package> {
        (**self).analyze_and_wait(gav).await
    }

    async fn latest_packages(&self) -> Result<Vec<ResolvedPackage>> {
        (**self).latest_packages().await
    }

    async fn package_count(&self) -> Result<u64> {
        (**self).package_count().await
    }
}
