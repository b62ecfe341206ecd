use crate::inspection::domain::{ArtifactRef, Gav, Package, ResolvedPackage, SearchHit};
use crate::ports::outbound::PackageRepository;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Cache key for package lookups
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    coordinate: String,
    depth: u32,
}

impl CacheKey {
    fn new(gav: &Gav, depth: u32) -> Self {
        Self {
            coordinate: gav.to_string(),
            depth,
        }
    }
}

/// CachingPackageRepository wraps a PackageRepository and memoizes package lookups.
///
/// Only successful `fetch_package` answers are cached, so a failed node fetch
/// is retried against the backend. A finished analysis also fills the
/// depth-1 entry of its coordinate. Everything else passes through.
pub struct CachingPackageRepository<R: PackageRepository> {
    inner: R,
    cache: Arc<DashMap<CacheKey, Package>>,
}

impl<R: PackageRepository> CachingPackageRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<R: PackageRepository> PackageRepository for CachingPackageRepository<R> {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.inner.search(query).await
    }

    async fn versions(&self, artifact: &ArtifactRef) -> Result<Vec<String>> {
        self.inner.versions(artifact).await
    }

    async fn analyzed_packages(&self, artifact: &ArtifactRef) -> Result<Vec<ResolvedPackage>> {
        self.inner.analyzed_packages(artifact).await
    }

    async fn fetch_package(&self, gav: &Gav, depth: u32) -> Result<Package> {
        let key = CacheKey::new(gav, depth);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(%gav, depth, "package cache hit");
            return Ok(cached.clone());
        }

        let package = self.inner.fetch_package(gav, depth).await?;
        self.cache.insert(key, package.clone());
        Ok(package)
    }

    async fn analyze_and_wait(&self, gav: &Gav) -> Result<Package> {
        let package = self.inner.analyze_and_wait(gav).await?;
        self.cache.insert(CacheKey::new(gav, 1), package.clone());
        Ok(package)
    }

    async fn latest_packages(&self) -> Result<Vec<ResolvedPackage>> {
        self.inner.latest_packages().await
    }

    async fn package_count(&self) -> Result<u64> {
        self.inner.package_count().await
    }
}
