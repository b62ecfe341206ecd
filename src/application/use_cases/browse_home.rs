use crate::inspection::domain::{RecentlyViewed, ResolvedPackage};
use crate::ports::outbound::{PackageRepository, RecentlyViewedStore};
use crate::shared::Result;
use anyhow::Context;

/// Everything shown on the home page
#[derive(Debug, Clone, PartialEq)]
pub struct HomeData {
    pub count: u64,
    pub latest: Vec<ResolvedPackage>,
    pub recently_viewed: RecentlyViewed,
}

/// BrowseHomeUseCase - analyzed package count, latest analyses and the local
/// recently viewed log
pub struct BrowseHomeUseCase<R, S> {
    repository: R,
    store: S,
}

impl<R, S> BrowseHomeUseCase<R, S>
where
    R: PackageRepository,
    S: RecentlyViewedStore,
{
    pub fn new(repository: R, store: S) -> Self {
        Self { repository, store }
    }

    pub async fn execute(&self) -> Result<HomeData> {
        let (count, latest) = tokio::try_join!(self.count(), self.latest())?;
        let recently_viewed = self.store.load()?;
        Ok(HomeData {
            count,
            latest,
            recently_viewed,
        })
    }

    pub async fn count(&self) -> Result<u64> {
        self.repository
            .package_count()
            .await
            .context("Failed to fetch the number of analyzed packages")
    }

    pub async fn latest(&self) -> Result<Vec<ResolvedPackage>> {
        self.repository
            .latest_packages()
            .await
            .context("Failed to fetch recently analyzed packages")
    }
}
