use super::{
    BrowseHomeUseCase, HomeData, LoadPackagePageUseCase, ResolvePackageUseCase,
    TrackRecentlyViewedUseCase,
};
use crate::application::dto::{PackagePage, Route};
use crate::inspection::domain::{Coordinate, Gav, Package};
use crate::ports::outbound::{PackageRepository, ProgressReporter, RecentlyViewedStore};
use crate::shared::error::JarHellError;
use crate::shared::Result;

/// A fully loaded page
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Home(HomeData),
    /// Artifact page without a selected version
    Versions(PackagePage),
    Package {
        page: PackagePage,
        gav: Gav,
        package: Package,
    },
}

/// OpenPageUseCase - navigation entry point
///
/// Loads whatever a [`Route`] points at. Opening a fully-qualified package
/// appends it to the recently viewed log once the version is known to exist.
pub struct OpenPageUseCase<R, P, S> {
    load_page: LoadPackagePageUseCase<R>,
    resolve_package: ResolvePackageUseCase<R, P>,
    recently_viewed: TrackRecentlyViewedUseCase<S>,
    home: BrowseHomeUseCase<R, S>,
}

impl<R, P, S> OpenPageUseCase<R, P, S>
where
    R: PackageRepository + Clone,
    P: ProgressReporter,
    S: RecentlyViewedStore + Clone,
{
    pub fn new(repository: R, progress_reporter: P, store: S) -> Self {
        Self {
            load_page: LoadPackagePageUseCase::new(repository.clone()),
            resolve_package: ResolvePackageUseCase::new(repository.clone(), progress_reporter),
            recently_viewed: TrackRecentlyViewedUseCase::new(store.clone()),
            home: BrowseHomeUseCase::new(repository, store),
        }
    }

    pub async fn execute(&self, route: &Route) -> Result<Page> {
        match route {
            Route::Home => Ok(Page::Home(self.home.execute().await?)),
            Route::NotFound(path) => {
                Err(JarHellError::not_found(format!("Page {} does not exist", path)).into())
            }
            Route::Package(coordinate) => self.open_coordinate(coordinate).await,
        }
    }

    pub async fn open_coordinate(&self, coordinate: &Coordinate) -> Result<Page> {
        let mut page = self.load_page.execute(coordinate).await?;
        let Some(gav) = coordinate.gav() else {
            return Ok(Page::Versions(page));
        };

        if let Err(error) = self.recently_viewed.record(gav) {
            tracing::warn!(%gav, error = %error, "failed to update recently viewed packages");
        }
        let package = self.resolve_package.execute(&mut page, gav).await?;
        Ok(Page::Package {
            page,
            gav: gav.clone(),
            package,
        })
    }
}
