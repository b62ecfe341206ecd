use crate::inspection::domain::RecentlyViewed;
use crate::shared::Result;

/// RecentlyViewedStore port for persisting the recently viewed log
///
/// A store that has never been written loads as an empty log.
pub trait RecentlyViewedStore {
    fn load(&self) -> Result<RecentlyViewed>;

    fn save(&self, log: &RecentlyViewed) -> Result<()>;
}

impl<T: RecentlyViewedStore + ?Sized> RecentlyViewedStore for std::sync::Arc<T> {
    fn load(&self) -> Result<RecentlyViewed> {
        (**self).load()
    }

    fn save(&self, log: &RecentlyViewed) -> Result<()> {
        (**self).save(log)
    }
}
