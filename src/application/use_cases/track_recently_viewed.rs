use crate::inspection::domain::{Gav, RecentlyViewed};
use crate::ports::outbound::RecentlyViewedStore;
use crate::shared::Result;

/// TrackRecentlyViewedUseCase - reads and appends to the recently viewed log
pub struct TrackRecentlyViewedUseCase<S> {
    store: S,
}

impl<S: RecentlyViewedStore> TrackRecentlyViewedUseCase<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<RecentlyViewed> {
        self.store.load()
    }

    /// Records a visit and persists the updated log
    pub fn record(&self, gav: &Gav) -> Result<RecentlyViewed> {
        let mut log = self.store.load()?;
        log.record(gav.clone());
        self.store.save(&log)?;
        Ok(log)
    }
}
