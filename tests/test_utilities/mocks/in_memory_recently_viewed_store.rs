use jar_hell::prelude::*;
use std::sync::{Arc, Mutex};

/// RecentlyViewedStore kept in memory, shareable between clones
#[derive(Default, Clone)]
pub struct InMemoryRecentlyViewedStore {
    log: Arc<Mutex<RecentlyViewed>>,
    fail_saves: bool,
}

impl InMemoryRecentlyViewedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `save` always fails
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> Vec<Gav> {
        self.log.lock().unwrap().entries().to_vec()
    }
}

impl RecentlyViewedStore for InMemoryRecentlyViewedStore {
    fn load(&self) -> Result<RecentlyViewed> {
        Ok(self.log.lock().unwrap().clone())
    }

    fn save(&self, log: &RecentlyViewed) -> Result<()> {
        if self.fail_saves {
            anyhow::bail!("Mock store failure");
        }
        *self.log.lock().unwrap() = log.clone();
        Ok(())
    }
}
