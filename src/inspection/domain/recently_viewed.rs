use super::Gav;

/// Maximum number of remembered coordinates
pub const MAX_RECENTLY_VIEWED: usize = 10;

/// Most-recent-first list of viewed packages, one entry per group+artifact
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentlyViewed {
    entries: Vec<Gav>,
}

impl RecentlyViewed {
    /// Builds the log from persisted entries, re-applying the cap and de-duplication
    pub fn from_entries(entries: Vec<Gav>) -> Self {
        let mut log = Self::default();
        for gav in entries.into_iter().rev() {
            log.record(gav);
        }
        log
    }

    /// Puts `gav` first, dropping any older entry of the same artifact and the
    /// oldest entry beyond the cap
    pub fn record(&mut self, gav: Gav) {
        self.entries.retain(|entry| !entry.same_artifact(&gav));
        self.entries.insert(0, gav);
        self.entries.truncate(MAX_RECENTLY_VIEWED);
    }

    pub fn entries(&self) -> &[Gav] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Gav> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
