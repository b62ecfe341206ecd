use async_trait::async_trait;
use jar_hell::prelude::*;
use jar_hell::shared::error::JarHellError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct State {
    versions: HashMap<String, Vec<String>>,
    analyzed: HashMap<String, Vec<ResolvedPackage>>,
    packages: HashMap<String, Package>,
    analysis_results: HashMap<String, Package>,
    /// Remaining forced failures per coordinate
    fetch_failures: HashMap<String, usize>,
    fetch_calls: HashMap<String, usize>,
    search_hits: Vec<SearchHit>,
    latest: Vec<ResolvedPackage>,
}

/// Mock PackageRepository for testing
///
/// Clones share state and counters, so a test can keep a handle while the
/// use cases own their copies.
#[derive(Default, Clone)]
pub struct MockPackageRepository {
    state: Arc<Mutex<State>>,
    fetch_delay: Option<Duration>,
    analysis_delay: Option<Duration>,
    search_fails: bool,
    count: u64,
    analyze_calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockPackageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(self, group_id: &str, artifact_id: &str, versions: &[&str]) -> Self {
        self.state.lock().unwrap().versions.insert(
            format!("{}:{}", group_id, artifact_id),
            versions.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// Registers an analyzed package, answering both the analyzed list and lookups
    pub fn with_analyzed(self, package: ResolvedPackage) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state
                .analyzed
                .entry(package.gav.artifact_ref().to_string())
                .or_default()
                .push(package.clone());
            state
                .packages
                .insert(package.gav.to_string(), Package::resolved(package));
        }
        self
    }

    /// Registers a lookup answer without listing it as analyzed
    pub fn with_package(self, package: Package) -> Self {
        self.state
            .lock()
            .unwrap()
            .packages
            .insert(package.gav().to_string(), package);
        self
    }

    pub fn with_analysis_result(self, package: Package) -> Self {
        self.state
            .lock()
            .unwrap()
            .analysis_results
            .insert(package.gav().to_string(), package);
        self
    }

    /// The next `times` lookups of `gav` fail with a server error
    pub fn with_fetch_failures(self, gav: &str, times: usize) -> Self {
        self.state
            .lock()
            .unwrap()
            .fetch_failures
            .insert(gav.to_string(), times);
        self
    }

    pub fn with_search_hits(self, hits: Vec<SearchHit>) -> Self {
        self.state.lock().unwrap().search_hits = hits;
        self
    }

    pub fn with_latest(self, latest: Vec<ResolvedPackage>) -> Self {
        self.state.lock().unwrap().latest = latest;
        self
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    pub fn with_search_failure(mut self) -> Self {
        self.search_fails = true;
        self
    }

    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub fn with_analysis_delay(mut self, delay: Duration) -> Self {
        self.analysis_delay = Some(delay);
        self
    }

    pub fn fetch_count(&self, gav: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .fetch_calls
            .get(gav)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_fetch_count(&self) -> usize {
        self.state.lock().unwrap().fetch_calls.values().sum()
    }

    pub fn analyze_count(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }

    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PackageRepository for MockPackageRepository {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
        if self.search_fails {
            anyhow::bail!("Mock search failure");
        }
        Ok(self.state.lock().unwrap().search_hits.clone())
    }

    async fn versions(&self, artifact: &ArtifactRef) -> Result<Vec<String>> {
        self.state
            .lock()
            .unwrap()
            .versions
            .get(&artifact.to_string())
            .cloned()
            .ok_or_else(|| JarHellError::not_found(format!("Artifact {} not found", artifact)).into())
    }

    async fn analyzed_packages(&self, artifact: &ArtifactRef) -> Result<Vec<ResolvedPackage>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .analyzed
            .get(&artifact.to_string())
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_package(&self, gav: &Gav, _depth: u32) -> Result<Package> {
        let key = gav.to_string();
        *self
            .state
            .lock()
            .unwrap()
            .fetch_calls
            .entry(key.clone())
            .or_default() += 1;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let mut state = self.state.lock().unwrap();
        if let Some(remaining) = state.fetch_failures.get_mut(&key) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(JarHellError::Server {
                    status: Some(500),
                    message: "Mock server failure".to_string(),
                }
                .into());
            }
        }
        state
            .packages
            .get(&key)
            .cloned()
            .ok_or_else(|| JarHellError::not_found(format!("Package {} not found", key)).into())
    }

    async fn analyze_and_wait(&self, gav: &Gav) -> Result<Package> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.analysis_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self
            .state
            .lock()
            .unwrap()
            .analysis_results
            .get(&gav.to_string())
            .cloned()
            .unwrap_or_else(|| Package::unresolved(gav.clone())))
    }

    async fn latest_packages(&self) -> Result<Vec<ResolvedPackage>> {
        Ok(self.state.lock().unwrap().latest.clone())
    }

    async fn package_count(&self) -> Result<u64> {
        Ok(self.count)
    }
}
