use crate::inspection::domain::Package;
use crate::inspection::services::{
    Completion, DependencyTree, FetchRequest, NodeId, NodeStatus, ToggleOutcome,
};
use crate::ports::outbound::{PackageRepository, ProgressReporter};
use crate::shared::error::JarHellError;
use crate::shared::Result;
use futures::stream::{self, StreamExt};

/// Default cap on sibling fetches running at the same time
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

/// Outcome of [`ExploreTreeUseCase::expand_to_depth`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionSummary {
    pub fetched: usize,
    pub failed: usize,
    pub discarded: usize,
}

/// ExploreTreeUseCase - performs the fetches a [`DependencyTree`] asks for
///
/// The tree itself never does I/O. This use case runs its one-level fetches
/// against the repository, racing each one with its cancellation token.
pub struct ExploreTreeUseCase<R, P> {
    repository: R,
    progress_reporter: P,
    max_concurrent: usize,
}

impl<R, P> ExploreTreeUseCase<R, P>
where
    R: PackageRepository,
    P: ProgressReporter,
{
    pub fn new(repository: R, progress_reporter: P) -> Self {
        Self {
            repository,
            progress_reporter,
            max_concurrent: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Runs a single fetch; resolves to `Cancelled` as soon as the request's
    /// token is cancelled
    pub async fn fetch(&self, request: FetchRequest) -> (FetchRequest, Result<Package>) {
        tracing::debug!(gav = %request.gav, node = request.node, "fetching tree node");
        let result = tokio::select! {
            biased;
            _ = request.token.cancelled() => Err(JarHellError::Cancelled.into()),
            result = self.repository.fetch_package(&request.gav, 1) => result,
        };
        (request, result)
    }

    /// Toggles a node and, when that requires a fetch, waits for it
    pub async fn toggle(&self, tree: &mut DependencyTree, id: NodeId) -> Result<ToggleOutcome> {
        let outcome = tree.toggle(id)?;
        if let ToggleOutcome::FetchRequired(request) = &outcome {
            let (request, result) = self.fetch(request.clone()).await;
            tree.complete(&request, result);
        }
        Ok(outcome)
    }

    /// Expands the tree level by level until `depth` levels below the root are
    /// visible. Siblings are fetched concurrently, bounded by the configured cap.
    /// Node failures stay on their nodes and are counted in the summary.
    pub async fn expand_to_depth(
        &self,
        tree: &mut DependencyTree,
        depth: usize,
    ) -> Result<ExpansionSummary> {
        let mut summary = ExpansionSummary::default();
        let mut frontier = vec![DependencyTree::ROOT];

        for level in 0..depth {
            let mut expanded = Vec::new();
            let mut requests = Vec::new();
            for id in frontier {
                match tree.expand(id)? {
                    ToggleOutcome::FetchRequired(request) => requests.push(request),
                    ToggleOutcome::Expanded | ToggleOutcome::Unchanged => expanded.push(id),
                    _ => {}
                }
            }

            if !requests.is_empty() {
                let total = requests.len();
                self.progress_reporter.report(&format!(
                    "🔍 Fetching {} dependencies at level {}...",
                    total,
                    level + 1
                ));

                let mut fetches = stream::iter(requests)
                    .map(|request| self.fetch(request))
                    .buffer_unordered(self.max_concurrent);
                let mut done = 0;
                while let Some((request, result)) = fetches.next().await {
                    done += 1;
                    let gav = request.gav.to_string();
                    self.progress_reporter
                        .report_progress(done, total, Some(&gav));
                    match tree.complete(&request, result) {
                        Completion::Discarded => summary.discarded += 1,
                        Completion::Applied => match tree.node(request.node).map(|n| n.status()) {
                            Some(NodeStatus::Failed(message)) => {
                                summary.failed += 1;
                                self.progress_reporter.report_error(&format!(
                                    "⚠️  Warning: Failed to load dependencies of {}: {}",
                                    gav, message
                                ));
                            }
                            _ => {
                                summary.fetched += 1;
                                expanded.push(request.node);
                            }
                        },
                    }
                }
            }

            frontier = expanded
                .iter()
                .filter_map(|&id| tree.node(id))
                .flat_map(|node| node.children().to_vec())
                .collect();
            if frontier.is_empty() {
                break;
            }
        }

        Ok(summary)
    }
}
