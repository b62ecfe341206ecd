use crate::application::dto::PackagePage;
use crate::inspection::domain::{Gav, Package};
use crate::ports::outbound::{PackageRepository, ProgressReporter};
use crate::shared::error::JarHellError;
use crate::shared::Result;
use std::time::Duration;
use tokio::time::Instant;

/// Notices shown while an analysis is running, keyed by elapsed time
pub const PENDING_NOTICES: [(Duration, &str); 3] = [
    (Duration::ZERO, "⏳ Analysis is in progress..."),
    (
        Duration::from_secs(5),
        "   Depending on a package it can take up to several minutes.",
    ),
    (
        Duration::from_secs(60),
        "   If you believe that analysis is stuck, please file an issue: https://github.com/harrel56/jar-hell/issues",
    ),
];

/// ResolvePackageUseCase - obtains the root package of a package page
///
/// Already analyzed versions are looked up directly. Anything else goes
/// through analyze-and-wait, which has no client-side timeout and reports
/// [`PENDING_NOTICES`] while it runs.
pub struct ResolvePackageUseCase<R, P> {
    repository: R,
    progress_reporter: P,
}

impl<R, P> ResolvePackageUseCase<R, P>
where
    R: PackageRepository,
    P: ProgressReporter,
{
    pub fn new(repository: R, progress_reporter: P) -> Self {
        Self {
            repository,
            progress_reporter,
        }
    }

    /// Resolves `gav` with one level of dependencies and records a freshly
    /// analyzed package on the page
    pub async fn execute(&self, page: &mut PackagePage, gav: &Gav) -> Result<Package> {
        let package = if page.is_analyzed(&gav.version) {
            match self.repository.fetch_package(gav, 1).await {
                Err(error) if is_not_found(&error) => {
                    tracing::debug!(%gav, "analyzed package missing upstream, analyzing again");
                    self.analyze_with_notices(gav).await?
                }
                other => other?,
            }
        } else {
            self.analyze_with_notices(gav).await?
        };

        if let Package::Resolved(resolved) = &package {
            page.mark_as_analyzed(resolved.as_ref().clone());
        }
        Ok(package)
    }

    async fn analyze_with_notices(&self, gav: &Gav) -> Result<Package> {
        let started = Instant::now();
        let analysis = self.repository.analyze_and_wait(gav);
        tokio::pin!(analysis);

        for (delay, notice) in PENDING_NOTICES {
            tokio::select! {
                biased;
                result = &mut analysis => return self.finish(gav, result),
                _ = tokio::time::sleep_until(started + delay) => self.progress_reporter.report(notice),
            }
        }
        let result = analysis.await;
        self.finish(gav, result)
    }

    fn finish(&self, gav: &Gav, result: Result<Package>) -> Result<Package> {
        match &result {
            Ok(_) => self
                .progress_reporter
                .report_completion(&format!("✅ Analysis of {} finished", gav)),
            Err(error) => self
                .progress_reporter
                .report_error(&format!("❌ Analysis of {} failed: {}", gav, error)),
        }
        result
    }
}

fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<JarHellError>()
        .is_some_and(JarHellError::is_not_found)
}
