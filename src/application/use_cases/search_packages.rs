use crate::inspection::domain::SearchHit;
use crate::ports::outbound::PackageRepository;

/// SearchPackagesUseCase - free-text search over Maven Central
///
/// Search is best effort: a failing request yields no results instead of an
/// error.
pub struct SearchPackagesUseCase<R> {
    repository: R,
}

impl<R: PackageRepository> SearchPackagesUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, query: &str) -> Vec<SearchHit> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        match self.repository.search(query).await {
            Ok(hits) => hits,
            Err(error) => {
                tracing::warn!(query, error = %error, "search failed");
                Vec::new()
            }
        }
    }
}
