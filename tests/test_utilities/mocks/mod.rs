/// Mock implementations for testing
mod in_memory_recently_viewed_store;
mod mock_package_repository;
mod mock_progress_reporter;

pub use in_memory_recently_viewed_store::InMemoryRecentlyViewedStore;
pub use mock_package_repository::MockPackageRepository;
pub use mock_progress_reporter::MockProgressReporter;
