/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (REST backend, state file, console).
pub mod formatter;
pub mod output_presenter;
pub mod package_repository;
pub mod progress_reporter;
pub mod recently_viewed_store;

pub use formatter::ViewFormatter;
pub use output_presenter::OutputPresenter;
pub use package_repository::PackageRepository;
pub use progress_reporter::ProgressReporter;
pub use recently_viewed_store::RecentlyViewedStore;
