/// Use cases module containing application business logic orchestration
mod browse_home;
mod explore_tree;
mod load_package_page;
mod open_page;
mod resolve_package;
mod search_packages;
mod track_recently_viewed;

pub use browse_home::{BrowseHomeUseCase, HomeData};
pub use explore_tree::{ExpansionSummary, ExploreTreeUseCase, DEFAULT_MAX_CONCURRENT_FETCHES};
pub use load_package_page::LoadPackagePageUseCase;
pub use open_page::{OpenPageUseCase, Page};
pub use resolve_package::{ResolvePackageUseCase, PENDING_NOTICES};
pub use search_packages::SearchPackagesUseCase;
pub use track_recently_viewed::TrackRecentlyViewedUseCase;
