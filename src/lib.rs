//! jar-hell - terminal client for the jar hell package analysis service
//!
//! This library inspects Maven packages analyzed by a jar hell server: size,
//! bytecode and license metrics aggregated over the transitive dependencies,
//! version series and a lazily loaded dependency tree. It follows hexagonal
//! architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`inspection`): Coordinates, packages, version grouping
//!   and the dependency tree state machine
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): REST client, state file, console and formatters
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use jar_hell::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<()> {
//! let repository = Arc::new(JarHellClient::new("http://localhost:8060", Duration::from_secs(30))?);
//! let reporter = Arc::new(StderrProgressReporter::new());
//!
//! let gav: Gav = "org.slf4j:slf4j-simple:2.0.9".parse()?;
//! let package = repository.fetch_package(&gav, 1).await?;
//!
//! let mut tree = DependencyTree::new(package);
//! ExploreTreeUseCase::new(repository, reporter)
//!     .expand_to_depth(&mut tree, 2)
//!     .await?;
//!
//! let view = ViewModel::Tree(ReadModelBuilder::tree(&tree));
//! println!("{}", TextFormatter::new(false).format(&view)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod inspection;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::inbound::ExploreSession;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, JsonFileRecentlyViewedStore, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::network::{CachingPackageRepository, JarHellClient};
    pub use crate::application::dto::{OutputFormat, PackagePage, Route};
    pub use crate::application::read_models::{ReadModelBuilder, ViewModel};
    pub use crate::application::use_cases::{
        BrowseHomeUseCase, ExploreTreeUseCase, LoadPackagePageUseCase, OpenPageUseCase, Page,
        ResolvePackageUseCase, SearchPackagesUseCase, TrackRecentlyViewedUseCase,
    };
    pub use crate::inspection::domain::{
        ArtifactRef, Coordinate, Gav, LicenseType, Package, RecentlyViewed, ResolvedPackage,
        SearchHit,
    };
    pub use crate::inspection::policies::{LicenseRestrictiveness, SeriesExpansionPolicy};
    pub use crate::inspection::services::{DependencyTree, VersionGrouper};
    pub use crate::ports::outbound::{
        OutputPresenter, PackageRepository, ProgressReporter, RecentlyViewedStore, ViewFormatter,
    };
    pub use crate::shared::Result;
}
