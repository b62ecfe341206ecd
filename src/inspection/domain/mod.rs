pub mod gav;
pub mod license_type;
pub mod package;
pub mod recently_viewed;
pub mod search_hit;

pub use gav::{ArtifactRef, Coordinate, Gav};
pub use license_type::LicenseType;
pub use package::{
    Dependency, EffectiveValues, License, Package, ResolvedPackage, UnresolvedPackage,
};
pub use recently_viewed::{RecentlyViewed, MAX_RECENTLY_VIEWED};
pub use search_hit::SearchHit;
