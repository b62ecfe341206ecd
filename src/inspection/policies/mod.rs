pub mod license_restrictiveness;
pub mod series_expansion;

pub use license_restrictiveness::LicenseRestrictiveness;
pub use series_expansion::SeriesExpansionPolicy;
