//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of domain data for queries.

pub mod formatting;
pub mod read_model_builder;
pub mod views;

pub use read_model_builder::ReadModelBuilder;
pub use views::{
    CountView, HomeView, LatestView, LicenseCountView, LinkView, MessageView, MetricView,
    PackageCardView, PackageReport, RecentView, RowState, SearchHitView, SearchView, SeriesView,
    TreeRowView, TreeView, VersionView, VersionsView, ViewModel,
};
