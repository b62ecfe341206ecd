//! View structs for the read model
//!
//! Flattened, render-ready data. Every view serializes as-is for JSON output.

use serde::Serialize;

/// Anything a command can print
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewModel {
    Home(HomeView),
    Search(SearchView),
    Versions(VersionsView),
    Package(PackageReport),
    Tree(TreeView),
    Recent(RecentView),
    Latest(LatestView),
    Count(CountView),
    Message(MessageView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    pub query: String,
    pub hits: Vec<SearchHitView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHitView {
    pub label: String,
    pub coordinate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionsView {
    pub artifact: String,
    pub latest: Option<String>,
    pub selected: Option<String>,
    pub series: Vec<SeriesView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesView {
    pub label: String,
    /// Holds the selected version
    pub current: bool,
    pub versions: Vec<VersionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionView {
    pub version: String,
    pub analyzed: bool,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_license: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricView {
    pub title: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkView {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenseCountView {
    pub license: String,
    pub count: u32,
}

/// Page of a single package
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageReport {
    pub coordinate: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub unresolved: bool,
    pub links: Vec<LinkView>,
    pub metrics: Vec<MetricView>,
    pub license_histogram: Vec<LicenseCountView>,
    /// Alerts worth a warning color: unresolved package, partial resolution
    pub alerts: Vec<String>,
    pub notices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<VersionsView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<TreeView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeView {
    pub root: String,
    pub rows: Vec<TreeRowView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowState {
    Leaf,
    Collapsed,
    Expanded,
    Loading,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeRowView {
    /// Position among the visible rows, used to address the row interactively
    pub row: usize,
    pub depth: usize,
    pub coordinate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub optional: bool,
    pub unresolved: bool,
    pub state: RowState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Compact summary of an analyzed package
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageCardView {
    pub coordinate: String,
    pub effective_size: String,
    pub dependencies: String,
    pub bytecode_version: String,
    pub license: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub count: u64,
    pub latest: Vec<PackageCardView>,
    pub recently_viewed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentView {
    pub entries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestView {
    pub packages: Vec<PackageCardView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountView {
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageView {
    pub message: String,
}
