//! Builder for constructing views from domain objects

use super::formatting::{format_bytecode_version, format_bytes, format_date, format_date_time};
use super::views::{
    CountView, HomeView, LatestView, LicenseCountView, LinkView, MetricView, PackageCardView,
    PackageReport, RecentView, RowState, SearchHitView, SearchView, SeriesView, TreeRowView,
    TreeView, VersionView, VersionsView, ViewModel,
};
use crate::application::dto::PackagePage;
use crate::application::use_cases::{HomeData, Page};
use crate::inspection::domain::{Gav, Package, RecentlyViewed, ResolvedPackage, SearchHit};
use crate::inspection::policies::LicenseRestrictiveness;
use crate::inspection::services::{DependencyTree, RowMarker, VersionGrouper};

pub const UNRESOLVED_ALERT: &str = "This package couldn't be analyzed and is marked as unresolved. \
     This may happen if the package is not available in the Maven Central repository \
     or due to intermittent server/network issues.";

pub const TREE_NOTICE: &str = "Dependency tree might be not completely accurate as it does not take \
     into account excluded packages and version conflicts.";

/// Transforms domain objects into render-ready views
pub struct ReadModelBuilder;

impl ReadModelBuilder {
    pub fn search(query: &str, hits: &[SearchHit]) -> SearchView {
        SearchView {
            query: query.to_string(),
            hits: hits
                .iter()
                .map(|hit| SearchHitView {
                    label: hit.short_label(),
                    coordinate: hit.latest_coordinate(),
                })
                .collect(),
        }
    }

    /// Versions grouped into series, marking the series of `selected`
    pub fn versions(page: &PackagePage, selected: Option<&str>) -> VersionsView {
        let grouped = VersionGrouper::group_with_packages(&page.versions, &page.analyzed);
        let current = selected.map(|version| VersionGrouper::series_of(version, &grouped));

        let series = grouped
            .iter()
            .map(|(label, nodes)| SeriesView {
                label: label.clone(),
                current: current.as_deref() == Some(label.as_str()),
                versions: nodes
                    .iter()
                    .map(|node| VersionView {
                        version: node.version.to_string(),
                        analyzed: node.is_analyzed(),
                        selected: selected == Some(node.version),
                        effective_size: node
                            .package
                            .map(|pkg| format_bytes(pkg.effective_values.size)),
                        effective_license: node.package.map(|pkg| {
                            LicenseRestrictiveness::effective_license(pkg)
                                .license_type
                                .to_string()
                        }),
                    })
                    .collect(),
            })
            .collect();

        VersionsView {
            artifact: page.artifact.to_string(),
            latest: page.latest_version().map(str::to_string),
            selected: selected.map(str::to_string),
            series,
        }
    }

    pub fn package_report(gav: &Gav, package: &Package) -> PackageReport {
        match package {
            Package::Unresolved(_) => PackageReport {
                coordinate: gav.to_string(),
                title: gav.artifact_id.clone(),
                description: None,
                unresolved: true,
                links: vec![],
                metrics: vec![],
                license_histogram: vec![],
                alerts: vec![UNRESOLVED_ALERT.to_string()],
                notices: vec![],
                versions: None,
                tree: None,
            },
            Package::Resolved(resolved) => Self::resolved_report(resolved),
        }
    }

    fn resolved_report(pkg: &ResolvedPackage) -> PackageReport {
        let values = &pkg.effective_values;
        let effective_license = LicenseRestrictiveness::effective_license(pkg);

        let mut alerts = Vec::new();
        if values.unresolved_dependencies > 0 {
            alerts.push(format!(
                "Analysis was not fully completed. A total of {} required dependencies were not resolved. \
                 All effective values should be treated only as rough estimations.",
                values.unresolved_dependencies
            ));
        }

        let license_hint = pkg
            .licenses
            .iter()
            .map(|license| {
                format!(
                    "{} ({})",
                    license.name.as_deref().unwrap_or("unnamed"),
                    license.url.as_deref().unwrap_or("no url")
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        let metrics = vec![
            metric("Publication date", format_date(pkg.created.as_ref()), format_date_time(pkg.created.as_ref())),
            metric("Analysis date", format_date(pkg.analyzed.as_ref()), format_date_time(pkg.analyzed.as_ref())),
            metric("Effective size", format_bytes(values.size), Some(format!("{} bytes", values.size))),
            metric(
                "Effective bytecode version",
                format_bytecode_version(values.bytecode_version.as_deref()),
                values.bytecode_version.clone(),
            ),
            metric("Effective license", effective_license.license_type.to_string(), None),
            metric("Package size", format_bytes(pkg.package_size), Some(format!("{} bytes", pkg.package_size))),
            metric(
                "Bytecode version",
                format_bytecode_version(pkg.bytecode_version.as_deref()),
                pkg.bytecode_version.clone(),
            ),
            metric(
                "License",
                LicenseRestrictiveness::package_license(pkg).to_string(),
                Some(license_hint).filter(|hint| !hint.is_empty()),
            ),
            metric("All required dependencies", values.required_dependencies.to_string(), None),
            metric("All optional dependencies", values.optional_dependencies.to_string(), None),
        ];

        PackageReport {
            coordinate: pkg.gav.to_string(),
            title: pkg.display_name().to_string(),
            description: pkg.description.clone(),
            unresolved: false,
            links: Self::links(pkg),
            metrics,
            license_histogram: effective_license
                .histogram
                .iter()
                .map(|(license, count)| LicenseCountView {
                    license: license.to_string(),
                    count: *count,
                })
                .collect(),
            alerts,
            notices: vec![TREE_NOTICE.to_string()],
            versions: None,
            tree: None,
        }
    }

    /// Homepage, SCM, issue tracker and javadoc links of a package
    pub fn links(pkg: &ResolvedPackage) -> Vec<LinkView> {
        let mut links = Vec::new();
        if let Some(url) = &pkg.url {
            links.push(link("Homepage", url));
        }
        if let Some(url) = &pkg.scm_url {
            links.push(link(scm_label(url), url));
        }
        if let Some(url) = &pkg.issues_url {
            links.push(link("Issues", url));
        }
        if pkg.classifiers.iter().any(|c| c == "javadoc") {
            let gav = &pkg.gav;
            links.push(link(
                "Javadoc",
                &format!(
                    "https://javadoc.io/doc/{}/{}/{}",
                    gav.group_id, gav.artifact_id, gav.version
                ),
            ));
        }
        links
    }

    pub fn tree(tree: &DependencyTree) -> TreeView {
        let rows = tree
            .visible_rows()
            .into_iter()
            .enumerate()
            .map(|(row, tree_row)| TreeRowView {
                row,
                depth: tree_row.depth,
                coordinate: tree_row.key,
                scope: tree_row.scope,
                optional: tree_row.optional,
                unresolved: tree_row.unresolved,
                state: match tree_row.marker {
                    RowMarker::Leaf => RowState::Leaf,
                    RowMarker::Collapsed => RowState::Collapsed,
                    RowMarker::Expanded => RowState::Expanded,
                    RowMarker::Loading => RowState::Loading,
                    RowMarker::Failed => RowState::Failed,
                },
                error: tree_row.error,
            })
            .collect();
        TreeView {
            root: tree.root().key().to_string(),
            rows,
        }
    }

    pub fn card(pkg: &ResolvedPackage) -> PackageCardView {
        let values = &pkg.effective_values;
        PackageCardView {
            coordinate: pkg.gav.to_string(),
            effective_size: format_bytes(values.size),
            dependencies: format!("{} dependencies", values.required_dependencies),
            bytecode_version: format_bytecode_version(values.bytecode_version.as_deref()),
            license: LicenseRestrictiveness::effective_license(pkg)
                .license_type
                .to_string(),
        }
    }

    pub fn latest(packages: &[ResolvedPackage]) -> LatestView {
        LatestView {
            packages: packages.iter().map(Self::card).collect(),
        }
    }

    pub fn recent(log: &RecentlyViewed) -> RecentView {
        RecentView {
            entries: log.entries().iter().map(Gav::to_string).collect(),
        }
    }

    pub fn home(data: &HomeData) -> HomeView {
        HomeView {
            count: data.count,
            latest: data.latest.iter().map(Self::card).collect(),
            recently_viewed: Self::recent(&data.recently_viewed).entries,
        }
    }

    pub fn count(count: u64) -> CountView {
        CountView { count }
    }

    /// Whole page; a package page embeds its version list and, when given,
    /// the dependency tree
    pub fn page(page: &Page, tree: Option<&DependencyTree>) -> ViewModel {
        match page {
            Page::Home(data) => ViewModel::Home(Self::home(data)),
            Page::Versions(page) => ViewModel::Versions(Self::versions(page, None)),
            Page::Package { page, gav, package } => {
                let mut report = Self::package_report(gav, package);
                report.versions = Some(Self::versions(page, Some(&gav.version)));
                report.tree = tree.map(Self::tree);
                ViewModel::Package(report)
            }
        }
    }
}

fn metric(title: &str, value: String, hint: Option<String>) -> MetricView {
    MetricView {
        title: title.to_string(),
        value,
        hint,
    }
}

fn link(label: &str, url: &str) -> LinkView {
    LinkView {
        label: label.to_string(),
        url: url.to_string(),
    }
}

fn scm_label(url: &str) -> &'static str {
    if url.contains("github.com") {
        "GitHub"
    } else if url.contains("gitlab.com") {
        "GitLab"
    } else if url.contains("bitbucket.org") {
        "Bitbucket"
    } else {
        "Source"
    }
}
