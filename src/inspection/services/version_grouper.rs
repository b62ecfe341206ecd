use crate::inspection::domain::ResolvedPackage;
use crate::inspection::policies::SeriesExpansionPolicy;
use indexmap::IndexMap;

/// A version paired with its already-analyzed package, if there is one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VersionNode<'a> {
    pub version: &'a str,
    pub package: Option<&'a ResolvedPackage>,
}

impl VersionNode<'_> {
    pub fn is_analyzed(&self) -> bool {
        self.package.is_some()
    }
}

/// Ordered mapping of series label (`"1"` or `"1.7"`) to its members
pub type VersionSeries<T> = IndexMap<String, Vec<T>>;

/// VersionGrouper buckets a flat version list into display series.
///
/// Input order is kept everywhere: majors and minors appear in the order they
/// are first seen, versions inside a bucket in input order.
pub struct VersionGrouper;

impl VersionGrouper {
    /// Groups plain version strings
    pub fn group<S: AsRef<str>>(versions: &[S]) -> VersionSeries<&str> {
        let by_major = Self::partition(versions);
        let distinct_majors = by_major.len();

        let mut series: VersionSeries<&str> = IndexMap::new();
        for (major, by_minor) in by_major {
            let expand = SeriesExpansionPolicy::expand_minors(
                distinct_majors,
                by_minor.values().map(Vec::len),
            );
            if expand {
                for (minor, members) in by_minor {
                    series.insert(format!("{}.{}", major, minor), members);
                }
            } else {
                series.insert(major.to_string(), by_minor.into_values().flatten().collect());
            }
        }
        series
    }

    /// Groups versions and pairs each one with a matching analyzed package
    pub fn group_with_packages<'a, S: AsRef<str>>(
        versions: &'a [S],
        analyzed_packages: &'a [ResolvedPackage],
    ) -> VersionSeries<VersionNode<'a>> {
        Self::group(versions)
            .into_iter()
            .map(|(key, members)| {
                let nodes = members
                    .into_iter()
                    .map(|version| VersionNode {
                        version,
                        package: analyzed_packages
                            .iter()
                            .find(|pkg| pkg.gav.version == version),
                    })
                    .collect();
                (key, nodes)
            })
            .collect()
    }

    /// Series that holds `version`: the major key when the major is folded,
    /// the `major.minor` key otherwise
    pub fn series_of<T>(version: &str, series: &VersionSeries<T>) -> String {
        let (major, minor) = split_version(version);
        if series.contains_key(major) {
            major.to_string()
        } else {
            format!("{}.{}", major, minor)
        }
    }

    fn partition<S: AsRef<str>>(versions: &[S]) -> IndexMap<&str, IndexMap<&str, Vec<&str>>> {
        let mut by_major: IndexMap<&str, IndexMap<&str, Vec<&str>>> = IndexMap::new();
        for version in versions {
            let version = version.as_ref();
            let (major, minor) = split_version(version);
            by_major
                .entry(major)
                .or_default()
                .entry(minor)
                .or_default()
                .push(version);
        }
        by_major
    }
}

/// Major and minor segments; missing segments are empty.
/// Everything after the second dot stays with the minor's remainder.
fn split_version(version: &str) -> (&str, &str) {
    let mut parts = version.splitn(3, '.');
    let major = parts.next().unwrap_or_default();
    let minor = parts.next().unwrap_or_default();
    (major, minor)
}
