/// SeriesExpansionPolicy decides whether the versions of one major release
/// are shown as per-minor series or folded into a single major series.
///
/// Rules:
/// 1. With a single distinct major, minors are always expanded
/// 2. Otherwise a major is expanded when one of its minors has at least
///    [`SeriesExpansionPolicy::MIN_VERSIONS_PER_MINOR`] versions
pub struct SeriesExpansionPolicy;

impl SeriesExpansionPolicy {
    pub const MIN_VERSIONS_PER_MINOR: usize = 10;

    /// # Arguments
    /// * `distinct_majors` - Number of distinct majors across the whole input
    /// * `minor_bucket_sizes` - Number of versions in each minor bucket of the major
    pub fn expand_minors<I>(distinct_majors: usize, minor_bucket_sizes: I) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        distinct_majors == 1
            || minor_bucket_sizes
                .into_iter()
                .any(|size| size >= Self::MIN_VERSIONS_PER_MINOR)
    }
}
