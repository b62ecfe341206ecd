use crate::inspection::domain::{LicenseType, ResolvedPackage};
use std::collections::BTreeMap;

/// Effective license of a package: the most restrictive type found in the
/// package or its required dependencies, with the supporting histogram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveLicense {
    pub license_type: LicenseType,
    pub histogram: BTreeMap<LicenseType, u32>,
}

/// LicenseRestrictiveness policy for aggregating license types
///
/// The most restrictive license wins. Values reported by the backend take
/// precedence; when the backend leaves them out they are derived from what
/// the package itself declares.
pub struct LicenseRestrictiveness;

impl LicenseRestrictiveness {
    /// Counts occurrences of each license type
    pub fn histogram<I>(types: I) -> BTreeMap<LicenseType, u32>
    where
        I: IntoIterator<Item = LicenseType>,
    {
        let mut histogram = BTreeMap::new();
        for license_type in types {
            *histogram.entry(license_type).or_insert(0) += 1;
        }
        histogram
    }

    /// Most restrictive license declared by the package itself
    pub fn package_license(package: &ResolvedPackage) -> LicenseType {
        LicenseType::most_restrictive(package.license_types()).unwrap_or(LicenseType::NoLicense)
    }

    pub fn effective_license(package: &ResolvedPackage) -> EffectiveLicense {
        let values = &package.effective_values;
        let histogram = if values.license_types.is_empty() {
            Self::histogram(package.license_types())
        } else {
            values.license_types.clone()
        };
        let license_type = values
            .license_type
            .or_else(|| LicenseType::most_restrictive(histogram.keys().copied()))
            .unwrap_or(LicenseType::NoLicense);
        EffectiveLicense {
            license_type,
            histogram,
        }
    }
}
