use super::{Gav, LicenseType};
use chrono::NaiveDateTime;
use indexmap::IndexSet;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// A license as declared in the package descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Dependency edge: the referenced package plus how it is required
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub artifact: Package,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub optional: bool,
}

/// Metrics aggregated over a package and its transitive required dependencies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveValues {
    #[serde(default)]
    pub required_dependencies: u32,
    #[serde(default)]
    pub optional_dependencies: u32,
    #[serde(default)]
    pub unresolved_dependencies: u32,
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytecode_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_type: Option<LicenseType>,
    /// Number of packages per license type across the required closure
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub license_types: BTreeMap<LicenseType, u32>,
}

impl EffectiveValues {
    pub fn total_dependencies(&self) -> u32 {
        self.required_dependencies + self.optional_dependencies
    }
}

/// A dependency the backend could not fetch or analyze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedPackage {
    #[serde(flatten)]
    pub gav: Gav,
}

/// Fully analyzed package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPackage {
    #[serde(flatten)]
    pub gav: Gav,
    #[serde(default)]
    pub package_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytecode_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scm_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inception_year: Option<String>,
    #[serde(default)]
    pub licenses: Vec<License>,
    #[serde(default)]
    pub classifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed: Option<NaiveDateTime>,
    /// `None` when the backend stopped at the requested depth before this package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<Dependency>>,
    #[serde(default)]
    pub effective_values: EffectiveValues,
}

impl ResolvedPackage {
    pub fn has_loaded_dependencies(&self) -> bool {
        self.dependencies.is_some()
    }

    /// Distinct license types of the package itself in declaration order,
    /// `NO_LICENSE` when nothing is declared
    pub fn license_types(&self) -> Vec<LicenseType> {
        if self.licenses.is_empty() {
            return vec![LicenseType::NoLicense];
        }
        self.licenses
            .iter()
            .map(LicenseType::categorize)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.gav.artifact_id)
    }
}

/// Package as returned by the backend, tagged on the wire by `unresolved`
#[derive(Debug, Clone, PartialEq)]
pub enum Package {
    Unresolved(UnresolvedPackage),
    Resolved(Box<ResolvedPackage>),
}

impl Package {
    pub fn unresolved(gav: Gav) -> Self {
        Package::Unresolved(UnresolvedPackage { gav })
    }

    pub fn resolved(package: ResolvedPackage) -> Self {
        Package::Resolved(Box::new(package))
    }

    pub fn gav(&self) -> &Gav {
        match self {
            Package::Unresolved(pkg) => &pkg.gav,
            Package::Resolved(pkg) => &pkg.gav,
        }
    }

    pub fn as_resolved(&self) -> Option<&ResolvedPackage> {
        match self {
            Package::Unresolved(_) => None,
            Package::Resolved(pkg) => Some(pkg),
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Package::Unresolved(_))
    }

    /// Required plus optional dependencies; unresolved packages have none
    pub fn total_dependencies(&self) -> u32 {
        match self {
            Package::Unresolved(_) => 0,
            Package::Resolved(pkg) => pkg.effective_values.total_dependencies(),
        }
    }
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    unresolved: bool,
    #[serde(flatten)]
    inner: &'a T,
}

impl Serialize for Package {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Package::Unresolved(pkg) => Tagged {
                unresolved: true,
                inner: pkg,
            }
            .serialize(serializer),
            Package::Resolved(pkg) => Tagged {
                unresolved: false,
                inner: pkg.as_ref(),
            }
            .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Package {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let unresolved = value
            .get("unresolved")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        if unresolved {
            UnresolvedPackage::deserialize(value)
                .map(Package::Unresolved)
                .map_err(D::Error::custom)
        } else {
            ResolvedPackage::deserialize(value)
                .map(Package::resolved)
                .map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolved_json() -> serde_json::Value {
        json!({
            "groupId": "org.slf4j",
            "artifactId": "slf4j-simple",
            "version": "2.0.9",
            "unresolved": false,
            "packageSize": 15_239,
            "bytecodeVersion": "52.0",
            "packaging": "jar",
            "licenses": [{"name": "MIT License", "url": "https://opensource.org/license/mit"}],
            "classifiers": ["javadoc", "sources"],
            "created": "2023-09-03T10:15:30",
            "analyzed": "2024-02-01T08:00:00.123",
            "dependencies": [
                {
                    "artifact": {"groupId": "org.slf4j", "artifactId": "slf4j-api", "version": "2.0.9",
                                 "packageSize": 64_000, "licenses": [], "classifiers": [],
                                 "effectiveValues": {"requiredDependencies": 0, "optionalDependencies": 0,
                                                     "unresolvedDependencies": 0, "size": 64_000}},
                    "scope": "compile",
                    "optional": false
                },
                {
                    "artifact": {"groupId": "com.example", "artifactId": "private", "version": "1.0", "unresolved": true},
                    "scope": "compile",
                    "optional": true
                }
            ],
            "effectiveValues": {
                "requiredDependencies": 1,
                "optionalDependencies": 1,
                "unresolvedDependencies": 0,
                "size": 79_239,
                "bytecodeVersion": "52.0",
                "licenseType": "MIT",
                "licenseTypes": {"MIT": 2}
            }
        })
    }

    #[test]
    fn test_deserialize_resolved_package() {
        let pkg: Package = serde_json::from_value(resolved_json()).unwrap();
        let resolved = pkg.as_resolved().unwrap();
        assert_eq!(resolved.gav.to_string(), "org.slf4j:slf4j-simple:2.0.9");
        assert_eq!(resolved.package_size, 15_239);
        assert_eq!(resolved.effective_values.license_type, Some(LicenseType::Mit));
        assert_eq!(resolved.effective_values.license_types[&LicenseType::Mit], 2);
        assert!(resolved.created.is_some());
        assert!(resolved.analyzed.is_some());

        let deps = resolved.dependencies.as_ref().unwrap();
        assert_eq!(deps.len(), 2);
        assert!(!deps[0].artifact.is_unresolved());
        assert!(deps[0]
            .artifact
            .as_resolved()
            .unwrap()
            .dependencies
            .is_none());
        assert!(deps[1].artifact.is_unresolved());
        assert!(deps[1].optional);
    }

    #[test]
    fn test_missing_discriminant_means_resolved() {
        let pkg: Package = serde_json::from_value(json!({
            "groupId": "g", "artifactId": "a", "version": "1"
        }))
        .unwrap();
        assert!(!pkg.is_unresolved());
        assert_eq!(pkg.total_dependencies(), 0);
    }

    #[test]
    fn test_serialize_keeps_discriminant() {
        let pkg = Package::unresolved(Gav::new("g", "a", "1"));
        let value = serde_json::to_value(&pkg).unwrap();
        assert_eq!(value["unresolved"], json!(true));
        assert_eq!(value["groupId"], json!("g"));

        let back: Package = serde_json::from_value(value).unwrap();
        assert_eq!(back, pkg);
    }

    #[test]
    fn test_resolved_serialization_round_trip() {
        let pkg: Package = serde_json::from_value(resolved_json()).unwrap();
        let value = serde_json::to_value(&pkg).unwrap();
        assert_eq!(value["unresolved"], json!(false));
        let back: Package = serde_json::from_value(value).unwrap();
        assert_eq!(back, pkg);
    }

    #[test]
    fn test_license_types_of_package() {
        let pkg: Package = serde_json::from_value(resolved_json()).unwrap();
        assert_eq!(pkg.as_resolved().unwrap().license_types(), vec![LicenseType::Mit]);

        let bare: Package = serde_json::from_value(json!({
            "groupId": "g", "artifactId": "a", "version": "1", "licenses": []
        }))
        .unwrap();
        assert_eq!(
            bare.as_resolved().unwrap().license_types(),
            vec![LicenseType::NoLicense]
        );
    }

    #[test]
    fn test_license_types_are_distinct_across_declarations() {
        let pkg: Package = serde_json::from_value(json!({
            "groupId": "g", "artifactId": "a", "version": "1",
            "licenses": [{"name": "MIT"}, {"name": "Apache 2.0"}, {"name": "MIT License"}]
        }))
        .unwrap();
        assert_eq!(
            pkg.as_resolved().unwrap().license_types(),
            vec![LicenseType::Mit, LicenseType::Apache2]
        );
    }

    #[test]
    fn test_total_dependencies() {
        let pkg: Package = serde_json::from_value(resolved_json()).unwrap();
        assert_eq!(pkg.total_dependencies(), 2);
        assert_eq!(Package::unresolved(Gav::new("g", "a", "1")).total_dependencies(), 0);
    }
}
