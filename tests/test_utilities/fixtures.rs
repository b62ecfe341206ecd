use jar_hell::inspection::domain::{Dependency, EffectiveValues};
use jar_hell::prelude::*;

/// Analyzed package without loaded dependency data
pub fn analyzed(gav: &str, required: u32) -> ResolvedPackage {
    let gav: Gav = gav.parse().unwrap();
    ResolvedPackage {
        gav,
        package_size: 1_000,
        bytecode_version: Some("52.0".to_string()),
        packaging: Some("jar".to_string()),
        name: None,
        description: None,
        url: None,
        scm_url: None,
        issues_url: None,
        inception_year: None,
        licenses: vec![],
        classifiers: vec![],
        created: None,
        analyzed: None,
        dependencies: None,
        effective_values: EffectiveValues {
            required_dependencies: required,
            size: 1_000,
            ..Default::default()
        },
    }
}

/// Analyzed package whose direct dependencies are inlined, as a depth-1 lookup returns
pub fn with_dependencies(gav: &str, children: Vec<Package>) -> ResolvedPackage {
    let mut package = analyzed(gav, children.len() as u32);
    package.dependencies = Some(
        children
            .into_iter()
            .map(|artifact| Dependency {
                artifact,
                scope: "compile".to_string(),
                optional: false,
            })
            .collect(),
    );
    package
}

pub fn resolved(package: ResolvedPackage) -> Package {
    Package::resolved(package)
}
