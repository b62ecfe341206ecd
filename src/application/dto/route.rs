use crate::inspection::domain::Coordinate;
use crate::shared::error::JarHellError;
use std::fmt;
use std::str::FromStr;

const PACKAGES_PREFIX: &str = "/packages/";

/// Navigable location, mirroring the paths of the jar hell web front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/packages/:gav` with a 2, 3 or 4 segment coordinate
    Package(Coordinate),
    /// Any other path
    NotFound(String),
}

impl Route {
    /// Parses a route or a bare coordinate.
    ///
    /// # Errors
    /// `InvalidRoute` when a package route carries a malformed coordinate,
    /// including a wrong segment count. Paths outside `/packages/` are not
    /// errors; they map to [`Route::NotFound`].
    pub fn parse(input: &str) -> Result<Self, JarHellError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == "/" {
            return Ok(Route::Home);
        }
        let coordinate = match trimmed.strip_prefix(PACKAGES_PREFIX) {
            Some(rest) => rest.trim_end_matches('/'),
            None if trimmed.starts_with('/') => return Ok(Route::NotFound(trimmed.to_string())),
            None => trimmed,
        };
        coordinate
            .parse::<Coordinate>()
            .map(Route::Package)
            .map_err(|error| JarHellError::InvalidRoute {
                route: trimmed.to_string(),
                reason: match error {
                    JarHellError::InvalidCoordinate { reason, .. } => reason,
                    other => other.to_string(),
                },
            })
    }
}

impl FromStr for Route {
    type Err = JarHellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Package(coordinate) => write!(f, "{}{}", PACKAGES_PREFIX, coordinate),
            Route::NotFound(path) => write!(f, "{}", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspection::domain::{ArtifactRef, Gav};

    #[test]
    fn test_home_route() {
        assert_eq!(Route::parse("/").unwrap(), Route::Home);
        assert_eq!(Route::parse("").unwrap(), Route::Home);
    }

    #[test]
    fn test_artifact_route() {
        assert_eq!(
            Route::parse("/packages/org.slf4j:slf4j-api").unwrap(),
            Route::Package(Coordinate::Artifact(ArtifactRef::new("org.slf4j", "slf4j-api")))
        );
    }

    #[test]
    fn test_package_routes() {
        assert_eq!(
            Route::parse("/packages/org.slf4j:slf4j-api:2.0.9").unwrap(),
            Route::Package(Coordinate::Package(Gav::new("org.slf4j", "slf4j-api", "2.0.9")))
        );
        assert_eq!(
            Route::parse("/packages/g:a:1.0:sources/").unwrap(),
            Route::Package(Coordinate::Package(
                Gav::new("g", "a", "1.0").with_classifier("sources")
            ))
        );
    }

    #[test]
    fn test_bare_coordinate_is_a_package_route() {
        assert!(matches!(Route::parse("g:a:1").unwrap(), Route::Package(_)));
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        assert!(matches!(Route::parse("/about").unwrap(), Route::NotFound(_)));
        assert!(matches!(Route::parse("/packages").unwrap(), Route::NotFound(_)));
    }

    #[test]
    fn test_wrong_segment_count_is_client_error() {
        for input in ["/packages/justone", "/packages/a:b:c:d:e", "justone"] {
            let error = Route::parse(input).unwrap_err();
            assert!(
                matches!(error, JarHellError::InvalidRoute { .. }),
                "{} gave {:?}",
                input,
                error
            );
        }
        let error = Route::parse("/packages/a:b:c:d:e").unwrap_err();
        assert!(error.to_string().contains("expected 3 or 4 segments, found 5"));
    }

    #[test]
    fn test_malformed_segment_is_client_error() {
        let error = Route::parse("/packages/g::1").unwrap_err();
        assert!(matches!(error, JarHellError::InvalidRoute { .. }));
    }

    #[test]
    fn test_display() {
        let route = Route::parse("g:a:1").unwrap();
        assert_eq!(route.to_string(), "/packages/g:a:1");
        assert_eq!(Route::Home.to_string(), "/");
    }
}
