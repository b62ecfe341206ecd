//! Integration tests for JarHellClient using wiremock

use jar_hell::prelude::*;
use jar_hell::shared::error::{ExitCode, JarHellError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(mock_server: &MockServer) -> JarHellClient {
    JarHellClient::new(&mock_server.uri(), Duration::from_secs(2)).unwrap()
}

fn package_json(version: &str) -> serde_json::Value {
    json!({
        "groupId": "org.slf4j",
        "artifactId": "slf4j-api",
        "version": version,
        "packageSize": 64000,
        "licenses": [{"name": "MIT License"}],
        "classifiers": ["javadoc"],
        "dependencies": [],
        "effectiveValues": {"requiredDependencies": 0, "optionalDependencies": 0,
                            "unresolvedDependencies": 0, "size": 64000}
    })
}

#[tokio::test]
async fn test_search_sends_encoded_query() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/maven/search"))
        .and(query_param("query", "slf4j api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"g": "org.slf4j", "a": "slf4j-api", "latestVersion": "2.0.9"},
            {"g": "org.slf4j", "a": "slf4j-nop"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let hits = create_client(&mock_server).search("slf4j api").await.unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].latest_version.as_deref(), Some("2.0.9"));
    assert!(hits[1].latest_version.is_none());
}

#[tokio::test]
async fn test_versions_and_analyzed_packages() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/maven/versions"))
        .and(query_param("groupId", "org.slf4j"))
        .and(query_param("artifactId", "slf4j-api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["1.7.36", "2.0.9"])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/packages"))
        .and(query_param("groupId", "org.slf4j"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([package_json("2.0.9")])))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let artifact = ArtifactRef::new("org.slf4j", "slf4j-api");

    assert_eq!(client.versions(&artifact).await.unwrap(), vec!["1.7.36", "2.0.9"]);
    let analyzed = client.analyzed_packages(&artifact).await.unwrap();
    assert_eq!(analyzed[0].gav.version, "2.0.9");
}

#[tokio::test]
async fn test_versions_bad_request_means_artifact_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/maven/versions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid artifact"})))
        .mount(&mock_server)
        .await;

    let err = create_client(&mock_server)
        .versions(&ArtifactRef::new("no", "such"))
        .await
        .unwrap_err();

    assert_eq!(ExitCode::from_error(&err), ExitCode::NotFound);
    assert!(err.to_string().contains("Artifact no:such not found"));
}

#[tokio::test]
async fn test_fetch_package_requests_one_level() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/packages/org.slf4j:slf4j-api:2.0.9"))
        .and(query_param("depth", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(package_json("2.0.9")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gav: Gav = "org.slf4j:slf4j-api:2.0.9".parse().unwrap();
    let package = create_client(&mock_server).fetch_package(&gav, 1).await.unwrap();

    let resolved = package.as_resolved().unwrap();
    assert_eq!(resolved.package_size, 64000);
    assert!(resolved.has_loaded_dependencies());
}

#[tokio::test]
async fn test_fetch_package_not_analyzed_is_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/v1/packages/.+$"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let gav: Gav = "g:a:1".parse().unwrap();
    let err = create_client(&mock_server).fetch_package(&gav, 1).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<JarHellError>(),
        Some(JarHellError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_server_error_keeps_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/packages/latest"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "Database is down"})))
        .mount(&mock_server)
        .await;

    let err = create_client(&mock_server).latest_packages().await.unwrap_err();

    match err.downcast_ref::<JarHellError>() {
        Some(JarHellError::Server { status, message }) => {
            assert_eq!(*status, Some(500));
            assert_eq!(message, "Database is down");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(ExitCode::from_error(&err), ExitCode::ApplicationError);
}

#[tokio::test]
async fn test_analyze_and_wait_posts_coordinate() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/analyze-and-wait"))
        .and(body_json(json!({"groupId": "org.slf4j", "artifactId": "slf4j-api", "version": "2.0.9"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "groupId": "org.slf4j", "artifactId": "slf4j-api", "version": "2.0.9", "unresolved": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gav: Gav = "org.slf4j:slf4j-api:2.0.9".parse().unwrap();
    let package = create_client(&mock_server).analyze_and_wait(&gav).await.unwrap();

    assert!(package.is_unresolved());
}

#[tokio::test]
async fn test_analyze_and_wait_has_no_client_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/analyze-and-wait"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(1500))
                .set_body_json(package_json("2.0.9")),
        )
        .mount(&mock_server)
        .await;

    let client = JarHellClient::new(&mock_server.uri(), Duration::from_millis(500)).unwrap();
    let gav: Gav = "org.slf4j:slf4j-api:2.0.9".parse().unwrap();

    assert!(client.analyze_and_wait(&gav).await.is_ok());
}

#[tokio::test]
async fn test_lookup_times_out() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/packages/count"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(1500))
                .set_body_json(json!(12)),
        )
        .mount(&mock_server)
        .await;

    let client = JarHellClient::new(&mock_server.uri(), Duration::from_millis(200)).unwrap();
    let err = client.package_count().await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<JarHellError>(),
        Some(JarHellError::Server { status: None, .. })
    ));
}

#[tokio::test]
async fn test_package_count() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/packages/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(1234)))
        .mount(&mock_server)
        .await;

    assert_eq!(create_client(&mock_server).package_count().await.unwrap(), 1234);
}

#[tokio::test]
async fn test_caching_repository_avoids_second_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/v1/packages/.+$"))
        .and(query_param("depth", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(package_json("2.0.9")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let repository = CachingPackageRepository::new(create_client(&mock_server));
    let gav: Gav = "org.slf4j:slf4j-api:2.0.9".parse().unwrap();
    repository.fetch_package(&gav, 1).await.unwrap();
    repository.fetch_package(&gav, 1).await.unwrap();
}
