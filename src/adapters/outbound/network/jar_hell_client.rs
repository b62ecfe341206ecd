use crate::inspection::domain::{ArtifactRef, Gav, Package, ResolvedPackage, SearchHit};
use crate::ports::outbound::PackageRepository;
use crate::shared::error::JarHellError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Default per-request timeout for everything except analyze-and-wait
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// JarHellClient adapter for the jar hell REST backend
///
/// Implements the PackageRepository port over `reqwest`. Every request
/// except analyze-and-wait carries the configured timeout; analysis of a
/// large package can legitimately take minutes.
pub struct JarHellClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl JarHellClient {
    /// Creates a client for the backend at `base_url`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("jar-hell/{}", version);
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    fn artifact_query(artifact: &ArtifactRef) -> String {
        format!(
            "groupId={}&artifactId={}",
            urlencoding::encode(&artifact.group_id),
            urlencoding::encode(&artifact.artifact_id)
        )
    }

    /// Coordinate path segment: each part encoded, joined by literal colons
    fn gav_path(gav: &Gav) -> String {
        [
            Some(gav.group_id.as_str()),
            Some(gav.artifact_id.as_str()),
            Some(gav.version.as_str()),
            gav.classifier.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join(":")
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }
        let body = response.json().await.map_err(|e| JarHellError::Server {
            status: Some(status.as_u16()),
            message: format!("Unexpected response body: {}", e),
        })?;
        Ok(body)
    }

    /// 404 becomes NotFound; the server's `message` is kept when present
    async fn status_error(status: StatusCode, response: Response) -> anyhow::Error {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
        tracing::debug!(status = status.as_u16(), %message, "request failed");

        if status == StatusCode::NOT_FOUND {
            JarHellError::not_found(message).into()
        } else {
            JarHellError::Server {
                status: Some(status.as_u16()),
                message,
            }
            .into()
        }
    }
}

fn transport_error(error: reqwest::Error) -> JarHellError {
    JarHellError::Server {
        status: error.status().map(|s| s.as_u16()),
        message: error.to_string(),
    }
}

#[async_trait]
impl PackageRepository for JarHellClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.get(&format!("/maven/search?query={}", urlencoding::encode(query)))
            .await
    }

    async fn versions(&self, artifact: &ArtifactRef) -> Result<Vec<String>> {
        let path = format!("/maven/versions?{}", Self::artifact_query(artifact));
        match self.get(&path).await {
            Err(e) if is_bad_request(&e) => {
                Err(JarHellError::not_found(format!("Artifact {} not found", artifact)).into())
            }
            other => other,
        }
    }

    async fn analyzed_packages(&self, artifact: &ArtifactRef) -> Result<Vec<ResolvedPackage>> {
        self.get(&format!("/packages?{}", Self::artifact_query(artifact)))
            .await
    }

    async fn fetch_package(&self, gav: &Gav, depth: u32) -> Result<Package> {
        self.get(&format!("/packages/{}?depth={}", Self::gav_path(gav), depth))
            .await
    }

    async fn analyze_and_wait(&self, gav: &Gav) -> Result<Package> {
        let url = self.url("/analyze-and-wait");
        tracing::debug!(%url, %gav, "POST");
        let response = self
            .client
            .post(&url)
            .json(gav)
            .send()
            .await
            .map_err(transport_error)?;
        Self::read_json(response).await
    }

    async fn latest_packages(&self) -> Result<Vec<ResolvedPackage>> {
        self.get("/packages/latest").await
    }

    async fn package_count(&self) -> Result<u64> {
        self.get("/packages/count").await
    }
}

fn is_bad_request(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<JarHellError>(),
        Some(JarHellError::Server {
            status: Some(400),
            ..
        })
    )
}
