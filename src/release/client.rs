//! GitHub releases API client

use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use tracing::warn;

use crate::release::error::FetchError;

/// Default base URL for the GitHub API
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// One release record as returned by the remote listing.
///
/// The remote contract always populates these fields; a record missing any of
/// them fails the decode of the whole response.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRelease {
    pub tag_name: String,
    pub name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub published_at: DateTime<Utc>,
}

/// Remote API collaborator issuing the actual listing call.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseClient: Send + Sync {
    /// Fetches the first page of releases for a repository, in the remote
    /// API's return order.
    async fn list_releases(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<RemoteRelease>, FetchError>;
}

/// Client implementation for the GitHub releases API
pub struct GitHubReleaseClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubReleaseClient {
    /// Creates a new client with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("release-hub")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
        }
    }
}

impl Default for GitHubReleaseClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl ReleaseClient for GitHubReleaseClient {
    async fn list_releases(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<RemoteRelease>, FetchError> {
        let url = format!("{}/repos/{}/{}/releases", self.base_url, owner, repo);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(format!("{owner}/{repo}")));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(FetchError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(FetchError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub releases response: {}", e);
            FetchError::InvalidResponse(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use mockito::Server;

    use super::*;

    #[tokio::test]
    async fn list_releases_returns_records_in_remote_order() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/acme/widget/releases")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"tag_name": "v0.2.0", "name": "Release 0.2", "body": "newer",
                     "created_at": "2024-02-01T00:00:00Z", "published_at": "2024-02-02T00:00:00Z"},
                    {"tag_name": "v0.1.0", "name": "Release 0.1", "body": "older",
                     "created_at": "2024-01-01T00:00:00Z", "published_at": "2024-01-02T00:00:00Z"}
                ]"#,
            )
            .create_async()
            .await;

        let client = GitHubReleaseClient::new(&server.url());
        let releases = client.list_releases("acme", "widget").await.unwrap();

        mock.assert_async().await;
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].tag_name, "v0.2.0");
        assert_eq!(releases[0].name, "Release 0.2");
        assert_eq!(releases[1].body, "older");
    }

    #[tokio::test]
    async fn list_releases_returns_not_found_for_missing_repo() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/acme/missing/releases")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let client = GitHubReleaseClient::new(&server.url());
        let result = client.list_releases("acme", "missing").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(FetchError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_releases_returns_rate_limited_for_429() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/acme/widget/releases")
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_header("retry-after", "60")
            .with_body(r#"{"message": "API rate limit exceeded"}"#)
            .create_async()
            .await;

        let client = GitHubReleaseClient::new(&server.url());
        let result = client.list_releases("acme", "widget").await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(FetchError::RateLimited {
                retry_after_secs: Some(60)
            })
        ));
    }

    #[tokio::test]
    async fn list_releases_returns_invalid_response_for_server_error() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/acme/widget/releases")
            .with_status(500)
            .create_async()
            .await;

        let client = GitHubReleaseClient::new(&server.url());
        let result = client.list_releases("acme", "widget").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(FetchError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn list_releases_fails_when_a_required_field_is_absent() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/acme/widget/releases")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"tag_name": "v0.1.0", "name": "Release 0.1"}]"#)
            .create_async()
            .await;

        let client = GitHubReleaseClient::new(&server.url());
        let result = client.list_releases("acme", "widget").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(FetchError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn list_releases_returns_empty_for_repo_without_releases() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/acme/quiet/releases")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let client = GitHubReleaseClient::new(&server.url());
        let releases = client.list_releases("acme", "quiet").await.unwrap();

        mock.assert_async().await;
        assert!(releases.is_empty());
    }
}
