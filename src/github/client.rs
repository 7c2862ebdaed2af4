//! GitHub API client implementation

use crate::config::Config;
use crate::core::{ArchRepoError, ArchRepoResult};
use crate::github::resolver::RevisionSource;
use crate::github::types::{RepositoryCommit, TagRef};
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient};
use std::time::Duration;

const ACCEPT: &str = "application/vnd.github.v3+json";

/// GitHub API client
pub struct GitHubClient {
    http_client: HttpClient,
    api_url: String,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(config: &Config) -> ArchRepoResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));

        if let Some(token) = config.github_token() {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("token {}", token))
                    .map_err(|e| ArchRepoError::Config(format!("Invalid GitHub token: {}", e)))?,
            );
        }

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| ArchRepoError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url: config.github.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Commits of the default branch, newest first
    pub async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
    ) -> ArchRepoResult<Vec<RepositoryCommit>> {
        let url = format!("{}/repos/{}/{}/commits", self.api_url, owner, repo);
        self.api_get(&url).await
    }

    /// All tag refs of a repository
    pub async fn list_tag_refs(&self, owner: &str, repo: &str) -> ArchRepoResult<Vec<TagRef>> {
        let url = format!("{}/repos/{}/{}/git/refs/tags", self.api_url, owner, repo);
        self.api_get(&url).await
    }

    /// Make an API GET request and parse the JSON response.
    ///
    /// Any non-2xx status aborts with the status code; there is no retry.
    async fn api_get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ArchRepoResult<T> {
        tracing::debug!(url, "GitHub API request");

        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchRepoError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl RevisionSource for GitHubClient {
    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
    ) -> ArchRepoResult<Vec<RepositoryCommit>> {
        Self::list_commits(self, owner, repo).await
    }

    async fn list_tag_refs(&self, owner: &str, repo: &str) -> ArchRepoResult<Vec<TagRef>> {
        Self::list_tag_refs(self, owner, repo).await
    }
}
