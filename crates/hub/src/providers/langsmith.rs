//! LangSmith Prompt Hub provider implementation.
//!
//! Endpoints used:
//! - `GET  /commits/{owner}/{repo}/{commit}` to pull a manifest
//! - `POST /repos/` and `PATCH /repos/{owner}/{repo}` for repository metadata
//! - `GET  /repos/{owner}/{repo}` for the latest commit hash
//! - `POST /commits/{owner}/{repo}` to publish a manifest

use crate::client::{HubClient, HubPrompt, PushRequest};
use crate::manifest::{decode_manifest, encode_manifest};
use promptsync_core::{AppError, AppResult};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Default LangSmith API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.smith.langchain.com";

/// Owner placeholder meaning "the tenant of the API key".
const CURRENT_OWNER: &str = "-";

/// Response of the commit-manifest endpoint.
#[derive(Debug, Deserialize)]
struct CommitManifestResponse {
    #[serde(default)]
    commit_hash: Option<String>,
    manifest: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct CreateRepoRequest<'a> {
    repo_handle: &'a str,
    is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    tags: &'a [String],
}

#[derive(Debug, Serialize)]
struct UpdateRepoRequest<'a> {
    is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    tags: &'a [String],
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    repo: RepoInfo,
}

#[derive(Debug, Deserialize)]
struct RepoInfo {
    #[serde(default)]
    last_commit_hash: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateCommitRequest {
    manifest: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_commit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateCommitResponse {
    commit: CommitInfo,
}

#[derive(Debug, Deserialize)]
struct CommitInfo {
    commit_hash: String,
}

/// A parsed prompt identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptIdentifier {
    pub owner: String,
    pub repo: String,
    pub commit: String,
}

impl PromptIdentifier {
    /// Parse `name`, `owner/name` or `owner/name:commit`.
    pub fn parse(identifier: &str) -> AppResult<Self> {
        let identifier = identifier.trim();
        let (path, commit) = match identifier.split_once(':') {
            Some((path, commit)) if !commit.is_empty() => (path, commit),
            Some(_) => {
                return Err(AppError::Hub(format!(
                    "Invalid prompt identifier: '{}'",
                    identifier
                )))
            }
            None => (identifier, "latest"),
        };

        let (owner, repo) = match path.split_once('/') {
            Some((owner, repo)) => (owner, repo),
            None => (CURRENT_OWNER, path),
        };

        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(AppError::Hub(format!(
                "Invalid prompt identifier: '{}'",
                identifier
            )));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            commit: commit.to_string(),
        })
    }
}

/// LangSmith Prompt Hub client.
pub struct LangSmithClient {
    /// Base URL for the LangSmith API
    base_url: String,

    /// API key sent as `x-api-key`
    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl LangSmithClient {
    /// Create a client for the public LangSmith API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_API_URL, api_key)
    }

    /// Create a client with a custom base URL (self-hosted or test server).
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Web UI address matching the API endpoint.
    pub fn web_url(&self) -> String {
        let web = self.base_url.replacen("://api.", "://", 1);
        web.strip_suffix("/api").unwrap_or(&web).to_string()
    }

    fn prompt_url(&self, owner: &str, repo: &str, commit_hash: &str) -> String {
        let short: String = commit_hash.chars().take(8).collect();
        format!("{}/hub/{}/{}:{}", self.web_url(), owner, repo, short)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .header("x-api-key", &self.api_key)
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        context: &str,
    ) -> AppResult<reqwest::Response> {
        builder
            .send()
            .await
            .map_err(|e| AppError::Hub(format!("{}: request failed: {}", context, e)))
    }

    /// Create the repository, or update its metadata when it already exists.
    async fn upsert_repo(&self, owner: &str, repo: &str, request: &PushRequest) -> AppResult<()> {
        let body = CreateRepoRequest {
            repo_handle: repo,
            is_public: request.is_public,
            description: request.description.as_deref(),
            tags: &request.tags,
        };
        let response = self
            .send(
                self.request(reqwest::Method::POST, "/repos/").json(&body),
                "Create repository",
            )
            .await?;

        if response.status() == StatusCode::CONFLICT {
            tracing::debug!("Repository {}/{} already exists, updating metadata", owner, repo);
            let body = UpdateRepoRequest {
                is_public: request.is_public,
                description: request.description.as_deref(),
                tags: &request.tags,
            };
            let response = self
                .send(
                    self.request(reqwest::Method::PATCH, &format!("/repos/{}/{}", owner, repo))
                        .json(&body),
                    "Update repository",
                )
                .await?;
            ensure_success(response, "Update repository").await?;
            return Ok(());
        }

        ensure_success(response, "Create repository").await?;
        Ok(())
    }

    async fn latest_commit(&self, owner: &str, repo: &str) -> AppResult<Option<String>> {
        let response = self
            .send(
                self.request(reqwest::Method::GET, &format!("/repos/{}/{}", owner, repo)),
                "Get repository",
            )
            .await?;
        let response = ensure_success(response, "Get repository").await?;

        let repo: RepoResponse = response
            .json()
            .await
            .map_err(|e| AppError::Hub(format!("Failed to parse repository response: {}", e)))?;

        Ok(repo.repo.last_commit_hash)
    }
}

/// Turn a non-success response into a hub error carrying the body.
async fn ensure_success(response: reqwest::Response, context: &str) -> AppResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(AppError::Hub(format!(
        "{} failed ({}): {}",
        context, status, error_text
    )))
}

#[async_trait::async_trait]
impl HubClient for LangSmithClient {
    fn provider_name(&self) -> &str {
        "langsmith"
    }

    async fn pull(&self, name: &str) -> AppResult<HubPrompt> {
        let id = PromptIdentifier::parse(name)?;
        tracing::info!("Pulling prompt {}/{} ({})", id.owner, id.repo, id.commit);

        let path = format!("/commits/{}/{}/{}", id.owner, id.repo, id.commit);
        let response = self
            .send(self.request(reqwest::Method::GET, &path), "Pull prompt")
            .await?;
        let response = ensure_success(response, &format!("Pull prompt '{}'", name)).await?;

        let body: CommitManifestResponse = response
            .json()
            .await
            .map_err(|e| AppError::Hub(format!("Failed to parse pull response: {}", e)))?;

        tracing::debug!("Pulled commit {:?}", body.commit_hash);

        decode_manifest(&body.manifest)
    }

    async fn push(&self, request: &PushRequest) -> AppResult<String> {
        let (owner, repo) = request.repo.split_once('/').ok_or_else(|| {
            AppError::Hub(format!(
                "Push target must be 'owner/name', got '{}'",
                request.repo
            ))
        })?;
        tracing::info!("Pushing prompt {}/{}", owner, repo);

        self.upsert_repo(owner, repo, request).await?;
        let parent_commit = self.latest_commit(owner, repo).await?;

        let body = CreateCommitRequest {
            manifest: encode_manifest(&request.prompt),
            parent_commit,
        };
        let response = self
            .send(
                self.request(reqwest::Method::POST, &format!("/commits/{}/{}", owner, repo))
                    .json(&body),
                "Create commit",
            )
            .await?;
        let response = ensure_success(response, "Create commit").await?;

        let created: CreateCommitResponse = response
            .json()
            .await
            .map_err(|e| AppError::Hub(format!("Failed to parse commit response: {}", e)))?;

        Ok(self.prompt_url(owner, repo, &created.commit.commit_hash))
    }
}
