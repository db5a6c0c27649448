use async_trait::async_trait;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::GitHubApi;
use crate::error::{AppError, Result};
use crate::types::{Issue, IssueQuery, RepoDetail, PER_PAGE};

/// Unauthenticated GitHub REST client. GitHub's anonymous rate limits apply.
pub struct GitHub {
    client: Octocrab,
    base_url: String,
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl From<octocrab::Error> for AppError {
    fn from(err: octocrab::Error) -> Self {
        AppError::Api(err.to_string())
    }
}

/// Query string of the issues endpoint
#[derive(Debug, Serialize)]
struct IssueParams {
    state: &'static str,
    per_page: u32,
    page: u32,
}

impl From<IssueQuery> for IssueParams {
    fn from(query: IssueQuery) -> Self {
        Self {
            state: query.filter.as_api_str(),
            per_page: PER_PAGE,
            page: query.page,
        }
    }
}

fn repo_route(full_name: &str) -> String {
    format!("/repos/{}", full_name)
}

fn issues_route(full_name: &str) -> String {
    format!("/repos/{}/issues", full_name)
}

impl GitHub {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Octocrab::builder().base_uri(base_url)?.build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Passthrough GET against the base URL. Errors are not translated beyond
    /// their message.
    pub async fn get<T, P>(&self, path: &str, params: Option<&P>) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        tracing::debug!(path, "GET");
        let response = self.client.get(path, params).await?;
        Ok(response)
    }
}

#[async_trait]
impl GitHubApi for GitHub {
    async fn get_repo(&self, full_name: &str) -> Result<RepoDetail> {
        self.get(&repo_route(full_name), None::<&()>).await
    }

    async fn list_issues(&self, full_name: &str, query: IssueQuery) -> Result<Vec<Issue>> {
        let params = IssueParams::from(query);
        self.get(&issues_route(full_name), Some(&params)).await
    }
}
