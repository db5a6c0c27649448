use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Issue, IssueQuery, RepoDetail};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Read-only GitHub calls the screens depend on.
#[async_trait]
pub trait GitHubApi: Send + Sync + std::fmt::Debug {
    /// `GET /repos/{full_name}`
    async fn get_repo(&self, full_name: &str) -> Result<RepoDetail>;

    /// `GET /repos/{full_name}/issues` for one filter/page
    async fn list_issues(&self, full_name: &str, query: IssueQuery) -> Result<Vec<Issue>>;
}

#[cfg(test)]
pub mod fake {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use tokio::sync::Barrier;

    use super::GitHubApi;
    use crate::error::{AppError, Result};
    use crate::types::{
        Issue, IssueFilter, IssueQuery, IssueState, Label, Owner, RepoDetail, PER_PAGE,
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Repo(String),
        Issues(String, IssueQuery),
    }

    /// Scripted GitHub: known repositories resolve, everything else is a 404.
    /// Each repository has `pages` full pages of issues per filter.
    #[derive(Debug, Default)]
    pub struct FakeApi {
        repos: HashMap<String, RepoDetail>,
        pages: u32,
        calls: Mutex<Vec<Call>>,
        barrier: Option<Arc<Barrier>>,
    }

    pub fn repo(id: u64, full_name: &str) -> RepoDetail {
        let (owner, name) = full_name.split_once('/').unwrap_or((full_name, ""));
        RepoDetail {
            id,
            full_name: full_name.to_string(),
            name: name.to_string(),
            description: Some(format!("The {} repository", name)),
            html_url: format!("https://github.com/{}", full_name),
            owner: Owner {
                login: owner.to_string(),
                avatar_url: format!("https://avatars.githubusercontent.com/{}", owner),
            },
        }
    }

    pub fn issue(id: u64, title: &str, state: IssueState) -> Issue {
        Issue {
            id,
            number: id,
            title: title.to_string(),
            html_url: format!("https://github.com/a/b/issues/{}", id),
            state,
            user: Owner {
                login: "octocat".to_string(),
                avatar_url: "https://avatars.githubusercontent.com/octocat".to_string(),
            },
            labels: vec![Label {
                id: 1,
                name: "bug".to_string(),
            }],
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            pull_request: None,
        }
    }

    /// Title the fake gives the `i`th issue of a page
    pub fn issue_title(query: IssueQuery, i: u32) -> String {
        format!("{} p{} #{}", query.filter.as_api_str(), query.page, i)
    }

    impl FakeApi {
        pub fn new() -> Self {
            Self {
                pages: 3,
                ..Self::default()
            }
        }

        pub fn with_repo(mut self, repo: RepoDetail) -> Self {
            self.repos.insert(repo.full_name.clone(), repo);
            self
        }

        pub fn with_pages(mut self, pages: u32) -> Self {
            self.pages = pages;
            self
        }

        /// Every call waits until `parties` calls are in flight at once
        pub fn with_barrier(mut self, parties: usize) -> Self {
            self.barrier = Some(Arc::new(Barrier::new(parties)));
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub fn issue_calls(&self) -> Vec<IssueQuery> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::Issues(_, q) => Some(q),
                    Call::Repo(_) => None,
                })
                .collect()
        }

        async fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
            }
        }
    }

    #[async_trait]
    impl GitHubApi for FakeApi {
        async fn get_repo(&self, full_name: &str) -> Result<RepoDetail> {
            self.record(Call::Repo(full_name.to_string())).await;
            self.repos
                .get(full_name)
                .cloned()
                .ok_or_else(|| AppError::Api("Not Found".to_string()))
        }

        async fn list_issues(&self, full_name: &str, query: IssueQuery) -> Result<Vec<Issue>> {
            self.record(Call::Issues(full_name.to_string(), query)).await;
            if !self.repos.contains_key(full_name) {
                return Err(AppError::Api("Not Found".to_string()));
            }
            if query.page > self.pages {
                return Ok(vec![]);
            }
            let state = match query.filter {
                IssueFilter::Closed => IssueState::Closed,
                IssueFilter::Open | IssueFilter::All => IssueState::Open,
            };
            Ok((0..PER_PAGE)
                .map(|i| {
                    let id = u64::from(query.page * 100 + i);
                    issue(id, &issue_title(query, i), state)
                })
                .collect())
        }
    }
}
