use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Issues are always requested at this page size.
pub const PER_PAGE: u32 = 5;

/// A bookmarked repository, as persisted under the `repos` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: u64,
    /// Full name, `owner/repo`
    pub name: String,
    pub url: String,
}

impl From<&RepoDetail> for Bookmark {
    fn from(repo: &RepoDetail) -> Self {
        Self {
            id: repo.id,
            name: repo.full_name.clone(),
            url: repo.html_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
}

/// Repository metadata from `GET /repos/{owner}/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDetail {
    pub id: u64,
    pub full_name: String,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub owner: Owner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueState::Open => write!(f, "Open"),
            IssueState::Closed => write!(f, "Closed"),
        }
    }
}

/// GitHub issue (the issues endpoint also returns pull requests)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub state: IssueState,
    pub user: Owner,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueFilter {
    #[default]
    Open,
    Closed,
    All,
}

impl IssueFilter {
    pub const ALL: [IssueFilter; 3] = [IssueFilter::Open, IssueFilter::Closed, IssueFilter::All];

    pub fn as_api_str(&self) -> &'static str {
        match self {
            IssueFilter::Open => "open",
            IssueFilter::Closed => "closed",
            IssueFilter::All => "all",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            IssueFilter::Open => 0,
            IssueFilter::Closed => 1,
            IssueFilter::All => 2,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for IssueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueFilter::Open => write!(f, "Open"),
            IssueFilter::Closed => write!(f, "Closed"),
            IssueFilter::All => write!(f, "All"),
        }
    }
}

/// Filter and page of the detail screen's issue list.
///
/// Every transition returns the new query; changing the filter always lands on
/// page 1, and there is no upper bound on `next` (a page past the end is just
/// an empty list from the API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueQuery {
    pub filter: IssueFilter,
    pub page: u32,
}

impl Default for IssueQuery {
    fn default() -> Self {
        Self {
            filter: IssueFilter::default(),
            page: 1,
        }
    }
}

impl IssueQuery {
    pub fn with_filter(self, filter: IssueFilter) -> Self {
        Self { filter, page: 1 }
    }

    /// `None` when already on the first page.
    pub fn previous(self) -> Option<Self> {
        if self.page < 2 {
            return None;
        }
        Some(Self {
            page: self.page - 1,
            ..self
        })
    }

    pub fn next(self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page >= 2
    }
}
