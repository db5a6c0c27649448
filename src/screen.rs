use crate::types::{Bookmark, Issue, IssueQuery, RepoDetail};

/// Bookmark list screen. `submitting` holds the id of the in-flight lookup.
#[derive(Debug, Clone, Default)]
pub struct ListScreen {
    pub bookmarks: Vec<Bookmark>,
    pub input: String,
    pub editing: bool,
    pub submitting: Option<u64>,
    pub index: usize,
}

impl ListScreen {
    pub fn new(bookmarks: Vec<Bookmark>) -> Self {
        Self {
            bookmarks,
            ..Self::default()
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bookmarks.iter().any(|b| b.name == name)
    }

    /// Appends unless the name is already bookmarked.
    pub fn add(&mut self, bookmark: Bookmark) -> bool {
        if self.contains(&bookmark.name) {
            return false;
        }
        self.bookmarks.push(bookmark);
        true
    }

    /// Removes every entry with exactly this name, returning how many went.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.name != name);
        let removed = before - self.bookmarks.len();
        self.index = self.index.min(self.bookmarks.len().saturating_sub(1));
        removed
    }

    pub fn selected(&self) -> Option<&Bookmark> {
        self.bookmarks.get(self.index)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailPhase {
    Loading,
    Loaded {
        repo: Box<RepoDetail>,
        issues: Vec<Issue>,
    },
}

/// Issue browser for one repository. A new instance is created per
/// navigation, so it always starts on the default query.
#[derive(Debug, Clone)]
pub struct DetailScreen {
    pub full_name: String,
    pub query: IssueQuery,
    pub phase: DetailPhase,
    /// Id of the newest request issued for this screen; older responses are dropped
    pub latest_request: u64,
    /// An issues-only refetch is in flight
    pub fetching: bool,
    pub issue_index: usize,
}

impl DetailScreen {
    pub fn new(full_name: String, request_id: u64) -> Self {
        Self {
            full_name,
            query: IssueQuery::default(),
            phase: DetailPhase::Loading,
            latest_request: request_id,
            fetching: false,
            issue_index: 0,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.phase, DetailPhase::Loaded { .. })
    }

    pub fn repo(&self) -> Option<&RepoDetail> {
        match &self.phase {
            DetailPhase::Loaded { repo, .. } => Some(&**repo),
            DetailPhase::Loading => None,
        }
    }

    pub fn issues(&self) -> &[Issue] {
        match &self.phase {
            DetailPhase::Loaded { issues, .. } => issues,
            DetailPhase::Loading => &[],
        }
    }

    pub fn selected_issue(&self) -> Option<&Issue> {
        self.issues().get(self.issue_index)
    }

    /// Moves to `query` and records the request that will fetch it.
    pub fn begin_refetch(&mut self, query: IssueQuery, request_id: u64) {
        self.query = query;
        self.latest_request = request_id;
        self.fetching = true;
    }

    pub fn finish_load(&mut self, repo: RepoDetail, issues: Vec<Issue>) {
        self.phase = DetailPhase::Loaded {
            repo: Box::new(repo),
            issues,
        };
        self.issue_index = 0;
        self.fetching = false;
    }

    pub fn replace_issues(&mut self, new_issues: Vec<Issue>) {
        if let DetailPhase::Loaded { issues, .. } = &mut self.phase {
            *issues = new_issues;
        }
        self.issue_index = 0;
        self.fetching = false;
    }
}
