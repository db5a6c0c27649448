use crate::error::AppError;
use crate::route::Route;
use crate::types::{Issue, IssueFilter, RepoDetail};

/// What to confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteBookmark(String),
}

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Back,
    Navigate(Route),
    Tick,
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,

    // Bookmark input
    FocusInput,
    BlurInput,
    InputChar(char),
    InputPaste(String),
    InputBackspace,
    Submit,
    RepoResolved {
        repo: Box<RepoDetail>,
        request_id: u64,
    },

    // Bookmark deletion
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,
    Delete(String),

    // Issue browser
    DetailLoaded {
        repo: Box<RepoDetail>,
        issues: Vec<Issue>,
        request_id: u64,
    },
    IssuesLoaded {
        issues: Vec<Issue>,
        request_id: u64,
    },
    SetFilter(IssueFilter),
    NextFilter,
    PrevFilter,
    PreviousPage,
    NextPage,
    Reload,

    // External links
    OpenInBrowser,
    YankUrl,

    /// A request failed; only reported if `request_id` is still current
    RequestFailed {
        message: String,
        request_id: u64,
    },
    Error(String),
    None,
}

impl From<AppError> for Action {
    fn from(err: AppError) -> Self {
        Action::Error(err.to_string())
    }
}
