use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::action::{Action, ConfirmAction};
use crate::api::GitHubApi;
use crate::error::AppError;
use crate::event::Event;
use crate::route::Route;
use crate::screen::{DetailScreen, ListScreen};
use crate::store::BookmarkStore;
use crate::types::{Bookmark, Issue, IssueFilter, IssueQuery, RepoDetail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// Transient message shown in the status bar until it expires
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
pub enum Screen {
    List(ListScreen),
    Detail(DetailScreen),
}

pub struct App {
    pub screen: Screen,
    pub confirm: Option<ConfirmAction>,
    pub notification: Option<Notification>,
    pub should_quit: bool,
    initial_route: Route,
    notification_ttl: Duration,
    last_request_id: u64,
    api: Arc<dyn GitHubApi>,
    store: Box<dyn BookmarkStore>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        api: Arc<dyn GitHubApi>,
        store: Box<dyn BookmarkStore>,
        action_tx: mpsc::UnboundedSender<Action>,
        notification_ttl: Duration,
        initial_route: Route,
    ) -> Self {
        Self {
            screen: Screen::List(ListScreen::default()),
            confirm: None,
            notification: None,
            should_quit: false,
            initial_route,
            notification_ttl,
            last_request_id: 0,
            api,
            store,
            action_tx,
        }
    }

    pub fn route(&self) -> Route {
        match &self.screen {
            Screen::List(_) => Route::RepoList,
            Screen::Detail(detail) => Route::detail(detail.full_name.clone()),
        }
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::Navigate(self.initial_route.clone()),
            Event::Tick => Action::Tick,
            Event::Paste(text) => match &self.screen {
                Screen::List(list) if list.editing => Action::InputPaste(text),
                _ => Action::None,
            },
            Event::Key(key) => self.handle_key(key),
            Event::Render => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        if self.confirm.is_some() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Action::ConfirmYes,
                KeyCode::Char('n') | KeyCode::Char('q') | KeyCode::Esc => Action::ConfirmNo,
                _ => Action::None,
            };
        }

        match &self.screen {
            Screen::List(list) if list.editing => handle_input_key(key),
            Screen::List(list) => handle_list_key(list, key),
            Screen::Detail(_) => handle_detail_key(key),
        }
    }

    pub fn update(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Back => match self.screen {
                Screen::List(_) => self.should_quit = true,
                Screen::Detail(_) => self.navigate(Route::RepoList),
            },
            Action::Navigate(route) => self.navigate(route),
            Action::Tick => self.expire_notification(),
            Action::ScrollUp => self.move_selection(|index, _| index.saturating_sub(1)),
            Action::ScrollDown => self.move_selection(|index, _| index + 1),
            Action::GoToTop => self.move_selection(|_, _| 0),
            Action::GoToBottom => self.move_selection(|_, len| len - 1),

            // Bookmark input
            Action::FocusInput => {
                if let Screen::List(list) = &mut self.screen {
                    list.editing = true;
                }
            }
            Action::BlurInput => {
                if let Screen::List(list) = &mut self.screen {
                    list.editing = false;
                }
            }
            Action::InputChar(c) => {
                if let Screen::List(list) = &mut self.screen {
                    if list.editing {
                        list.input.push(c);
                    }
                }
            }
            Action::InputPaste(text) => {
                if let Screen::List(list) = &mut self.screen {
                    if list.editing {
                        list.input.extend(text.chars().filter(|c| !c.is_control()));
                    }
                }
            }
            Action::InputBackspace => {
                if let Screen::List(list) = &mut self.screen {
                    list.input.pop();
                }
            }
            Action::Submit => self.submit(),
            Action::RepoResolved { repo, request_id } => self.on_repo_resolved(*repo, request_id),

            // Bookmark deletion
            Action::ShowConfirm(confirm) => {
                self.confirm = Some(confirm);
            }
            Action::ConfirmYes => {
                if let Some(ConfirmAction::DeleteBookmark(name)) = self.confirm.take() {
                    self.update(Action::Delete(name));
                }
            }
            Action::ConfirmNo => {
                self.confirm = None;
            }
            Action::Delete(name) => self.delete(&name),

            // Issue browser
            Action::DetailLoaded {
                repo,
                issues,
                request_id,
            } => self.on_detail_loaded(*repo, issues, request_id),
            Action::IssuesLoaded { issues, request_id } => {
                self.on_issues_loaded(issues, request_id)
            }
            Action::SetFilter(filter) => self.change_query(|q| Some(q.with_filter(filter))),
            Action::NextFilter => self.change_query(|q| Some(q.with_filter(q.filter.next()))),
            Action::PrevFilter => self.change_query(|q| Some(q.with_filter(q.filter.prev()))),
            Action::PreviousPage => self.change_query(IssueQuery::previous),
            Action::NextPage => self.change_query(|q| Some(q.next())),
            Action::Reload => {
                if let Screen::Detail(detail) = &self.screen {
                    let route = Route::detail(detail.full_name.clone());
                    self.navigate(route);
                }
            }

            Action::OpenInBrowser => self.open_selected(),
            Action::YankUrl => self.yank_selected(),

            Action::RequestFailed {
                message,
                request_id,
            } => self.on_request_failed(message, request_id),
            Action::Error(msg) => self.notify(NotificationKind::Error, msg),
            Action::None => {}
        }
    }

    /// Mounts a fresh screen for `route`. The list re-hydrates from the store;
    /// the detail screen starts loading on the default query.
    fn navigate(&mut self, route: Route) {
        tracing::debug!(%route, "navigate");
        self.confirm = None;
        match route {
            Route::RepoList => {
                let bookmarks = match self.store.load() {
                    Ok(bookmarks) => bookmarks,
                    Err(e) => {
                        self.report(e);
                        Vec::new()
                    }
                };
                self.screen = Screen::List(ListScreen::new(bookmarks));
            }
            Route::RepoDetail(full_name) => {
                let request_id = self.next_request_id();
                self.screen = Screen::Detail(DetailScreen::new(full_name.clone(), request_id));
                self.spawn_load_detail(full_name, request_id);
            }
        }
    }

    fn move_selection(&mut self, step: impl FnOnce(usize, usize) -> usize) {
        let (index, len) = match &mut self.screen {
            Screen::List(list) => (&mut list.index, list.bookmarks.len()),
            Screen::Detail(detail) => {
                let len = detail.issues().len();
                (&mut detail.issue_index, len)
            }
        };
        if len == 0 {
            *index = 0;
            return;
        }
        *index = step(*index, len).min(len - 1);
    }

    fn submit(&mut self) {
        let Screen::List(list) = &self.screen else {
            return;
        };
        if list.is_submitting() {
            return;
        }

        let name = list.input.trim().to_string();
        if name.is_empty() {
            self.notify(NotificationKind::Error, "Type a repository name.");
            return;
        }

        let request_id = self.next_request_id();
        if let Screen::List(list) = &mut self.screen {
            list.submitting = Some(request_id);
        }
        self.spawn_lookup(name, request_id);
    }

    fn on_repo_resolved(&mut self, repo: RepoDetail, request_id: u64) {
        let Screen::List(list) = &mut self.screen else {
            tracing::debug!(request_id, "lookup finished after leaving the list");
            return;
        };
        if list.submitting != Some(request_id) {
            tracing::debug!(request_id, "dropping stale lookup");
            return;
        }
        list.submitting = None;

        if !list.add(Bookmark::from(&repo)) {
            self.notify(NotificationKind::Error, "Repository already added.");
            return;
        }
        list.input.clear();
        list.index = list.bookmarks.len() - 1;

        let saved = self.store.save(&list.bookmarks);
        tracing::info!(name = %repo.full_name, id = repo.id, "bookmark added");
        match saved {
            Ok(()) => self.notify(
                NotificationKind::Info,
                format!("Added {}", repo.full_name),
            ),
            Err(e) => self.report(e),
        }
    }

    fn delete(&mut self, name: &str) {
        let Screen::List(list) = &mut self.screen else {
            return;
        };
        let removed = list.remove(name);
        let saved = self.store.save(&list.bookmarks);
        tracing::info!(name, removed, "bookmark deleted");
        if let Err(e) = saved {
            self.report(e);
        }
    }

    fn on_detail_loaded(&mut self, repo: RepoDetail, issues: Vec<Issue>, request_id: u64) {
        match &mut self.screen {
            Screen::Detail(detail) if detail.latest_request == request_id => {
                detail.finish_load(repo, issues);
            }
            _ => tracing::debug!(request_id, "dropping stale repository load"),
        }
    }

    fn on_issues_loaded(&mut self, issues: Vec<Issue>, request_id: u64) {
        match &mut self.screen {
            Screen::Detail(detail) if detail.latest_request == request_id => {
                detail.replace_issues(issues);
            }
            _ => tracing::debug!(request_id, "dropping stale issues page"),
        }
    }

    /// Applies a filter/page transition. Ignored until the first load
    /// completes; a transition returning `None` issues no request.
    fn change_query(&mut self, transition: impl FnOnce(IssueQuery) -> Option<IssueQuery>) {
        let Screen::Detail(detail) = &self.screen else {
            return;
        };
        if !detail.is_loaded() {
            return;
        }
        let Some(query) = transition(detail.query) else {
            return;
        };
        let full_name = detail.full_name.clone();

        let request_id = self.next_request_id();
        if let Screen::Detail(detail) = &mut self.screen {
            detail.begin_refetch(query, request_id);
        }
        self.spawn_load_issues(full_name, query, request_id);
    }

    fn on_request_failed(&mut self, message: String, request_id: u64) {
        let current = match &mut self.screen {
            Screen::List(list) if list.submitting == Some(request_id) => {
                list.submitting = None;
                true
            }
            Screen::Detail(detail) if detail.latest_request == request_id => {
                detail.fetching = false;
                true
            }
            _ => false,
        };
        if !current {
            tracing::debug!(request_id, error = %message, "dropping stale failure");
            return;
        }
        tracing::warn!(request_id, error = %message, "request failed");
        self.notify(NotificationKind::Error, message);
    }

    fn selected_url(&self) -> Option<String> {
        match &self.screen {
            Screen::List(list) => list.selected().map(|b| b.url.clone()),
            Screen::Detail(detail) => detail
                .selected_issue()
                .map(|i| i.html_url.clone())
                .or_else(|| detail.repo().map(|r| r.html_url.clone())),
        }
    }

    fn open_selected(&mut self) {
        let Some(url) = self.selected_url() else {
            return;
        };
        if let Err(e) = open::that(&url) {
            tracing::warn!(%url, error = %e, "failed to open browser");
            self.notify(
                NotificationKind::Error,
                format!("Failed to open browser: {}", e),
            );
        }
    }

    fn yank_selected(&mut self) {
        let Some(url) = self.selected_url() else {
            return;
        };
        let result = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(url.clone()));
        match result {
            Ok(()) => self.notify(NotificationKind::Info, format!("Copied {}", url)),
            Err(e) => self.notify(
                NotificationKind::Error,
                format!("Clipboard unavailable: {}", e),
            ),
        }
    }

    fn next_request_id(&mut self) -> u64 {
        self.last_request_id += 1;
        self.last_request_id
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notification = Some(Notification {
            kind,
            message: message.into(),
            expires_at: Instant::now() + self.notification_ttl,
        });
    }

    fn expire_notification(&mut self) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.expires_at <= Instant::now())
        {
            self.notification = None;
        }
    }

    fn report(&mut self, err: AppError) {
        tracing::error!(error = %err, "operation failed");
        self.update(Action::from(err));
    }

    fn spawn_lookup(&self, name: String, request_id: u64) {
        let tx = self.action_tx.clone();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            let action = match api.get_repo(&name).await {
                Ok(repo) => Action::RepoResolved {
                    repo: Box::new(repo),
                    request_id,
                },
                Err(e) => Action::RequestFailed {
                    message: format!("Could not add {}: {}", name, e),
                    request_id,
                },
            };
            tx.send(action).ok();
        });
    }

    fn spawn_load_detail(&self, full_name: String, request_id: u64) {
        let tx = self.action_tx.clone();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            // Metadata and first page in parallel
            let (repo, issues) = tokio::join!(
                api.get_repo(&full_name),
                api.list_issues(&full_name, IssueQuery::default())
            );

            let action = match (repo, issues) {
                (Ok(repo), Ok(issues)) => Action::DetailLoaded {
                    repo: Box::new(repo),
                    issues,
                    request_id,
                },
                (Err(e), _) | (_, Err(e)) => Action::RequestFailed {
                    message: e.to_string(),
                    request_id,
                },
            };
            tx.send(action).ok();
        });
    }

    fn spawn_load_issues(&self, full_name: String, query: IssueQuery, request_id: u64) {
        let tx = self.action_tx.clone();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            let action = match api.list_issues(&full_name, query).await {
                Ok(issues) => Action::IssuesLoaded { issues, request_id },
                Err(e) => Action::RequestFailed {
                    message: e.to_string(),
                    request_id,
                },
            };
            tx.send(action).ok();
        });
    }
}

fn handle_input_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Submit,
        KeyCode::Esc => Action::BlurInput,
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Action::InputChar(c),
        _ => Action::None,
    }
}

fn handle_list_key(list: &ListScreen, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
        KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
        KeyCode::Char('g') | KeyCode::Home => Action::GoToTop,
        KeyCode::Char('G') | KeyCode::End => Action::GoToBottom,
        KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Char('/') => Action::FocusInput,
        KeyCode::Enter => list
            .selected()
            .map(|b| Action::Navigate(Route::detail(b.name.clone())))
            .unwrap_or(Action::None),
        KeyCode::Char('d') | KeyCode::Delete => list
            .selected()
            .map(|b| Action::ShowConfirm(ConfirmAction::DeleteBookmark(b.name.clone())))
            .unwrap_or(Action::None),
        KeyCode::Char('o') => Action::OpenInBrowser,
        KeyCode::Char('y') => Action::YankUrl,
        _ => Action::None,
    }
}

fn handle_detail_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Back,
        KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
        KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
        KeyCode::Char('g') | KeyCode::Home => Action::GoToTop,
        KeyCode::Char('G') | KeyCode::End => Action::GoToBottom,
        KeyCode::Char('1') => Action::SetFilter(IssueFilter::Open),
        KeyCode::Char('2') => Action::SetFilter(IssueFilter::Closed),
        KeyCode::Char('3') => Action::SetFilter(IssueFilter::All),
        KeyCode::Tab => Action::NextFilter,
        KeyCode::BackTab => Action::PrevFilter,
        KeyCode::Char('h') | KeyCode::Left => Action::PreviousPage,
        KeyCode::Char('l') | KeyCode::Right => Action::NextPage,
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Char('o') => Action::OpenInBrowser,
        KeyCode::Char('y') => Action::YankUrl,
        _ => Action::None,
    }
}
