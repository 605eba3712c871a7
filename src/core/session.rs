//! The explorer session: the one place state transitions happen.
//!
//! [`ExplorerSession`] owns the navigation history, the current listing,
//! the selection, and the command console, and is the only component that
//! talks to the remote service. Presentation code calls its transition
//! methods and reads its query methods; it never touches fields directly.
//!
//! # Concurrency
//!
//! Everything runs on one cooperative thread. Listing requests
//! (navigate, back/forward, refresh) carry a ticket from a monotonically
//! increasing counter; a response whose ticket is no longer the latest is
//! dropped on arrival, so a slow response can never clobber a newer
//! navigation. State is kept in a `RefCell` and no borrow is held across
//! an `.await`.
//!
//! History moves are staged: a navigate or back/forward computes the
//! history it will commit when issued, and the next back/forward steps
//! from that pending history. Two quick back clicks therefore move two
//! entries even though only the second listing is ever applied.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::logging::{error, log, warn};

use crate::config::{APP_NAME, COMMAND_FAILED_TEXT, verbs};
use crate::core::api::{Clock, ExplorerApi, SystemClock};
use crate::core::console::CommandConsole;
use crate::core::error::{ExplorerError, FetchError};
use crate::core::history::NavigationHistory;
use crate::core::listing::ListingView;
use crate::core::selection::SelectionModel;
use crate::models::{
    BatchOutcome, Breadcrumb, ClickModifiers, CommandReply, ConsoleKind, ConsoleLine, Entry,
    EntryKey, OpenFile, SortDirection, SortKey, SortOptions, StatusLevel, StatusMessage,
    SystemInfo, VirtualPath,
};
use crate::utils::format::format_selection_count;

/// What a transition did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// New state was applied
    Applied,
    /// Nothing to do (same path, history boundary, ...)
    Unchanged,
    /// A newer listing request was issued while this one was in flight
    Superseded,
}

/// How a completed listing load touches the history.
enum HistoryUpdate {
    /// Navigate or back/forward: adopt the staged history
    Commit(NavigationHistory),
    /// Refresh: leave history alone
    Keep,
}

#[derive(Debug)]
struct SessionState {
    current_path: VirtualPath,
    listing: ListingView,
    selection: SelectionModel,
    history: NavigationHistory,
    /// History staged by the latest in-flight navigate or back/forward
    pending_history: Option<NavigationHistory>,
    console: CommandConsole,
    sort: SortOptions,
    filter: String,
    status: Option<StatusMessage>,
    system_info: Option<SystemInfo>,
    open_file: Option<OpenFile>,
    loading: bool,
}

impl SessionState {
    fn new() -> Self {
        let root = VirtualPath::root();
        Self {
            current_path: root.clone(),
            listing: ListingView::new(),
            selection: SelectionModel::new(),
            history: NavigationHistory::new(root),
            pending_history: None,
            console: CommandConsole::new(),
            sort: SortOptions::default(),
            filter: String::new(),
            status: None,
            system_info: None,
            open_file: None,
            loading: false,
        }
    }

    fn ordered_keys(&self) -> Vec<EntryKey> {
        self.listing.ordered_keys(self.sort.key, self.sort.direction, &self.filter)
    }

    /// Every listed key in sort order, ignoring the filter.
    fn all_keys(&self) -> Vec<EntryKey> {
        self.listing.ordered_keys(self.sort.key, self.sort.direction, "")
    }
}

/// One open explorer, bound to a remote service and a clock.
pub struct ExplorerSession<A, C = SystemClock> {
    api: A,
    clock: C,
    state: RefCell<SessionState>,
    latest_request: Cell<u64>,
    on_request: RefCell<Option<Rc<dyn Fn()>>>,
}

impl<A: ExplorerApi> ExplorerSession<A, SystemClock> {
    pub fn new(api: A) -> Self {
        Self::with_clock(api, SystemClock)
    }
}

impl<A: ExplorerApi, C: Clock> ExplorerSession<A, C> {
    pub fn with_clock(api: A, clock: C) -> Self {
        Self {
            api,
            clock,
            state: RefCell::new(SessionState::new()),
            latest_request: Cell::new(0),
            on_request: RefCell::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run `f` each time a listing request is issued.
    ///
    /// Called after the loading flag is raised, so observers see
    /// `is_loading() == true`. Must not call back into the session.
    pub fn set_on_request(&self, f: impl Fn() + 'static) {
        *self.on_request.borrow_mut() = Some(Rc::new(f));
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Load the root listing and the volume statistics.
    pub async fn initialize(&self) -> Result<Transition, ExplorerError> {
        let transition = self.load(self.current_path(), HistoryUpdate::Keep).await?;
        if let Err(err) = self.load_system_info().await {
            warn!("system info unavailable: {}", err);
        }
        Ok(transition)
    }

    /// Fresh navigation to `path`; pushes history on success.
    ///
    /// Navigating to the displayed path is a no-op unless another listing
    /// is in flight, in which case it supersedes that request.
    pub async fn navigate(&self, path: VirtualPath) -> Result<Transition, ExplorerError> {
        let staged = {
            let state = self.state.borrow();
            if path == state.current_path && !state.loading {
                return Ok(Transition::Unchanged);
            }
            let mut staged = state.history.clone();
            staged.push(path.clone());
            staged
        };
        self.load(path, HistoryUpdate::Commit(staged)).await
    }

    pub async fn go_back(&self) -> Result<Transition, ExplorerError> {
        self.replay(NavigationHistory::back).await
    }

    pub async fn go_forward(&self) -> Result<Transition, ExplorerError> {
        self.replay(NavigationHistory::forward).await
    }

    /// Navigate to the parent of the current path.
    pub async fn go_up(&self) -> Result<Transition, ExplorerError> {
        let parent = NavigationHistory::up(&self.current_path());
        self.navigate(parent).await
    }

    /// Re-fetch the current directory and the volume statistics.
    ///
    /// History is untouched; the selection is cleared like on any reload.
    pub async fn refresh(&self) -> Result<Transition, ExplorerError> {
        let transition = self.load(self.current_path(), HistoryUpdate::Keep).await?;
        if let Err(err) = self.load_system_info().await {
            warn!("system info unavailable: {}", err);
        }
        Ok(transition)
    }

    /// Revisit a history entry without pushing it again.
    ///
    /// The cursor is moved on a copy of the pending history (or the live
    /// one when nothing is pending), and the copy only replaces the live
    /// one once the listing has loaded.
    async fn replay<F>(&self, step: F) -> Result<Transition, ExplorerError>
    where
        F: for<'h> FnOnce(&'h mut NavigationHistory) -> Result<&'h VirtualPath, ExplorerError>,
    {
        let mut staged = {
            let state = self.state.borrow();
            state.pending_history.as_ref().unwrap_or(&state.history).clone()
        };
        let path = match step(&mut staged) {
            Ok(path) => path.clone(),
            Err(ExplorerError::AtBoundary) => return Ok(Transition::Unchanged),
            Err(err) => return Err(err),
        };
        self.load(path, HistoryUpdate::Commit(staged)).await
    }

    fn issue_ticket(&self, update: &HistoryUpdate) -> u64 {
        let ticket = self.latest_request.get() + 1;
        self.latest_request.set(ticket);
        {
            let mut state = self.state.borrow_mut();
            state.loading = true;
            state.pending_history = match update {
                HistoryUpdate::Commit(history) => Some(history.clone()),
                HistoryUpdate::Keep => None,
            };
        }
        let observer = self.on_request.borrow().clone();
        if let Some(notify) = observer {
            notify();
        }
        ticket
    }

    /// Fetch `path` and, if still the latest request, swap it in.
    async fn load(
        &self,
        path: VirtualPath,
        update: HistoryUpdate,
    ) -> Result<Transition, ExplorerError> {
        let ticket = self.issue_ticket(&update);
        let result = self.api.listing(&path).await;

        if ticket != self.latest_request.get() {
            warn!(
                "discarding listing for {} (request {} superseded by {})",
                path,
                ticket,
                self.latest_request.get()
            );
            return Ok(Transition::Superseded);
        }

        match result {
            Ok(listing) => {
                if listing.current_path != path {
                    warn!(
                        "server reported {} for requested path {}",
                        listing.current_path, path
                    );
                }
                let mut state = self.state.borrow_mut();
                state.loading = false;
                state.pending_history = None;
                state.listing.set_entries(listing.entries, path.clone());
                state.selection.clear();
                if let HistoryUpdate::Commit(history) = update {
                    state.history = history;
                }
                state.current_path = path;
                Ok(Transition::Applied)
            }
            Err(err) => {
                error!("failed to load {}: {}", path, err);
                {
                    let mut state = self.state.borrow_mut();
                    state.loading = false;
                    state.pending_history = None;
                }
                self.set_status(
                    format!("Failed to load {}: {}", path, err),
                    StatusLevel::Error,
                );
                Err(err.into())
            }
        }
    }

    pub async fn load_system_info(&self) -> Result<SystemInfo, ExplorerError> {
        let info = self.api.system_info().await?;
        self.state.borrow_mut().system_info = Some(info);
        Ok(info)
    }

    // =========================================================================
    // View State
    // =========================================================================

    pub fn change_sort(&self, key: SortKey) {
        self.state.borrow_mut().sort.key = key;
    }

    pub fn toggle_sort_direction(&self) {
        let mut state = self.state.borrow_mut();
        state.sort.direction = state.sort.direction.toggled();
    }

    pub fn set_filter(&self, query: impl Into<String>) {
        self.state.borrow_mut().filter = query.into();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn select_only(&self, key: EntryKey) {
        self.state.borrow_mut().selection.select_only(key);
    }

    pub fn toggle_selection(&self, key: EntryKey) {
        self.state.borrow_mut().selection.toggle(key);
    }

    /// Extend from the anchor to `key` over the rendered order.
    pub fn select_range(&self, key: &EntryKey) {
        let mut state = self.state.borrow_mut();
        let ordered = state.ordered_keys();
        state.selection.select_range(key, &ordered);
    }

    pub fn select_all(&self) {
        let mut state = self.state.borrow_mut();
        let ordered = state.ordered_keys();
        state.selection.select_all(&ordered);
    }

    pub fn clear_selection(&self) {
        self.state.borrow_mut().selection.clear();
    }

    /// Handle a click on a file row.
    ///
    /// Toggle modifier toggles; range modifier extends an existing
    /// selection. A plain click opens: directories are navigated into,
    /// files are selected alone and loaded into the preview.
    pub async fn click_entry(
        &self,
        key: EntryKey,
        modifiers: ClickModifiers,
    ) -> Result<Transition, ExplorerError> {
        if modifiers.toggle {
            self.toggle_selection(key);
            return Ok(Transition::Applied);
        }
        if modifiers.range && self.selection_count() > 0 {
            self.select_range(&key);
            return Ok(Transition::Applied);
        }

        let entry = {
            let state = self.state.borrow();
            if &key.parent != state.listing.path() {
                return Ok(Transition::Unchanged);
            }
            state.listing.get(&key.name).cloned()
        };
        match entry {
            Some(entry) if entry.is_dir() => self.navigate(key.path()).await,
            Some(_) => {
                self.select_only(key.clone());
                self.open_file(key.path()).await?;
                Ok(Transition::Applied)
            }
            None => Ok(Transition::Unchanged),
        }
    }

    // =========================================================================
    // File Operations
    // =========================================================================

    /// Fetch a file into the preview editor.
    pub async fn open_file(&self, path: VirtualPath) -> Result<(), ExplorerError> {
        match self.api.file_content(&path).await {
            Ok(content) => {
                self.state.borrow_mut().open_file = Some(OpenFile { path, content });
                Ok(())
            }
            Err(err) => Err(self.remote_failure("Failed to open file", err)),
        }
    }

    /// Write `content` back to the file open in the preview.
    pub async fn save_open_file(&self, content: impl Into<String>) -> Result<(), ExplorerError> {
        let path = self
            .state
            .borrow()
            .open_file
            .as_ref()
            .map(|f| f.path.clone())
            .ok_or(ExplorerError::NoOpenFile)?;
        let content = content.into();

        match self.api.save_file(&path, &content).await {
            Ok(()) => {
                let mut state = self.state.borrow_mut();
                if let Some(open) = state.open_file.as_mut()
                    && open.path == path
                {
                    open.content = content;
                }
                drop(state);
                self.set_status("File saved successfully", StatusLevel::Success);
                Ok(())
            }
            Err(err) => Err(self.remote_failure("Failed to save file", err)),
        }
    }

    pub fn close_file(&self) {
        self.state.borrow_mut().open_file = None;
    }

    /// Direct link for the browser to download `key`.
    pub fn download_url(&self, key: &EntryKey) -> String {
        self.api.download_url(&key.path())
    }

    pub async fn create_file(&self, name: &str) -> Result<(), ExplorerError> {
        let path = self.child_path(name)?;
        self.mutate(
            verbs::CREATE,
            path,
            "File created successfully",
            "Failed to create file",
        )
        .await
    }

    pub async fn create_folder(&self, name: &str) -> Result<(), ExplorerError> {
        let path = self.child_path(name)?;
        self.mutate(
            verbs::MKDIR,
            path,
            "Folder created successfully",
            "Failed to create folder",
        )
        .await
    }

    /// Store `content` as `name` inside the current directory.
    pub async fn upload_file(&self, name: &str, content: &str) -> Result<(), ExplorerError> {
        let path = self.child_path(name)?;
        self.set_status(format!("Uploading {}...", name.trim()), StatusLevel::Info);

        if let Err(err) = self.api.save_file(&path, content).await {
            let context = format!("Failed to upload {}", name.trim());
            return Err(self.remote_failure(&context, err));
        }
        self.reload_after_mutation().await;
        self.set_status(
            format!("Uploaded {} successfully", name.trim()),
            StatusLevel::Success,
        );
        Ok(())
    }

    pub async fn delete_entry(&self, key: &EntryKey) -> Result<(), ExplorerError> {
        self.mutate(
            verbs::DELETE,
            key.path(),
            "File deleted successfully",
            "Failed to delete file",
        )
        .await
    }

    /// Delete every selected entry, one request at a time.
    ///
    /// Stops at the first failure; entries already deleted stay deleted and
    /// the listing is reloaded so the partial result is visible.
    pub async fn delete_selected(&self) -> Result<BatchOutcome, ExplorerError> {
        let targets: Vec<VirtualPath> = {
            let state = self.state.borrow();
            state
                .selection
                .in_order(&state.all_keys())
                .iter()
                .map(EntryKey::path)
                .collect()
        };
        if targets.is_empty() {
            return Err(ExplorerError::NothingSelected);
        }

        let mut outcome = BatchOutcome::default();
        for path in targets {
            let args = [path.to_string()];
            match self.api.command(verbs::DELETE, &args).await {
                Ok(reply) if reply.success => outcome.deleted.push(path),
                Ok(reply) => {
                    outcome.failed = Some((path, reply.message));
                    break;
                }
                Err(err) => {
                    outcome.failed = Some((path, err.to_string()));
                    break;
                }
            }
        }

        log!(
            "batch delete: {} deleted, failed: {:?}",
            outcome.deleted.len(),
            outcome.failed
        );
        if !outcome.deleted.is_empty() {
            self.reload_after_mutation().await;
        }
        if outcome.is_complete() {
            self.set_status(
                format!("{} item(s) deleted successfully", outcome.deleted.len()),
                StatusLevel::Success,
            );
        } else {
            self.set_status("Failed to delete some items", StatusLevel::Error);
        }
        Ok(outcome)
    }

    fn child_path(&self, name: &str) -> Result<VirtualPath, ExplorerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ExplorerError::EmptyInput);
        }
        Ok(self.current_path().join(name))
    }

    /// Run a single-path command verb, then reload on success.
    async fn mutate(
        &self,
        verb: &str,
        path: VirtualPath,
        success_text: &str,
        failure_text: &str,
    ) -> Result<(), ExplorerError> {
        let args = [path.to_string()];
        let reply = match self.api.command(verb, &args).await {
            Ok(reply) => reply,
            Err(err) => return Err(self.remote_failure(failure_text, err)),
        };
        if !reply.success {
            return Err(self.remote_failure(failure_text, FetchError::Server(reply.message)));
        }
        self.reload_after_mutation().await;
        self.set_status(success_text, StatusLevel::Success);
        Ok(())
    }

    async fn reload_after_mutation(&self) {
        if let Err(err) = self.load(self.current_path(), HistoryUpdate::Keep).await {
            warn!("reload after mutation failed: {}", err);
        }
    }

    // =========================================================================
    // Command Console
    // =========================================================================

    /// Record, echo, and dispatch one console line.
    ///
    /// After a successful `cd` the session navigates to the resolved path;
    /// after `ls` or `pwd` it refreshes. Other verbs leave navigation alone.
    pub async fn execute_command(&self, line: &str) -> Result<CommandReply, ExplorerError> {
        let line = line.trim();
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Err(ExplorerError::EmptyInput);
        };
        let args: Vec<String> = parts.map(str::to_string).collect();

        {
            let now = self.clock.now_ms();
            let mut state = self.state.borrow_mut();
            state.console.record(line);
            state.console.append_output(line, ConsoleKind::Command, now);
        }

        let reply = match self.api.command(verb, &args).await {
            Ok(reply) => reply,
            Err(err) => {
                error!("command '{}' failed: {}", verb, err);
                self.append_console(COMMAND_FAILED_TEXT, ConsoleKind::Error);
                return Err(err.into());
            }
        };

        if !reply.success {
            self.append_console(&reply.message, ConsoleKind::Error);
            return Ok(reply);
        }
        self.append_console(&reply.message, ConsoleKind::Output);

        // Listing failures are already reported through the status line.
        let follow_up = match verb {
            verbs::CD => {
                let target = self.current_path().resolve(&args.join(" "));
                self.navigate(target).await
            }
            verbs::LS | verbs::PWD => self.refresh().await,
            _ => Ok(Transition::Unchanged),
        };
        if let Err(err) = follow_up {
            warn!("listing update after '{}' failed: {}", verb, err);
        }
        Ok(reply)
    }

    /// Step through command history (`-1` older, `+1` newer).
    pub fn recall_command(&self, direction: i32) -> String {
        self.state.borrow_mut().console.recall(direction)
    }

    fn append_console(&self, text: &str, kind: ConsoleKind) {
        let now = self.clock.now_ms();
        self.state
            .borrow_mut()
            .console
            .append_output(text, kind, now);
    }

    // =========================================================================
    // Status
    // =========================================================================

    fn set_status(&self, text: impl Into<String>, level: StatusLevel) {
        let at = self.clock.now_ms();
        self.state.borrow_mut().status = Some(StatusMessage {
            text: text.into(),
            level,
            at,
        });
    }

    /// Log a failed remote call, surface it, and convert it.
    fn remote_failure(&self, context: &str, err: FetchError) -> ExplorerError {
        error!("{}: {}", context, err);
        self.set_status(format!("{}: {}", context, err), StatusLevel::Error);
        err.into()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn current_path(&self) -> VirtualPath {
        self.state.borrow().current_path.clone()
    }

    /// Sorted and filtered entries of the current listing.
    pub fn view(&self) -> Vec<Entry> {
        let state = self.state.borrow();
        state
            .listing
            .view(state.sort.key, state.sort.direction, &state.filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Keys of [`view`](Self::view), in rendered order.
    pub fn ordered_keys(&self) -> Vec<EntryKey> {
        self.state.borrow().ordered_keys()
    }

    /// Selected keys in sort order, including any the filter hides.
    ///
    /// Same basis as [`selection_count`](Self::selection_count) and the
    /// batch delete.
    pub fn selected(&self) -> Vec<EntryKey> {
        let state = self.state.borrow();
        state.selection.in_order(&state.all_keys())
    }

    pub fn is_selected(&self, key: &EntryKey) -> bool {
        self.state.borrow().selection.is_selected(key)
    }

    pub fn selection_count(&self) -> usize {
        self.state.borrow().selection.count()
    }

    pub fn selection_summary(&self) -> String {
        format_selection_count(self.selection_count())
    }

    pub fn can_go_back(&self) -> bool {
        self.state.borrow().history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.state.borrow().history.can_go_forward()
    }

    pub fn can_go_up(&self) -> bool {
        !self.state.borrow().current_path.is_root()
    }

    pub fn history(&self) -> NavigationHistory {
        self.state.borrow().history.clone()
    }

    pub fn transcript(&self) -> Vec<ConsoleLine> {
        self.state.borrow().console.transcript().to_vec()
    }

    pub fn command_history(&self) -> Vec<String> {
        self.state.borrow().console.history()
    }

    pub fn sort(&self) -> SortOptions {
        self.state.borrow().sort
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.state.borrow().sort.direction
    }

    pub fn filter(&self) -> String {
        self.state.borrow().filter.clone()
    }

    pub fn status(&self) -> Option<StatusMessage> {
        self.state.borrow().status.clone()
    }

    pub fn system_info(&self) -> Option<SystemInfo> {
        self.state.borrow().system_info
    }

    pub fn open_file_state(&self) -> Option<OpenFile> {
        self.state.borrow().open_file.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.state.borrow().current_path.breadcrumbs()
    }

    /// Console prompt, e.g. `FileXplore:/docs$ `.
    pub fn prompt(&self) -> String {
        format!("{}:{}$ ", APP_NAME, self.state.borrow().current_path)
    }
}
