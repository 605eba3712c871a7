//! Root application module.
//!
//! Binds an [`ExplorerSession`] to the Leptos reactive graph. The session
//! owns all explorer state; components read it through [`ExplorerContext`]
//! and every transition bumps a revision signal so dependent views rerun.

use std::future::Future;
use std::rc::Rc;

use leptos::logging::warn;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::core::{ExplorerError, ExplorerSession, HttpExplorerApi};
use crate::models::{ClickModifiers, EntryKey, SortKey, VirtualPath};

/// Session type used by the browser build.
pub type BrowserSession = ExplorerSession<HttpExplorerApi>;

// ============================================================================
// ExplorerContext
// ============================================================================

/// Application-wide reactive handle to the explorer session.
///
/// This struct is `Copy`: both fields are arena handles, so it can be moved
/// into any number of event closures.
#[derive(Clone, Copy)]
pub struct ExplorerContext {
    session: StoredValue<Rc<BrowserSession>, LocalStorage>,
    /// Bumped after every transition.
    revision: RwSignal<u64>,
}

impl ExplorerContext {
    pub fn new(api: HttpExplorerApi) -> Self {
        let revision = RwSignal::new(0);
        let session = ExplorerSession::new(api);
        // Readers rerun as soon as a listing request raises the loading flag.
        session.set_on_request(move || {
            revision.try_update(|r| *r += 1);
        });
        Self {
            session: StoredValue::new_local(Rc::new(session)),
            revision,
        }
    }

    /// Read session state, subscribing the caller to future transitions.
    ///
    /// ```ignore
    /// let path = move || ctx.read(|s| s.current_path().to_string());
    /// ```
    pub fn read<R>(&self, f: impl FnOnce(&BrowserSession) -> R) -> R {
        self.revision.track();
        f(&self.session.get_value())
    }

    /// Apply a synchronous transition and notify readers.
    pub fn apply<R>(&self, f: impl FnOnce(&BrowserSession) -> R) -> R {
        let result = f(&self.session.get_value());
        self.bump();
        result
    }

    /// Run an asynchronous transition on the local executor.
    ///
    /// Readers are notified when it settles. Listing requests also notify
    /// when issued, through the session's request observer.
    pub fn dispatch<F, Fut, T>(&self, label: &'static str, f: F)
    where
        F: FnOnce(Rc<BrowserSession>) -> Fut + 'static,
        Fut: Future<Output = Result<T, ExplorerError>> + 'static,
    {
        let ctx = *self;
        let session = self.session.get_value();
        spawn_local(async move {
            if let Err(err) = f(session).await {
                warn!("{} failed: {}", label, err);
            }
            ctx.bump();
        });
    }

    fn bump(&self) {
        self.revision.try_update(|r| *r += 1);
    }

    // ------------------------------------------------------------------------
    // Event handlers
    // ------------------------------------------------------------------------

    pub fn initialize(&self) {
        self.dispatch("initialize", |s| async move { s.initialize().await });
    }

    pub fn navigate(&self, path: VirtualPath) {
        self.dispatch("navigate", |s| async move { s.navigate(path).await });
    }

    pub fn go_back(&self) {
        self.dispatch("back", |s| async move { s.go_back().await });
    }

    pub fn go_forward(&self) {
        self.dispatch("forward", |s| async move { s.go_forward().await });
    }

    pub fn go_up(&self) {
        self.dispatch("up", |s| async move { s.go_up().await });
    }

    pub fn refresh(&self) {
        self.dispatch("refresh", |s| async move { s.refresh().await });
    }

    pub fn click_entry(&self, key: EntryKey, modifiers: ClickModifiers) {
        self.dispatch("click", move |s| async move {
            s.click_entry(key, modifiers).await
        });
    }

    pub fn execute_command(&self, line: String) {
        self.dispatch("command", |s| async move {
            s.execute_command(&line).await
        });
    }

    pub fn save_open_file(&self, content: String) {
        self.dispatch("save", |s| async move { s.save_open_file(content).await });
    }

    pub fn create_file(&self, name: String) {
        self.dispatch("create file", |s| async move {
            s.create_file(&name).await
        });
    }

    pub fn create_folder(&self, name: String) {
        self.dispatch("create folder", |s| async move {
            s.create_folder(&name).await
        });
    }

    pub fn upload_file(&self, name: String, content: String) {
        self.dispatch("upload", |s| async move {
            s.upload_file(&name, &content).await
        });
    }

    pub fn delete_selected(&self) {
        self.dispatch("delete", |s| async move { s.delete_selected().await });
    }

    pub fn change_sort(&self, key: SortKey) {
        self.apply(|s| s.change_sort(key));
    }

    pub fn set_filter(&self, query: String) {
        self.apply(|s| s.set_filter(query));
    }

    pub fn recall_command(&self, direction: i32) -> String {
        self.apply(|s| s.recall_command(direction))
    }
}

/// Create the explorer context, provide it, and load the root listing.
///
/// `base_url` is the server origin; pass `""` for same-origin requests.
pub fn provide_explorer_context(base_url: &str) -> ExplorerContext {
    let ctx = ExplorerContext::new(HttpExplorerApi::new(base_url));
    provide_context(ctx);
    ctx.initialize();
    ctx
}

pub fn use_explorer() -> Option<ExplorerContext> {
    use_context::<ExplorerContext>()
}
