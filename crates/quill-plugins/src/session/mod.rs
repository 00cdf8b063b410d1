//! Per-editor session state and its cancellable work scope.
//!
//! A [`Session`] holds whatever a plugin needs to remember about one editor.
//! The [`SessionManager`] constructs sessions lazily and binds each one to a
//! [`SessionScope`] derived from the editor's scheduling context, producing an
//! [`OpenSession`]. Plugins only ever see the bound form, so a session can
//! never be observed without its scope.
//!
//! Releasing a session cancels its scope before calling
//! [`Session::release`]; tasks spawned through the scope stop at their next
//! suspension point.

use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::editor::SchedulingContext;

mod manager;

pub use manager::SessionManager;

/// Log target for session operations.
pub(crate) const SESSION_TARGET: &str = "quill_plugins::session";

/// Shared reference to a bound session, as returned by lookups.
pub type SessionRef<S> = Arc<OpenSession<S>>;

/// State a plugin keeps for one editor.
///
/// # Example
///
/// ```
/// use std::sync::Mutex;
/// use quill_plugins::Session;
///
/// #[derive(Default)]
/// struct BracketCache {
///     pairs: Mutex<Vec<(usize, usize)>>,
/// }
///
/// impl Session for BracketCache {
///     fn release(&self) {
///         if let Ok(mut pairs) = self.pairs.lock() {
///             pairs.clear();
///         }
///     }
/// }
/// ```
pub trait Session: Send + Sync + 'static {
    /// Frees every resource the session holds, native handles included.
    ///
    /// The manager calls this at most once per session, after the session
    /// has been removed from its registry and its scope cancelled.
    fn release(&self);
}

/// Session for plugins that keep no per-editor state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoDataSession;

impl Session for NoDataSession {
    fn release(&self) {}
}

/// Cancellable work scope owned by one session.
///
/// The scope's token is a child of the editor's token: destroying the editor
/// or releasing the session cancels it.
#[derive(Debug, Clone)]
pub struct SessionScope {
    name: String,
    runtime: Handle,
    token: CancellationToken,
}

impl SessionScope {
    /// Derives a scope named `<context>/<owner>` from an editor context.
    pub(crate) fn derive(context: &SchedulingContext, owner: &str) -> Self {
        Self {
            name: format!("{}/{owner}", context.name()),
            runtime: context.runtime().clone(),
            token: context.token().child_token(),
        }
    }

    /// Human-readable scope name identifying the editor and owning plugin.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Token that fires when the scope is cancelled.
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns `true` once the scope has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancels the scope and every child scope.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Resolves once the scope is cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    /// Creates a nested scope cancelled together with this one.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        Self {
            name: format!("{}/{name}", self.name),
            runtime: self.runtime.clone(),
            token: self.token.child_token(),
        }
    }

    /// Spawns `fut` on the editor's runtime, bound to this scope.
    ///
    /// The task yields `Some(output)` when the future completes first and
    /// `None` when the scope is cancelled first.
    pub fn spawn<F>(&self, fut: F) -> JoinHandle<Option<F::Output>>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        trace!(target: SESSION_TARGET, scope = %self.name, "session.spawn");
        let token = self.token.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => None,
                output = fut => Some(output),
            }
        })
    }
}

/// A session bound to its work scope.
///
/// Dereferences to the plugin's session type.
#[derive(Debug)]
pub struct OpenSession<S> {
    scope: SessionScope,
    session: S,
    released: AtomicBool,
}

impl<S: Session> OpenSession<S> {
    pub(crate) const fn bind(session: S, scope: SessionScope) -> Self {
        Self {
            scope,
            session,
            released: AtomicBool::new(false),
        }
    }

    /// The session's cancellable work scope.
    #[must_use]
    pub const fn scope(&self) -> &SessionScope {
        &self.scope
    }

    /// The plugin's session state.
    #[must_use]
    pub const fn session(&self) -> &S {
        &self.session
    }

    /// Returns `true` once the session has been released.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }

    /// Cancels the scope and releases the session; later calls do nothing.
    ///
    /// Returns `true` when this call performed the release.
    pub(crate) fn release(&self) -> bool {
        if self.released.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.scope.cancel();
        self.session.release();
        true
    }
}

impl<S> Deref for OpenSession<S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}
