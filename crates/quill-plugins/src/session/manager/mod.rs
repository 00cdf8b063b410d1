//! Concurrent registry mapping editors to their sessions.
//!
//! The [`SessionManager`] guarantees at most one live session per editor.
//! Lookups take the shared lock first and only upgrade to the exclusive lock
//! on a miss, re-checking before construction so racing callers never build
//! two sessions for the same editor. Releases remove the entry under the
//! exclusive lock and run the session's teardown after the lock is dropped.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use super::{OpenSession, SESSION_TARGET, Session, SessionRef, SessionScope};
use crate::editor::{EditorId, SchedulingContext};

type SessionFactory<S> = Box<dyn Fn() -> S + Send + Sync>;

/// Registry of per-editor sessions owned by one plugin.
///
/// # Example
///
/// ```
/// use quill_plugins::{EditorHandle, NoDataSession, SessionManager};
///
/// let runtime = tokio::runtime::Builder::new_current_thread()
///     .build()
///     .expect("runtime");
/// let editor = EditorHandle::new(runtime.handle().clone());
///
/// let manager = SessionManager::new("bracket-matcher", || NoDataSession);
/// let first = manager.get_or_open_session(editor.id(), editor.scheduling());
/// let second = manager.get_or_open_session(editor.id(), editor.scheduling());
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
///
/// assert!(manager.release_session(editor.id()));
/// assert!(first.is_released());
/// ```
pub struct SessionManager<S> {
    owner: String,
    factory: SessionFactory<S>,
    sessions: RwLock<HashMap<EditorId, SessionRef<S>>>,
}

impl<S: Session> SessionManager<S> {
    /// Creates an empty manager for the plugin named `owner`.
    ///
    /// `factory` builds the session for an editor the first time that editor
    /// is looked up.
    pub fn new<F>(owner: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
    {
        Self {
            owner: owner.into(),
            factory: Box::new(factory),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Name of the owning plugin, used to name session scopes.
    #[must_use]
    pub fn owner(&self) -> &str {
        self.owner.as_str()
    }

    /// Returns the editor's session, opening it on first use.
    ///
    /// A new session is bound to a scope derived from `context` and named
    /// after the owning plugin. Concurrent callers for the same editor all
    /// receive the same instance and the factory runs once.
    ///
    /// When `context` is already cancelled the new session is released
    /// immediately and never stored, so lookups through a destroyed editor
    /// cannot leave entries behind.
    pub fn get_or_open_session(
        &self,
        session_id: EditorId,
        context: &SchedulingContext,
    ) -> SessionRef<S> {
        let existing = self.sessions.read().get(&session_id).cloned();
        if let Some(session) = existing {
            return session;
        }

        let mut sessions = self.sessions.write();
        if let Some(session) = sessions.get(&session_id) {
            // Another caller opened it between the two lock acquisitions.
            return Arc::clone(session);
        }

        let scope = SessionScope::derive(context, &self.owner);
        let session = Arc::new(OpenSession::bind((self.factory)(), scope));
        if context.is_cancelled() {
            // The editor is gone; nothing would ever release a stored entry.
            drop(sessions);
            session.release();
            trace!(
                target: SESSION_TARGET,
                plugin = %self.owner,
                editor = %session_id,
                "session for destroyed editor released unstored"
            );
            return session;
        }
        sessions.insert(session_id, Arc::clone(&session));
        debug!(
            target: SESSION_TARGET,
            plugin = %self.owner,
            editor = %session_id,
            scope = session.scope().name(),
            "session opened"
        );
        session
    }

    /// Removes and releases the editor's session.
    ///
    /// The session's scope is cancelled and [`Session::release`] runs after
    /// the registry lock has been dropped. Returns `false` when the editor
    /// has no session.
    pub fn release_session(&self, session_id: EditorId) -> bool {
        let removed = self.sessions.write().remove(&session_id);
        let Some(session) = removed else {
            trace!(
                target: SESSION_TARGET,
                plugin = %self.owner,
                editor = %session_id,
                "no session to release"
            );
            return false;
        };

        session.release();
        debug!(
            target: SESSION_TARGET,
            plugin = %self.owner,
            editor = %session_id,
            "session released"
        );
        true
    }

    /// Removes and releases every session, returning how many were released.
    pub fn release_all(&self) -> usize {
        let drained: Vec<_> = self.sessions.write().drain().collect();
        let count = drained.len();
        for (_, session) in drained {
            session.release();
        }
        if count > 0 {
            debug!(
                target: SESSION_TARGET,
                plugin = %self.owner,
                count,
                "released all sessions"
            );
        }
        count
    }

    /// Returns `true` when the editor currently has a session.
    #[must_use]
    pub fn contains(&self, session_id: EditorId) -> bool {
        self.sessions.read().contains_key(&session_id)
    }

    /// Returns the number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Returns `true` when no sessions are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl<S> fmt::Debug for SessionManager<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionManager")
            .field("owner", &self.owner)
            .field("sessions", &self.sessions.read().len())
            .finish_non_exhaustive()
    }
}
