//! The plugin contract implemented by editor extensions.
//!
//! Plugins are registered once with a [`PluginHost`](crate::host::PluginHost)
//! and serve every editor the host attaches. Per-editor state lives in the
//! plugin's [`SessionManager`]; the host tells the plugin when an editor is
//! destroyed so the matching session is released.

use std::collections::BTreeSet;

use crate::editor::{EditorHandle, EditorId};
use crate::error::PluginError;
use crate::event::{EventKind, EventOutcome, PluginEvent};
use crate::session::{Session, SessionManager, SessionRef};

mod config;

pub use config::{ConfigItem, PluginConfig};

/// An editor extension serving many editors from one instance.
///
/// Implementors own exactly one [`SessionManager`] and expose it through
/// [`Plugin::sessions`]; use [`NoDataSession`](crate::NoDataSession) when no
/// per-editor state is needed.
///
/// # Example
///
/// ```
/// use quill_plugins::{
///     Event, EventKind, EventOutcome, EventRegistrar, NoDataSession, Plugin, PluginConfig,
///     PluginError, PluginEvent, SessionManager,
/// };
///
/// struct KeyLogger {
///     sessions: SessionManager<NoDataSession>,
/// }
///
/// impl Plugin for KeyLogger {
///     type Session = NoDataSession;
///
///     fn name(&self) -> &str {
///         "key-logger"
///     }
///
///     fn sessions(&self) -> &SessionManager<NoDataSession> {
///         &self.sessions
///     }
///
///     fn on_load(&self, registrar: &mut EventRegistrar) -> Result<(), PluginError> {
///         registrar.subscribe(EventKind::Key);
///         Ok(())
///     }
///
///     fn config(&self) -> PluginConfig {
///         PluginConfig::new()
///     }
///
///     fn handle_event(&self, event: &PluginEvent) -> EventOutcome {
///         let _ = self.get_or_open_session(event.editor());
///         EventOutcome::Ignored
///     }
/// }
/// ```
pub trait Plugin: Send + Sync + 'static {
    /// Per-editor state kept by the plugin.
    type Session: Session;

    /// Stable name identifying the plugin to the host.
    fn name(&self) -> &str;

    /// The plugin's session registry.
    fn sessions(&self) -> &SessionManager<Self::Session>;

    /// Called once at registration, before any editor-specific call.
    ///
    /// Subscribe to event kinds and initialise plugin-wide state here.
    ///
    /// # Errors
    ///
    /// Returning an error aborts registration; the host reports it as
    /// [`PluginError::LoadFailed`].
    fn on_load(&self, registrar: &mut EventRegistrar) -> Result<(), PluginError>;

    /// Configuration items the plugin exposes.
    fn config(&self) -> PluginConfig;

    /// Handles an event of a kind subscribed in [`Plugin::on_load`].
    fn handle_event(&self, event: &PluginEvent) -> EventOutcome {
        let _ = event;
        EventOutcome::Ignored
    }

    /// Returns the editor's session, opening it on first use.
    ///
    /// Overrides may add setup but must keep one session per editor.
    fn get_or_open_session(&self, editor: &EditorHandle) -> SessionRef<Self::Session> {
        self.sessions()
            .get_or_open_session(editor.id(), editor.scheduling())
    }
}

/// Releases the plugin's session for a destroyed editor.
pub(crate) fn on_editor_destroy<P: Plugin + ?Sized>(plugin: &P, editor: EditorId) -> bool {
    plugin.sessions().release_session(editor)
}

/// Collects the event kinds a plugin subscribes to while loading.
#[derive(Debug, Default)]
pub struct EventRegistrar {
    kinds: BTreeSet<EventKind>,
}

impl EventRegistrar {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Subscribes to events of `kind`.
    pub fn subscribe(&mut self, kind: EventKind) -> &mut Self {
        self.kinds.insert(kind);
        self
    }

    /// Returns `true` when `kind` has been subscribed.
    #[must_use]
    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub(crate) fn into_kinds(self) -> BTreeSet<EventKind> {
        self.kinds
    }
}
