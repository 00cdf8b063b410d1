//! Plugin lifecycle and per-editor session management for Quill.
//!
//! One plugin instance is registered statically with a [`PluginHost`] and
//! serves every editor the host attaches. Plugins keep per-editor state in a
//! [`Session`] managed by their [`SessionManager`]; each session is bound to
//! a [`SessionScope`] whose cancellation token is a child of the editor's, so
//! background work spawned for an editor stops when the editor is destroyed
//! or its session released.
//!
//! # Architecture
//!
//! - [`editor`] issues unique [`EditorId`]s and carries each editor's
//!   [`SchedulingContext`].
//! - [`session`] defines the session contract and the concurrent
//!   [`SessionManager`] guaranteeing one session per editor.
//! - [`plugin`] defines the [`Plugin`] contract.
//! - [`event`] carries host input and language queries to plugins.
//! - [`host`] registers plugins and fans out editor lifecycle and events.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use quill_config::Config;
//! use quill_plugins::{
//!     EventRegistrar, NoDataSession, Plugin, PluginConfig, PluginError, PluginHost,
//!     SessionManager,
//! };
//!
//! struct Autosave {
//!     sessions: SessionManager<NoDataSession>,
//! }
//!
//! impl Plugin for Autosave {
//!     type Session = NoDataSession;
//!
//!     fn name(&self) -> &str {
//!         "autosave"
//!     }
//!
//!     fn sessions(&self) -> &SessionManager<NoDataSession> {
//!         &self.sessions
//!     }
//!
//!     fn on_load(&self, _registrar: &mut EventRegistrar) -> Result<(), PluginError> {
//!         Ok(())
//!     }
//!
//!     fn config(&self) -> PluginConfig {
//!         PluginConfig::new()
//!     }
//! }
//!
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .build()
//!     .expect("runtime");
//! let autosave = Arc::new(Autosave {
//!     sessions: SessionManager::new("autosave", || NoDataSession),
//! });
//!
//! let mut host = PluginHost::new(Config::default());
//! host.register(Arc::clone(&autosave)).expect("registration succeeds");
//!
//! let editor = host.attach_editor(runtime.handle().clone());
//! let session = autosave.get_or_open_session(&editor);
//! host.destroy_editor(&editor);
//! assert!(session.is_released());
//! ```

pub mod editor;
pub mod error;
pub mod event;
pub mod host;
pub mod plugin;
pub mod session;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use self::editor::{EditorHandle, EditorId, SchedulingContext};
pub use self::error::PluginError;
pub use self::event::{
    Event, EventKind, EventOutcome, KeyAction, KeyEvent, KeyInput, LanguageDescription,
    LanguageRequirement, LanguageSearchEvent, Modifiers, PluginEvent, TouchAction, TouchEvent,
    TouchInput,
};
pub use self::host::PluginHost;
pub use self::plugin::{ConfigItem, EventRegistrar, Plugin, PluginConfig};
pub use self::session::{NoDataSession, OpenSession, Session, SessionManager, SessionRef, SessionScope};
