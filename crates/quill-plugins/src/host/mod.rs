//! Host-side plugin manager.
//!
//! The [`PluginHost`] is what the editor widget talks to. It registers
//! plugins once, hands out [`EditorHandle`]s for new editors, fans editor
//! destruction out to every plugin exactly once, and routes input events to
//! the plugins that subscribed to them.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;
use quill_config::Config;
use tokio::runtime::Handle;
use tracing::{debug, info, trace, warn};

use crate::editor::{EditorHandle, EditorId};
use crate::error::PluginError;
use crate::event::{Event, EventKind, EventOutcome, PluginEvent};
use crate::plugin::{EventRegistrar, Plugin, PluginConfig, on_editor_destroy};

/// Log target for host operations.
pub(crate) const HOST_TARGET: &str = "quill_plugins::host";

/// Object-safe view of a registered plugin.
trait LoadedPlugin: Send + Sync {
    fn plugin_name(&self) -> &str;
    fn load(&self, registrar: &mut EventRegistrar) -> Result<(), PluginError>;
    fn editor_destroyed(&self, editor: EditorId) -> bool;
    fn offer_event(&self, event: &PluginEvent) -> EventOutcome;
    fn advertised_config(&self) -> PluginConfig;
    fn release_sessions(&self) -> usize;
}

impl<P: Plugin> LoadedPlugin for P {
    fn plugin_name(&self) -> &str {
        self.name()
    }

    fn load(&self, registrar: &mut EventRegistrar) -> Result<(), PluginError> {
        self.on_load(registrar)
    }

    fn editor_destroyed(&self, editor: EditorId) -> bool {
        on_editor_destroy(self, editor)
    }

    fn offer_event(&self, event: &PluginEvent) -> EventOutcome {
        self.handle_event(event)
    }

    fn advertised_config(&self) -> PluginConfig {
        self.config()
    }

    fn release_sessions(&self) -> usize {
        self.sessions().release_all()
    }
}

struct Registration {
    plugin: Arc<dyn LoadedPlugin>,
    subscriptions: BTreeSet<EventKind>,
}

/// Registers plugins and drives their editor lifecycle.
pub struct PluginHost {
    config: Config,
    plugins: Vec<Registration>,
    editors: RwLock<HashMap<EditorId, EditorHandle>>,
}

impl PluginHost {
    /// Creates a host with no plugins and no editors.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            plugins: Vec::new(),
            editors: RwLock::new(HashMap::new()),
        }
    }

    /// The configuration the host was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Registers a plugin and runs its load hook.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Disabled`] when configuration disables the
    /// plugin, [`PluginError::Duplicate`] when its name is already taken, and
    /// [`PluginError::LoadFailed`] when [`Plugin::on_load`] fails. The plugin
    /// is not registered in any of these cases.
    pub fn register<P: Plugin>(&mut self, plugin: Arc<P>) -> Result<(), PluginError> {
        let name = plugin.name().to_owned();
        if !self.config.is_plugin_enabled(&name) {
            return Err(PluginError::Disabled { name });
        }
        if self.find(&name).is_some() {
            return Err(PluginError::Duplicate { name });
        }

        let mut registrar = EventRegistrar::new();
        if let Err(error) = plugin.on_load(&mut registrar) {
            warn!(target: HOST_TARGET, plugin = %name, error = %error, "plugin failed to load");
            return Err(match error {
                PluginError::LoadFailed {
                    message, source, ..
                } => PluginError::LoadFailed {
                    name,
                    message,
                    source,
                },
                other => PluginError::load_failed_with(name, other),
            });
        }

        let subscriptions = registrar.into_kinds();
        info!(
            target: HOST_TARGET,
            plugin = %name,
            subscriptions = ?subscriptions,
            "plugin loaded"
        );
        self.plugins.push(Registration {
            plugin,
            subscriptions,
        });
        Ok(())
    }

    /// Names of registered plugins in registration order.
    #[must_use]
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins
            .iter()
            .map(|registration| registration.plugin.plugin_name())
            .collect()
    }

    /// Configuration items advertised by the named plugin.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::NotFound`] when no such plugin is registered.
    pub fn plugin_config(&self, name: &str) -> Result<PluginConfig, PluginError> {
        self.find(name)
            .map(|registration| registration.plugin.advertised_config())
            .ok_or_else(|| PluginError::NotFound {
                name: name.to_owned(),
            })
    }

    /// Configuration items of every registered plugin, keyed by name.
    #[must_use]
    pub fn plugin_configs(&self) -> Vec<(String, PluginConfig)> {
        self.plugins
            .iter()
            .map(|registration| {
                (
                    registration.plugin.plugin_name().to_owned(),
                    registration.plugin.advertised_config(),
                )
            })
            .collect()
    }

    /// Attaches a new editor whose work runs on `runtime`.
    #[must_use]
    pub fn attach_editor(&self, runtime: Handle) -> EditorHandle {
        let editor = EditorHandle::new(runtime);
        self.editors.write().insert(editor.id(), editor.clone());
        debug!(target: HOST_TARGET, editor = %editor.id(), "editor attached");
        editor
    }

    /// Returns `true` while the editor is attached.
    #[must_use]
    pub fn is_attached(&self, editor: EditorId) -> bool {
        self.editors.read().contains_key(&editor)
    }

    /// Number of attached editors.
    #[must_use]
    pub fn editor_count(&self) -> usize {
        self.editors.read().len()
    }

    /// Detaches an editor permanently.
    ///
    /// The editor's scheduling context is cancelled, then every plugin
    /// releases its session for the editor. Returns `false` when the editor
    /// was not attached, in which case no plugin is notified.
    pub fn destroy_editor(&self, editor: &EditorHandle) -> bool {
        let removed = self.editors.write().remove(&editor.id());
        let Some(attached) = removed else {
            trace!(target: HOST_TARGET, editor = %editor.id(), "editor already destroyed");
            return false;
        };

        self.notify_destroyed(&attached);
        debug!(target: HOST_TARGET, editor = %attached.id(), "editor destroyed");
        true
    }

    /// Offers an event to subscribed plugins in registration order.
    ///
    /// Delivery stops at the first plugin reporting
    /// [`EventOutcome::Handled`]. Events from detached editors are ignored.
    pub fn dispatch(&self, event: &PluginEvent) -> EventOutcome {
        let editor = event.editor().id();
        if !self.is_attached(editor) {
            trace!(target: HOST_TARGET, editor = %editor, "event from detached editor dropped");
            return EventOutcome::Ignored;
        }

        let kind = event.kind();
        let handler = self
            .plugins
            .iter()
            .filter(|registration| registration.subscriptions.contains(&kind))
            .find(|registration| registration.plugin.offer_event(event) == EventOutcome::Handled);

        match handler {
            Some(registration) => {
                trace!(
                    target: HOST_TARGET,
                    editor = %editor,
                    kind = ?kind,
                    plugin = registration.plugin.plugin_name(),
                    "event handled"
                );
                EventOutcome::Handled
            }
            None => EventOutcome::Ignored,
        }
    }

    /// Destroys every attached editor and releases any remaining sessions.
    ///
    /// Returns the number of sessions released.
    pub fn shutdown(&self) -> usize {
        let editors: Vec<_> = self.editors.write().drain().map(|(_, editor)| editor).collect();
        let mut released = 0;
        for editor in &editors {
            released += self.notify_destroyed(editor);
        }
        released += self
            .plugins
            .iter()
            .map(|registration| registration.plugin.release_sessions())
            .sum::<usize>();
        info!(
            target: HOST_TARGET,
            editors = editors.len(),
            sessions = released,
            "plugin host shut down"
        );
        released
    }

    fn notify_destroyed(&self, editor: &EditorHandle) -> usize {
        // Cancel first so lookups racing the notification never store a session.
        editor.scheduling().cancel();
        self.plugins
            .iter()
            .map(|registration| usize::from(registration.plugin.editor_destroyed(editor.id())))
            .sum()
    }

    fn find(&self, name: &str) -> Option<&Registration> {
        self.plugins
            .iter()
            .find(|registration| registration.plugin.plugin_name() == name)
    }
}
