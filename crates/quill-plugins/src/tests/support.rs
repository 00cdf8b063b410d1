//! Test doubles shared by host unit tests and behaviour scenarios.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::PluginError;
use crate::event::{EventKind, EventOutcome, PluginEvent};
use crate::plugin::{ConfigItem, EventRegistrar, Plugin, PluginConfig};
use crate::session::{Session, SessionManager};

/// Session counting how often it is released.
#[derive(Default)]
pub(crate) struct CountingSession {
    releases: AtomicUsize,
}

impl CountingSession {
    pub(crate) fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

impl Session for CountingSession {
    fn release(&self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// How a [`RecordingPlugin`] behaves when loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoadBehaviour {
    Succeed,
    FailWithLoadError,
    FailNamingAnotherPlugin,
    FailWithOtherError,
}

/// Plugin recording every call the host makes into it.
pub(crate) struct RecordingPlugin {
    name: String,
    subscriptions: Vec<EventKind>,
    outcome: EventOutcome,
    load_behaviour: LoadBehaviour,
    loads: AtomicUsize,
    events: AtomicUsize,
    sessions: SessionManager<CountingSession>,
}

impl RecordingPlugin {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            subscriptions: Vec::new(),
            outcome: EventOutcome::Ignored,
            load_behaviour: LoadBehaviour::Succeed,
            loads: AtomicUsize::new(0),
            events: AtomicUsize::new(0),
            sessions: SessionManager::new(name, CountingSession::default),
        }
    }

    pub(crate) fn subscribed_to(mut self, kind: EventKind) -> Self {
        self.subscriptions.push(kind);
        self
    }

    pub(crate) fn handling(mut self) -> Self {
        self.outcome = EventOutcome::Handled;
        self
    }

    pub(crate) fn loading(mut self, behaviour: LoadBehaviour) -> Self {
        self.load_behaviour = behaviour;
        self
    }

    pub(crate) fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub(crate) fn events(&self) -> usize {
        self.events.load(Ordering::SeqCst)
    }
}

impl Plugin for RecordingPlugin {
    type Session = CountingSession;

    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn sessions(&self) -> &SessionManager<CountingSession> {
        &self.sessions
    }

    fn on_load(&self, registrar: &mut EventRegistrar) -> Result<(), PluginError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match self.load_behaviour {
            LoadBehaviour::Succeed => {
                for kind in &self.subscriptions {
                    registrar.subscribe(*kind);
                }
                Ok(())
            }
            LoadBehaviour::FailWithLoadError => {
                Err(PluginError::load_failed(self.name.as_str(), "index unavailable"))
            }
            LoadBehaviour::FailNamingAnotherPlugin => {
                Err(PluginError::load_failed("dependency", "index unavailable"))
            }
            LoadBehaviour::FailWithOtherError => Err(PluginError::NotFound {
                name: "dependency".to_owned(),
            }),
        }
    }

    fn config(&self) -> PluginConfig {
        PluginConfig::new().with_item(ConfigItem::new(
            "enabled_by_default",
            "Whether the plugin starts enabled",
            serde_json::Value::Bool(true),
        ))
    }

    fn handle_event(&self, event: &PluginEvent) -> EventOutcome {
        let _ = event;
        self.events.fetch_add(1, Ordering::SeqCst);
        self.outcome
    }
}
