//! Events delivered by the host to plugins.
//!
//! Each event pairs a raw host input or query with the [`EditorHandle`] it
//! originated from. Events are passive values; plugins receive them through
//! [`Plugin::handle_event`](crate::Plugin::handle_event) for the kinds they
//! subscribed to while loading.

use crate::editor::EditorHandle;

mod input;
mod language;

pub use input::{KeyAction, KeyInput, Modifiers, TouchAction, TouchInput};
pub use language::{LanguageDescription, LanguageRequirement};

/// Common view over every event type.
pub trait Event {
    /// Editor the event originated from.
    fn editor(&self) -> &EditorHandle;
}

/// Discriminant used for subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// Key input.
    Key,
    /// Touch input.
    Touch,
    /// Language capability query.
    LanguageSearch,
}

/// Whether a plugin consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventOutcome {
    /// The plugin consumed the event; later plugins do not see it.
    Handled,
    /// The plugin let the event pass.
    #[default]
    Ignored,
}

/// Key input received by an editor.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    input: KeyInput,
    editor: EditorHandle,
}

impl KeyEvent {
    /// Pairs key input with its editor.
    #[must_use]
    pub const fn new(input: KeyInput, editor: EditorHandle) -> Self {
        Self { input, editor }
    }

    /// The raw key input.
    #[must_use]
    pub const fn input(&self) -> &KeyInput {
        &self.input
    }
}

impl Event for KeyEvent {
    fn editor(&self) -> &EditorHandle {
        &self.editor
    }
}

/// Touch input received by an editor.
#[derive(Debug, Clone)]
pub struct TouchEvent {
    input: TouchInput,
    editor: EditorHandle,
}

impl TouchEvent {
    /// Pairs touch input with its editor.
    #[must_use]
    pub const fn new(input: TouchInput, editor: EditorHandle) -> Self {
        Self { input, editor }
    }

    /// The raw touch input.
    #[must_use]
    pub const fn input(&self) -> &TouchInput {
        &self.input
    }
}

impl Event for TouchEvent {
    fn editor(&self) -> &EditorHandle {
        &self.editor
    }
}

/// Query for a plugin able to provide language support for an editor.
#[derive(Debug, Clone)]
pub struct LanguageSearchEvent {
    requirement: LanguageRequirement,
    editor: EditorHandle,
}

impl LanguageSearchEvent {
    /// Pairs a language requirement with its editor.
    #[must_use]
    pub const fn new(requirement: LanguageRequirement, editor: EditorHandle) -> Self {
        Self {
            requirement,
            editor,
        }
    }

    /// The requested language traits.
    #[must_use]
    pub const fn requirement(&self) -> &LanguageRequirement {
        &self.requirement
    }
}

impl Event for LanguageSearchEvent {
    fn editor(&self) -> &EditorHandle {
        &self.editor
    }
}

/// Any event the host dispatches to plugins.
#[derive(Debug, Clone)]
pub enum PluginEvent {
    /// Key input.
    Key(KeyEvent),
    /// Touch input.
    Touch(TouchEvent),
    /// Language capability query.
    LanguageSearch(LanguageSearchEvent),
}

impl PluginEvent {
    /// Subscription kind of the event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Key(_) => EventKind::Key,
            Self::Touch(_) => EventKind::Touch,
            Self::LanguageSearch(_) => EventKind::LanguageSearch,
        }
    }
}

impl Event for PluginEvent {
    fn editor(&self) -> &EditorHandle {
        match self {
            Self::Key(event) => event.editor(),
            Self::Touch(event) => event.editor(),
            Self::LanguageSearch(event) => event.editor(),
        }
    }
}

impl From<KeyEvent> for PluginEvent {
    fn from(event: KeyEvent) -> Self {
        Self::Key(event)
    }
}

impl From<TouchEvent> for PluginEvent {
    fn from(event: TouchEvent) -> Self {
        Self::Touch(event)
    }
}

impl From<LanguageSearchEvent> for PluginEvent {
    fn from(event: LanguageSearchEvent) -> Self {
        Self::LanguageSearch(event)
    }
}
