//! Domain errors raised by plugin registration and lookup.
//!
//! Errors are `thiserror`-derived enums carrying structured context so hosts
//! can inspect failures programmatically. Session lookup and release never
//! fail; the variants here cover the host-facing registration surface.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error reported by a plugin's load hook.
pub type LoadSource = Box<dyn StdError + Send + Sync + 'static>;

/// Errors arising from plugin operations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A plugin with the same name is already registered with the host.
    #[error("plugin '{name}' is already registered")]
    Duplicate {
        /// Name of the rejected plugin.
        name: String,
    },

    /// The host configuration disables the plugin.
    #[error("plugin '{name}' is disabled by configuration")]
    Disabled {
        /// Name of the rejected plugin.
        name: String,
    },

    /// The requested plugin is not registered with the host.
    #[error("plugin '{name}' not found in host")]
    NotFound {
        /// Name that was looked up.
        name: String,
    },

    /// The plugin's load hook failed; the plugin was not registered.
    #[error("plugin '{name}' failed to load: {message}")]
    LoadFailed {
        /// Plugin name.
        name: String,
        /// Human-readable failure description.
        message: String,
        /// Optional underlying error.
        #[source]
        source: Option<LoadSource>,
    },
}

impl PluginError {
    /// Builds a [`PluginError::LoadFailed`] without an underlying cause.
    #[must_use]
    pub fn load_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LoadFailed {
            name: name.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Builds a [`PluginError::LoadFailed`] wrapping the underlying cause.
    #[must_use]
    pub fn load_failed_with(
        name: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::LoadFailed {
            name: name.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Name of the plugin the error refers to.
    #[must_use]
    pub fn plugin_name(&self) -> &str {
        match self {
            Self::Duplicate { name }
            | Self::Disabled { name }
            | Self::NotFound { name }
            | Self::LoadFailed { name, .. } => name,
        }
    }
}
