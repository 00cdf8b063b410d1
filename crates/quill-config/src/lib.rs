//! Shared configuration for Quill plugin hosts.
//!
//! Configuration is layered with [`ortho_config`]: built-in defaults, then
//! configuration files, then `QUILL_*` environment variables, then command
//! line flags. Hosts load a [`Config`] once at start-up and hand it to the
//! plugin host and the telemetry layer.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, default_log_filter, default_log_filter_string, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Host configuration resolved from every configuration layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "QUILL")]
pub struct Config {
    /// Filter expression applied to structured logs.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Output format for structured logs.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
    /// Plugins the host refuses to register.
    #[serde(default)]
    pub disabled_plugins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            disabled_plugins: Vec::new(),
        }
    }
}

impl Config {
    /// Filter expression applied to structured logs.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Output format for structured logs.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Names of plugins that must not be registered.
    #[must_use]
    pub fn disabled_plugins(&self) -> &[String] {
        &self.disabled_plugins
    }

    /// Returns `true` unless the plugin appears in the disabled list.
    ///
    /// Plugin names are compared case-insensitively.
    #[must_use]
    pub fn is_plugin_enabled(&self, name: &str) -> bool {
        !self
            .disabled_plugins
            .iter()
            .any(|disabled| disabled.eq_ignore_ascii_case(name))
    }

    /// Returns a copy of the configuration with `name` added to the disabled
    /// list.
    #[must_use]
    pub fn with_disabled_plugin(mut self, name: impl Into<String>) -> Self {
        self.disabled_plugins.push(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn default_config_uses_builtin_values() {
        let config = Config::default();
        assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.disabled_plugins().is_empty());
    }

    #[rstest]
    #[case::exact("highlighter")]
    #[case::mixed_case("Highlighter")]
    fn disabled_plugins_match_case_insensitively(#[case] query: &str) {
        let config = Config::default().with_disabled_plugin("highlighter");
        assert!(!config.is_plugin_enabled(query));
    }

    #[test]
    fn unlisted_plugins_stay_enabled() {
        let config = Config::default().with_disabled_plugin("highlighter");
        assert!(config.is_plugin_enabled("search"));
    }
}
