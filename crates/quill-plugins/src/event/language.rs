//! Language requirements and the capability descriptors they are scored
//! against.

use serde::{Deserialize, Serialize};

/// Capability descriptor published by a language support provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDescription {
    name: String,
    family: String,
    supported_file_suffixes: Vec<String>,
}

impl LanguageDescription {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        family: impl Into<String>,
        supported_file_suffixes: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            family: family.into(),
            supported_file_suffixes,
        }
    }

    /// Language name, e.g. `Kotlin`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Language family, e.g. `JVM`.
    #[must_use]
    pub fn family(&self) -> &str {
        self.family.as_str()
    }

    /// File suffixes the provider handles, e.g. `.kt`.
    #[must_use]
    pub fn supported_file_suffixes(&self) -> &[String] {
        &self.supported_file_suffixes
    }
}

/// Traits an editor asks of a language support provider.
///
/// Unset fields are not requested and never contribute to the score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRequirement {
    file_suffix: Option<String>,
    language_name: Option<String>,
    language_family: Option<String>,
}

impl LanguageRequirement {
    /// Creates a requirement requesting nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a file suffix.
    #[must_use]
    pub fn with_file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.file_suffix = Some(suffix.into());
        self
    }

    /// Requests a language name.
    #[must_use]
    pub fn with_language_name(mut self, name: impl Into<String>) -> Self {
        self.language_name = Some(name.into());
        self
    }

    /// Requests a language family.
    #[must_use]
    pub fn with_language_family(mut self, family: impl Into<String>) -> Self {
        self.language_family = Some(family.into());
        self
    }

    /// Requested file suffix.
    #[must_use]
    pub fn file_suffix(&self) -> Option<&str> {
        self.file_suffix.as_deref()
    }

    /// Requested language name.
    #[must_use]
    pub fn language_name(&self) -> Option<&str> {
        self.language_name.as_deref()
    }

    /// Requested language family.
    #[must_use]
    pub fn language_family(&self) -> Option<&str> {
        self.language_family.as_deref()
    }

    /// Counts how many requested traits `description` satisfies, in `0..=3`.
    ///
    /// Name, family, and suffix each score one point when requested and equal
    /// ignoring case. The suffix scores once however many supported suffixes
    /// match.
    ///
    /// # Examples
    ///
    /// ```
    /// use quill_plugins::{LanguageDescription, LanguageRequirement};
    ///
    /// let kotlin = LanguageDescription::new(
    ///     "kotlin",
    ///     "JVM",
    ///     vec![".kt".into(), ".kts".into()],
    /// );
    /// let requirement = LanguageRequirement::new()
    ///     .with_language_name("Kotlin")
    ///     .with_file_suffix(".kt");
    /// assert_eq!(requirement.met_requirement_count(&kotlin), 2);
    /// ```
    #[must_use]
    pub fn met_requirement_count(&self, description: &LanguageDescription) -> u8 {
        let name = self
            .language_name()
            .is_some_and(|name| eq_ignore_case(name, description.name()));
        let family = self
            .language_family()
            .is_some_and(|family| eq_ignore_case(family, description.family()));
        let suffix = self.file_suffix().is_some_and(|suffix| {
            description
                .supported_file_suffixes()
                .iter()
                .any(|supported| eq_ignore_case(supported, suffix))
        });
        u8::from(name) + u8::from(family) + u8::from(suffix)
    }
}

fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_lowercase)
        .eq(right.chars().flat_map(char::to_lowercase))
}
