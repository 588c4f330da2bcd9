//! # Option Metadata
//!
//! Markers attached to a parameter's annotation to shape the generated option.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use super::option::{ChannelKind, CommandChoice, LocaleMap, Number};

/// Text with optional per-locale translations
///
/// ```ignore
/// Locale::new("name").with("en-US", "en-localization")
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Locale {
    pub fallback: String,
    pub translations: LocaleMap,
}

impl Locale {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
            translations: LocaleMap::new(),
        }
    }

    /// Add a translation for a Discord locale code
    pub fn with(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.translations.insert(locale.into(), text.into());
        self
    }

    pub(crate) fn localizations(&self) -> Option<LocaleMap> {
        (!self.translations.is_empty()).then(|| self.translations.clone())
    }
}

impl From<&str> for Locale {
    fn from(text: &str) -> Self {
        Locale::new(text)
    }
}

impl From<String> for Locale {
    fn from(text: String) -> Self {
        Locale::new(text)
    }
}

/// One piece of annotation metadata
#[derive(Debug, Clone, PartialEq)]
pub enum ArgMeta {
    /// Bare text, treated as the description
    Text(String),
    Description(Locale),
    Name(Locale),
    MinValue(Number),
    MaxValue(Number),
    MinLength(u16),
    MaxLength(u16),
    ChannelTypes(Vec<ChannelKind>),
    Choices(Vec<CommandChoice>),
    Autocomplete,
}

impl From<&str> for ArgMeta {
    fn from(text: &str) -> Self {
        ArgMeta::Text(text.to_string())
    }
}

pub fn description(text: impl Into<Locale>) -> ArgMeta {
    ArgMeta::Description(text.into())
}

pub fn name(text: impl Into<Locale>) -> ArgMeta {
    ArgMeta::Name(text.into())
}

pub fn min_value(value: impl Into<Number>) -> ArgMeta {
    ArgMeta::MinValue(value.into())
}

pub fn max_value(value: impl Into<Number>) -> ArgMeta {
    ArgMeta::MaxValue(value.into())
}

pub fn min_length(value: u16) -> ArgMeta {
    ArgMeta::MinLength(value)
}

pub fn max_length(value: u16) -> ArgMeta {
    ArgMeta::MaxLength(value)
}

pub fn channel_types(kinds: impl IntoIterator<Item = ChannelKind>) -> ArgMeta {
    ArgMeta::ChannelTypes(kinds.into_iter().collect())
}

pub fn choices(choices: impl IntoIterator<Item = CommandChoice>) -> ArgMeta {
    ArgMeta::Choices(choices.into_iter().collect())
}

/// Let the client ask for suggestions while the user types
pub fn autocomplete() -> ArgMeta {
    ArgMeta::Autocomplete
}
