//! # Command Option Descriptors
//!
//! The wire shape of a single slash command option, as Discord documents it.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Locale maps, channel filters and constraint validation
//! - 1.0.0: Initial option descriptor with serenity builder conversion

use crate::core::error::FrameworkError;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use serenity::builder::CreateApplicationCommandOption;
use serenity::model::application::command::CommandOptionType;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Default description for options that declare none
pub const NO_DESCRIPTION: &str = "No Description";

/// Discord limits
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_DESCRIPTION_LENGTH: usize = 100;
pub const MAX_CHOICES: usize = 25;
pub const MAX_STRING_LENGTH: u16 = 6000;

/// Locale code (e.g. `en-US`) to localized text
pub type LocaleMap = BTreeMap<String, String>;

/// Option type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    SubCommand = 1,
    SubCommandGroup = 2,
    String = 3,
    Integer = 4,
    Boolean = 5,
    User = 6,
    Channel = 7,
    Role = 8,
    Mentionable = 9,
    Number = 10,
    Attachment = 11,
}

impl OptionType {
    pub fn as_str(self) -> &'static str {
        match self {
            OptionType::SubCommand => "sub_command",
            OptionType::SubCommandGroup => "sub_command_group",
            OptionType::String => "string",
            OptionType::Integer => "integer",
            OptionType::Boolean => "boolean",
            OptionType::User => "user",
            OptionType::Channel => "channel",
            OptionType::Role => "role",
            OptionType::Mentionable => "mentionable",
            OptionType::Number => "number",
            OptionType::Attachment => "attachment",
        }
    }

    fn supports_choices(self) -> bool {
        matches!(
            self,
            OptionType::String | OptionType::Integer | OptionType::Number
        )
    }

    fn is_numeric(self) -> bool {
        matches!(self, OptionType::Integer | OptionType::Number)
    }
}

impl Serialize for OptionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl From<OptionType> for CommandOptionType {
    fn from(kind: OptionType) -> Self {
        match kind {
            OptionType::SubCommand => CommandOptionType::SubCommand,
            OptionType::SubCommandGroup => CommandOptionType::SubCommandGroup,
            OptionType::String => CommandOptionType::String,
            OptionType::Integer => CommandOptionType::Integer,
            OptionType::Boolean => CommandOptionType::Boolean,
            OptionType::User => CommandOptionType::User,
            OptionType::Channel => CommandOptionType::Channel,
            OptionType::Role => CommandOptionType::Role,
            OptionType::Mentionable => CommandOptionType::Mentionable,
            OptionType::Number => CommandOptionType::Number,
            OptionType::Attachment => CommandOptionType::Attachment,
        }
    }
}

/// Channel type tag used by channel filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelKind {
    GuildText = 0,
    Dm = 1,
    GuildVoice = 2,
    GroupDm = 3,
    GuildCategory = 4,
    GuildNews = 5,
    NewsThread = 10,
    PublicThread = 11,
    PrivateThread = 12,
    GuildStage = 13,
    GuildDirectory = 14,
    GuildForum = 15,
}

impl Serialize for ChannelKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// A number usable as a bound or choice value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::Int(v)
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Number::Int(v.into())
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

/// Value carried by a predefined choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl ChoiceValue {
    fn fits(&self, kind: OptionType) -> bool {
        match (self, kind) {
            (ChoiceValue::Str(_), OptionType::String) => true,
            (ChoiceValue::Int(_), OptionType::Integer | OptionType::Number) => true,
            (ChoiceValue::Float(_), OptionType::Number) => true,
            // Loosely typed choices on string options are sent as-is
            (_, OptionType::String) => true,
            _ => false,
        }
    }
}

impl From<&str> for ChoiceValue {
    fn from(v: &str) -> Self {
        ChoiceValue::Str(v.to_string())
    }
}

impl From<String> for ChoiceValue {
    fn from(v: String) -> Self {
        ChoiceValue::Str(v)
    }
}

impl From<i64> for ChoiceValue {
    fn from(v: i64) -> Self {
        ChoiceValue::Int(v)
    }
}

impl From<i32> for ChoiceValue {
    fn from(v: i32) -> Self {
        ChoiceValue::Int(v.into())
    }
}

impl From<f64> for ChoiceValue {
    fn from(v: f64) -> Self {
        ChoiceValue::Float(v)
    }
}

/// A predefined choice for an option
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandChoice {
    pub name: String,
    pub value: ChoiceValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<LocaleMap>,
}

impl CommandChoice {
    pub fn new(name: impl Into<String>, value: impl Into<ChoiceValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            name_localizations: None,
        }
    }

    pub fn localized(mut self, locales: LocaleMap) -> Self {
        self.name_localizations = Some(locales);
        self
    }
}

/// Structured description of one user-facing command parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOptionDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OptionType,
    pub description: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<LocaleMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_localizations: Option<LocaleMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<CommandChoice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_types: Option<Vec<ChannelKind>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub autocomplete: bool,
}

impl CommandOptionDescriptor {
    /// A required option with the default description and no constraints
    pub fn new(name: impl Into<String>, kind: OptionType) -> Self {
        Self {
            name: name.into(),
            kind,
            description: NO_DESCRIPTION.to_string(),
            required: true,
            name_localizations: None,
            description_localizations: None,
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
            choices: None,
            channel_types: None,
            autocomplete: false,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check the option against Discord's documented limits
    pub fn validate(&self) -> Result<(), FrameworkError> {
        let fail = |reason: String| Err(FrameworkError::option(&self.name, reason));

        if let Some(reason) = name_error(&self.name) {
            return fail(reason);
        }
        for (locale, name) in self.name_localizations.iter().flatten() {
            if let Some(reason) = name_error(name) {
                return fail(format!("{locale}: {reason}"));
            }
        }

        if let Some(reason) = description_error(&self.description) {
            return fail(reason);
        }
        for (locale, description) in self.description_localizations.iter().flatten() {
            if let Some(reason) = description_error(description) {
                return fail(format!("{locale}: {reason}"));
            }
        }

        if self.min_value.is_some() || self.max_value.is_some() {
            if !self.kind.is_numeric() {
                return fail(format!("{} options cannot have value bounds", self.kind.as_str()));
            }
            if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
                if min.as_f64() > max.as_f64() {
                    return fail("min_value is greater than max_value".to_string());
                }
            }
        }

        if self.min_length.is_some() || self.max_length.is_some() {
            if self.kind != OptionType::String {
                return fail(format!("{} options cannot have length bounds", self.kind.as_str()));
            }
            for bound in [self.min_length, self.max_length].into_iter().flatten() {
                if bound > MAX_STRING_LENGTH {
                    return fail(format!("length bounds cannot exceed {MAX_STRING_LENGTH}"));
                }
            }
            if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
                if min > max {
                    return fail("min_length is greater than max_length".to_string());
                }
            }
        }

        if let Some(choices) = &self.choices {
            if !self.kind.supports_choices() {
                return fail(format!("{} options cannot have choices", self.kind.as_str()));
            }
            if choices.len() > MAX_CHOICES {
                return fail(format!("at most {MAX_CHOICES} choices are allowed"));
            }
            if self.autocomplete {
                return fail("choices and autocomplete are mutually exclusive".to_string());
            }
            if let Some(choice) = choices.iter().find(|c| !c.value.fits(self.kind)) {
                return fail(format!(
                    "choice `{}` does not match option type {}",
                    choice.name,
                    self.kind.as_str()
                ));
            }
        }

        if self.autocomplete && !self.kind.supports_choices() {
            return fail(format!("{} options cannot autocomplete", self.kind.as_str()));
        }

        if self.channel_types.is_some() && self.kind != OptionType::Channel {
            return fail("only channel options can filter channel types".to_string());
        }

        Ok(())
    }

    /// Fill a serenity option builder with this descriptor
    pub fn to_builder(&self) -> CreateApplicationCommandOption {
        let mut option = CreateApplicationCommandOption::default();
        option
            .name(&self.name)
            .description(&self.description)
            .kind(self.kind.into())
            .required(self.required);

        for (locale, name) in self.name_localizations.iter().flatten() {
            option.name_localized(locale, name);
        }
        for (locale, description) in self.description_localizations.iter().flatten() {
            option.description_localized(locale, description);
        }

        if let Some(min) = self.min_length {
            option.min_length(min);
        }
        if let Some(max) = self.max_length {
            option.max_length(max);
        }
        if let Some(min) = &self.min_value {
            option.0.insert("min_value", wire(min));
        }
        if let Some(max) = &self.max_value {
            option.0.insert("max_value", wire(max));
        }
        if let Some(channel_types) = &self.channel_types {
            option.0.insert("channel_types", wire(channel_types));
        }
        if let Some(choices) = &self.choices {
            option.0.insert("choices", wire(choices));
        }
        if self.autocomplete {
            option.set_autocomplete(true);
        }

        option
    }
}

/// Serialized form of a descriptor field, identical to its place in the
/// descriptor's own JSON
fn wire<T: Serialize>(field: &T) -> Value {
    // Plain data with string map keys; serialization cannot fail
    serde_json::to_value(field).unwrap_or(Value::Null)
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[-_\p{L}\p{N}]{1,32}$").expect("static pattern compiles")
    })
}

/// Whether `name` is a legal slash command or option name
pub fn is_valid_name(name: &str) -> bool {
    name_pattern().is_match(name) && name.to_lowercase() == name
}

/// Why `name` is not a legal command or option name, if it is not
pub(crate) fn name_error(name: &str) -> Option<String> {
    (!is_valid_name(name)).then(|| {
        format!("name `{name}` must be 1-{MAX_NAME_LENGTH} lowercase letters, digits, `-` or `_`")
    })
}

/// Why `description` is not a legal description, if it is not
pub(crate) fn description_error(description: &str) -> Option<String> {
    let len = description.chars().count();
    (len == 0 || len > MAX_DESCRIPTION_LENGTH)
        .then(|| format!("description must be 1-{MAX_DESCRIPTION_LENGTH} characters, got {len}"))
}
