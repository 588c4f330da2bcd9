//! Invocation context handed to hooks and command callbacks
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Typed option values and a responder seam for replies
//! - 1.0.0: Initial implementation with shared invocation state

use crate::core::error::FrameworkError;
use crate::core::response::truncate_for_message;
use anyhow::Result;
use async_trait::async_trait;
use serenity::model::id::{AttachmentId, ChannelId, GuildId, RoleId, UserId};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// A resolved option value from an interaction
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    User(UserId),
    Channel(ChannelId),
    Role(RoleId),
    Mentionable(u64),
    Attachment(AttachmentId),
}

impl OptionValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::String(_) => "string",
            OptionValue::Integer(_) => "integer",
            OptionValue::Number(_) => "number",
            OptionValue::Boolean(_) => "boolean",
            OptionValue::User(_) => "user",
            OptionValue::Channel(_) => "channel",
            OptionValue::Role(_) => "role",
            OptionValue::Mentionable(_) => "mentionable",
            OptionValue::Attachment(_) => "attachment",
        }
    }
}

/// Options supplied with one invocation, keyed by option name
///
/// Hooks receive the options mutably and may rewrite them before the command
/// body runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOptions {
    values: BTreeMap<String, OptionValue>,
}

macro_rules! typed_getters {
    ($($get:ident, $require:ident, $variant:ident => $ty:ty, $label:literal;)+) => {
        $(
            pub fn $get(&self, name: &str) -> Option<$ty> {
                match self.values.get(name) {
                    Some(OptionValue::$variant(value)) => Some(value.clone()),
                    _ => None,
                }
            }

            pub fn $require(&self, name: &str) -> Result<$ty, FrameworkError> {
                match self.values.get(name) {
                    Some(OptionValue::$variant(value)) => Ok(value.clone()),
                    Some(_) => Err(FrameworkError::OptionTypeMismatch {
                        name: name.to_string(),
                        expected: $label,
                    }),
                    None => Err(FrameworkError::MissingOption(name.to_string())),
                }
            }
        )+
    };
}

impl CommandOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: OptionValue) -> Option<OptionValue> {
        self.values.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<OptionValue> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.values.iter()
    }

    typed_getters! {
        get_string, require_string, String => String, "string";
        get_integer, require_integer, Integer => i64, "integer";
        get_number, require_number, Number => f64, "number";
        get_bool, require_bool, Boolean => bool, "boolean";
        get_user, require_user, User => UserId, "user";
        get_channel, require_channel, Channel => ChannelId, "channel";
        get_role, require_role, Role => RoleId, "role";
        get_mentionable, require_mentionable, Mentionable => u64, "mentionable";
        get_attachment, require_attachment, Attachment => AttachmentId, "attachment";
    }
}

impl FromIterator<(String, OptionValue)> for CommandOptions {
    fn from_iter<I: IntoIterator<Item = (String, OptionValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Sends replies for an invocation
///
/// The serenity implementation lives in `commands::slash`; tests plug in a
/// recorder.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Send a message in reply to the interaction
    async fn respond(&self, content: &str, ephemeral: bool) -> Result<()>;

    /// Acknowledge now and reply later
    async fn defer(&self, ephemeral: bool) -> Result<()>;
}

/// State for a single command invocation
pub struct Context {
    pub request_id: Uuid,
    pub command_name: String,
    pub user_id: UserId,
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub options: CommandOptions,
    serenity: Option<serenity::prelude::Context>,
    responder: Arc<dyn Responder>,
}

impl Context {
    pub fn new(
        command_name: impl Into<String>,
        user_id: UserId,
        channel_id: ChannelId,
        options: CommandOptions,
        responder: Arc<dyn Responder>,
    ) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            command_name: command_name.into(),
            user_id,
            guild_id: None,
            channel_id,
            options,
            serenity: None,
            responder,
        }
    }

    pub fn with_guild(mut self, guild_id: Option<GuildId>) -> Self {
        self.guild_id = guild_id;
        self
    }

    pub fn with_serenity(mut self, ctx: serenity::prelude::Context) -> Self {
        self.serenity = Some(ctx);
        self
    }

    /// The serenity context, when invoked from a live gateway event
    pub fn serenity(&self) -> Option<&serenity::prelude::Context> {
        self.serenity.as_ref()
    }

    pub async fn respond(&self, content: impl AsRef<str>) -> Result<()> {
        self.responder
            .respond(&truncate_for_message(content.as_ref()), false)
            .await
    }

    /// Reply visible only to the invoking user
    pub async fn respond_ephemeral(&self, content: impl AsRef<str>) -> Result<()> {
        self.responder
            .respond(&truncate_for_message(content.as_ref()), true)
            .await
    }

    pub async fn defer(&self, ephemeral: bool) -> Result<()> {
        self.responder.defer(ephemeral).await
    }
}
