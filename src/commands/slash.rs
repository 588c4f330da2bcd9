//! # Slash Command Glue
//!
//! Everything that touches serenity: registration payloads, pushing command
//! definitions to Discord, reading interaction options, and replying.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 3.0.0: Build payloads from command metadata, responder for hooks
//! - 2.0.0: Typed option parsing
//! - 1.0.0: Global and guild registration

use crate::commands::context::{CommandOptions, OptionValue, Responder};
use crate::commands::meta::Command;
use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::Value;
use serenity::builder::CreateApplicationCommand;
use serenity::http::Http;
use serenity::model::application::command::{Command as ApplicationCommand, CommandOptionType};
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandDataOption,
};
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::id::{AttachmentId, ChannelId, GuildId, RoleId, UserId};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Registration payloads for a set of commands
pub fn create_application_commands<'a>(
    commands: impl IntoIterator<Item = &'a Command>,
) -> Vec<CreateApplicationCommand> {
    commands
        .into_iter()
        .map(|command| command.meta.create_command())
        .collect()
}

/// Replace all global commands with `commands`
pub async fn register_global_commands(http: &Http, commands: &[&Command]) -> Result<()> {
    let payloads = create_application_commands(commands.iter().copied());
    let count = payloads.len();

    ApplicationCommand::set_global_application_commands(http, |builder| {
        for payload in payloads {
            builder.add_application_command(payload);
        }
        builder
    })
    .await?;

    info!("Global slash commands registered successfully ({count} commands)");
    Ok(())
}

/// Replace all commands of one guild with `commands`
pub async fn register_guild_commands(
    http: &Http,
    guild_id: GuildId,
    commands: &[&Command],
) -> Result<()> {
    let payloads = create_application_commands(commands.iter().copied());
    let count = payloads.len();

    guild_id
        .set_application_commands(http, |builder| {
            for payload in payloads {
                builder.add_application_command(payload);
            }
            builder
        })
        .await?;

    info!("Guild slash commands registered for guild {guild_id} ({count} commands)");
    Ok(())
}

fn parse_id(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

/// Convert one raw option value according to its type
pub fn parse_option_value(kind: CommandOptionType, value: &Value) -> Option<OptionValue> {
    match kind {
        CommandOptionType::String => value.as_str().map(|s| OptionValue::String(s.to_string())),
        CommandOptionType::Integer => value.as_i64().map(OptionValue::Integer),
        CommandOptionType::Number => value.as_f64().map(OptionValue::Number),
        CommandOptionType::Boolean => value.as_bool().map(OptionValue::Boolean),
        CommandOptionType::User => parse_id(value).map(|id| OptionValue::User(UserId(id))),
        CommandOptionType::Channel => parse_id(value).map(|id| OptionValue::Channel(ChannelId(id))),
        CommandOptionType::Role => parse_id(value).map(|id| OptionValue::Role(RoleId(id))),
        CommandOptionType::Mentionable => parse_id(value).map(OptionValue::Mentionable),
        CommandOptionType::Attachment => {
            parse_id(value).map(|id| OptionValue::Attachment(AttachmentId(id)))
        }
        _ => None,
    }
}

/// Collect the options of an interaction
///
/// Values that can't be read are skipped with a warning.
pub fn parse_options(options: &[CommandDataOption]) -> CommandOptions {
    options
        .iter()
        .filter_map(|option| {
            let parsed = option
                .value
                .as_ref()
                .and_then(|value| parse_option_value(option.kind, value));
            if parsed.is_none() {
                warn!(
                    "Skipping option '{}' of type {:?} with value {:?}",
                    option.name, option.kind, option.value
                );
            }
            parsed.map(|value| (option.name.clone(), value))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Acknowledged {
    No,
    Deferred,
    Responded,
}

/// Replies to an application command interaction through serenity
///
/// The first reply answers the interaction; after a defer it edits the
/// deferred message; anything later is sent as a followup.
pub struct SerenityResponder {
    http: Arc<Http>,
    interaction: ApplicationCommandInteraction,
    state: Mutex<Acknowledged>,
}

impl SerenityResponder {
    pub fn new(http: Arc<Http>, interaction: ApplicationCommandInteraction) -> Self {
        Self {
            http,
            interaction,
            state: Mutex::new(Acknowledged::No),
        }
    }
}

#[async_trait]
impl Responder for SerenityResponder {
    async fn respond(&self, content: &str, ephemeral: bool) -> Result<()> {
        let mut state = self.state.lock().await;
        match *state {
            Acknowledged::No => {
                self.interaction
                    .create_interaction_response(&self.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content(content).ephemeral(ephemeral)
                            })
                    })
                    .await?;
            }
            Acknowledged::Deferred => {
                self.interaction
                    .edit_original_interaction_response(&self.http, |response| {
                        response.content(content)
                    })
                    .await?;
            }
            Acknowledged::Responded => {
                self.interaction
                    .create_followup_message(&self.http, |followup| {
                        followup.content(content).ephemeral(ephemeral)
                    })
                    .await?;
            }
        }
        *state = Acknowledged::Responded;
        Ok(())
    }

    async fn defer(&self, ephemeral: bool) -> Result<()> {
        let mut state = self.state.lock().await;
        if *state != Acknowledged::No {
            debug!(
                "Interaction for /{} already acknowledged, skipping defer",
                self.interaction.data.name
            );
            return Ok(());
        }

        self.interaction
            .create_interaction_response(&self.http, |response| {
                response
                    .kind(InteractionResponseType::DeferredChannelMessageWithSource)
                    .interaction_response_data(|message| message.ephemeral(ephemeral))
            })
            .await?;
        *state = Acknowledged::Deferred;
        Ok(())
    }
}
