//! # Framework
//!
//! Collects commands and plugins, applies group hooks, registers the command
//! definitions with Discord and dispatches incoming interactions.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use crate::commands::context::Context;
use crate::commands::handler::{execute, Outcome};
use crate::commands::hooks::{add_hooks, HasHooks, HookRef};
use crate::commands::meta::Command;
use crate::commands::registry::CommandRegistry;
use crate::commands::slash::{
    parse_options, register_global_commands, register_guild_commands, SerenityResponder,
};
use crate::core::config::Config;
use crate::core::error::FrameworkError;
use anyhow::Result;
use async_trait::async_trait;
use log::{error, info, warn};
use serenity::client::EventHandler;
use serenity::http::Http;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::Interaction;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Reply sent when a command fails
pub const ERROR_MESSAGE: &str =
    "❌ Sorry, I encountered an error processing your command. Please try again.";

/// A named group of commands sharing hooks
pub struct Plugin {
    pub name: String,
    commands: Vec<Command>,
    command_hooks: Vec<HookRef>,
    command_after_hooks: Vec<HookRef>,
}

impl Plugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
            command_hooks: Vec::new(),
            command_after_hooks: Vec::new(),
        }
    }

    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Hook run before every command of this plugin
    pub fn command_hook(mut self, hook: HookRef) -> Self {
        self.command_hooks.push(hook);
        self
    }

    /// Hook run after every command of this plugin
    pub fn command_after_hook(mut self, hook: HookRef) -> Self {
        self.command_after_hooks.push(hook);
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
}

impl HasHooks for Plugin {
    fn command_hooks(&self) -> &[HookRef] {
        &self.command_hooks
    }

    fn command_after_hooks(&self) -> &[HookRef] {
        &self.command_after_hooks
    }
}

#[derive(Default)]
struct GlobalHooks {
    hooks: Vec<HookRef>,
    after_hooks: Vec<HookRef>,
}

impl HasHooks for GlobalHooks {
    fn command_hooks(&self) -> &[HookRef] {
        &self.hooks
    }

    fn command_after_hooks(&self) -> &[HookRef] {
        &self.after_hooks
    }
}

pub struct FrameworkBuilder {
    commands: Vec<Command>,
    plugins: Vec<Plugin>,
    global: GlobalHooks,
    guild: Option<GuildId>,
    update_commands: bool,
}

impl FrameworkBuilder {
    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn plugin(mut self, plugin: Plugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Hook run before every command, after plugin hooks
    pub fn command_hook(mut self, hook: HookRef) -> Self {
        self.global.hooks.push(hook);
        self
    }

    /// Hook run after every command, after plugin after-hooks
    pub fn command_after_hook(mut self, hook: HookRef) -> Self {
        self.global.after_hooks.push(hook);
        self
    }

    /// Register every command in this guild instead of globally
    pub fn guild(mut self, guild: Option<GuildId>) -> Self {
        self.guild = guild;
        self
    }

    pub fn update_commands(mut self, update: bool) -> Self {
        self.update_commands = update;
        self
    }

    pub fn build(self) -> Result<Framework, FrameworkError> {
        let mut registry = CommandRegistry::new();

        let mut commands = self.commands;
        for mut plugin in self.plugins {
            info!(
                "🔌 Loading plugin {} ({} commands)",
                plugin.name,
                plugin.commands.len()
            );
            for mut command in std::mem::take(&mut plugin.commands) {
                add_hooks(&plugin, &mut command);
                commands.push(command);
            }
        }

        for mut command in commands {
            add_hooks(&self.global, &mut command);
            registry.register(command)?;
        }

        Ok(Framework {
            registry,
            guild: self.guild,
            update_commands: self.update_commands,
        })
    }
}

/// Command framework and serenity event handler
pub struct Framework {
    registry: CommandRegistry,
    guild: Option<GuildId>,
    update_commands: bool,
}

impl Framework {
    pub fn builder() -> FrameworkBuilder {
        FrameworkBuilder {
            commands: Vec::new(),
            plugins: Vec::new(),
            global: GlobalHooks::default(),
            guild: None,
            update_commands: true,
        }
    }

    /// Builder preloaded with the guild and sync settings from `config`
    pub fn from_config(config: &Config) -> FrameworkBuilder {
        Self::builder()
            .guild(config.discord_guild_id.map(GuildId))
            .update_commands(config.update_commands)
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Split commands by where they must be registered
    ///
    /// Returns the global commands and the commands per guild. With a
    /// development guild configured, everything goes to that guild.
    pub fn command_scopes(&self) -> (Vec<&Command>, BTreeMap<GuildId, Vec<&Command>>) {
        let mut global = Vec::new();
        let mut guilds: BTreeMap<GuildId, Vec<&Command>> = BTreeMap::new();
        for command in self.registry.commands() {
            match self.guild.or(command.meta.guild) {
                Some(guild) => guilds.entry(guild).or_default().push(command.as_ref()),
                None => global.push(command.as_ref()),
            }
        }
        (global, guilds)
    }

    /// Push command definitions to Discord
    pub async fn register_commands(&self, http: &Http) -> Result<()> {
        let (global, guilds) = self.command_scopes();
        if !global.is_empty() || self.guild.is_none() {
            register_global_commands(http, &global).await?;
        }
        for (guild_id, commands) in guilds {
            register_guild_commands(http, guild_id, &commands).await?;
        }
        Ok(())
    }

    /// Look up and execute the command named in `ctx`
    pub async fn dispatch(&self, ctx: &mut Context) -> Result<Outcome> {
        let command = self
            .registry
            .get(&ctx.command_name)
            .ok_or_else(|| FrameworkError::UnknownCommand(ctx.command_name.clone()))?;
        execute(&command, ctx).await
    }

    async fn handle_command(
        &self,
        serenity_ctx: serenity::prelude::Context,
        interaction: ApplicationCommandInteraction,
    ) {
        let responder = Arc::new(SerenityResponder::new(
            Arc::clone(&serenity_ctx.http),
            interaction.clone(),
        ));
        let mut ctx = Context::new(
            interaction.data.name.clone(),
            interaction.user.id,
            interaction.channel_id,
            parse_options(&interaction.data.options),
            responder,
        )
        .with_guild(interaction.guild_id)
        .with_serenity(serenity_ctx);

        info!(
            "[{}] /{} invoked by {} in {}",
            ctx.request_id, ctx.command_name, ctx.user_id, ctx.channel_id
        );

        if let Err(e) = self.dispatch(&mut ctx).await {
            error!(
                "[{}] Error handling slash command '{}': {}",
                ctx.request_id, ctx.command_name, e
            );
            if let Err(reply_err) = ctx.respond_ephemeral(ERROR_MESSAGE).await {
                warn!(
                    "[{}] Could not send error reply: {}",
                    ctx.request_id, reply_err
                );
            }
        }
    }
}

#[async_trait]
impl EventHandler for Framework {
    async fn ready(&self, ctx: serenity::prelude::Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📋 {} commands loaded", self.registry.len());

        if !self.update_commands {
            info!("Command sync disabled, skipping registration");
            return;
        }
        if let Err(e) = self.register_commands(&ctx.http).await {
            error!("Failed to register slash commands: {e}");
        }
    }

    async fn interaction_create(&self, ctx: serenity::prelude::Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            self.handle_command(ctx, command).await;
        }
    }
}
