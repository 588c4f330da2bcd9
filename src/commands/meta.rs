//! # Command Metadata
//!
//! Declares a slash command: its name, description, options derived from the
//! callback's parameters, scope, and the hook lists that wrap the body.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use super::args::Locale;
use super::context::Context;
use super::handler::{fn_callback, CommandCallback};
use super::hooks::{BoxFuture, HookRef, HookSet};
use super::option::{
    description_error, name_error, CommandOptionDescriptor, LocaleMap, NO_DESCRIPTION,
};
use super::signature::{gen_command_options, Parameter};
use crate::core::error::FrameworkError;
use anyhow::Result;
use serde_json::Value;
use serenity::builder::CreateApplicationCommand;
use serenity::model::id::GuildId;
use serenity::model::permissions::Permissions;
use std::fmt;
use std::sync::Arc;

/// Registration data for one application command
#[derive(Clone)]
pub struct AppCommandMeta {
    pub name: String,
    pub name_localizations: Option<LocaleMap>,
    pub description: String,
    pub description_localizations: Option<LocaleMap>,
    pub options: Vec<CommandOptionDescriptor>,
    /// Register only in this guild
    pub guild: Option<GuildId>,
    pub dm_permission: bool,
    pub default_member_permissions: Option<Permissions>,
    pub nsfw: bool,
    /// Run before the body, in order
    pub hooks: Vec<HookRef>,
    /// Run after the body, in order
    pub after_hooks: Vec<HookRef>,
}

impl AppCommandMeta {
    /// Add hooks to the before or after chain
    ///
    /// With `prepend` the batch goes ahead of existing hooks, keeping its own
    /// order.
    pub fn add_hooks(&mut self, hooks: &[HookRef], prepend: bool, after: bool) {
        let target = if after {
            &mut self.after_hooks
        } else {
            &mut self.hooks
        };
        if prepend {
            target.splice(0..0, hooks.iter().cloned());
        } else {
            target.extend(hooks.iter().cloned());
        }
    }

    /// serenity builder for registration
    pub fn create_command(&self) -> CreateApplicationCommand {
        let mut command = CreateApplicationCommand::default();
        command
            .name(&self.name)
            .description(&self.description)
            .dm_permission(self.dm_permission);

        for (locale, name) in self.name_localizations.iter().flatten() {
            command.name_localized(locale, name);
        }
        for (locale, description) in self.description_localizations.iter().flatten() {
            command.description_localized(locale, description);
        }
        if let Some(permissions) = self.default_member_permissions {
            command.default_member_permissions(permissions);
        }
        if self.nsfw {
            command.0.insert("nsfw", Value::Bool(true));
        }
        for option in &self.options {
            command.add_option(option.to_builder());
        }
        command
    }
}

impl fmt::Debug for AppCommandMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCommandMeta")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("options", &self.options)
            .field("guild", &self.guild)
            .field("hooks", &self.hooks.len())
            .field("after_hooks", &self.after_hooks.len())
            .finish()
    }
}

/// A slash command: metadata plus the body to run
#[derive(Clone)]
pub struct Command {
    pub meta: AppCommandMeta,
    callback: Arc<dyn CommandCallback>,
}

impl Command {
    /// Start declaring a command backed by a closure
    ///
    /// ```ignore
    /// let ping = Command::builder("ping", |ctx| Box::pin(async move {
    ///     ctx.respond("Pong").await
    /// }))
    /// .description("Check the bot is alive")
    /// .build()?;
    /// ```
    pub fn builder<F>(name: impl Into<Locale>, callback: F) -> CommandBuilder
    where
        F: for<'a> Fn(&'a Context) -> BoxFuture<'a, Result<()>> + Send + Sync + 'static,
    {
        CommandBuilder::new(name.into(), fn_callback(callback))
    }

    /// Start declaring a command backed by a `CommandCallback` implementation
    pub fn with_callback(name: impl Into<Locale>, callback: Arc<dyn CommandCallback>) -> CommandBuilder {
        CommandBuilder::new(name.into(), callback)
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// Run only the command body
    pub async fn invoke(&self, ctx: &Context) -> Result<()> {
        self.callback.call(ctx).await
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command").field("meta", &self.meta).finish()
    }
}

pub struct CommandBuilder {
    name: Locale,
    description: Locale,
    params: Vec<Parameter>,
    guild: Option<GuildId>,
    dm_permission: bool,
    default_member_permissions: Option<Permissions>,
    nsfw: bool,
    hooks: Vec<HookRef>,
    after_hooks: Vec<HookRef>,
    callback: Arc<dyn CommandCallback>,
}

impl CommandBuilder {
    fn new(name: Locale, callback: Arc<dyn CommandCallback>) -> Self {
        Self {
            name,
            description: Locale::new(NO_DESCRIPTION),
            params: Vec::new(),
            guild: None,
            dm_permission: true,
            default_member_permissions: None,
            nsfw: false,
            hooks: Vec::new(),
            after_hooks: Vec::new(),
            callback,
        }
    }

    pub fn description(mut self, description: impl Into<Locale>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare one callback parameter
    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = Parameter>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn guild(mut self, guild: GuildId) -> Self {
        self.guild = Some(guild);
        self
    }

    pub fn dm_permission(mut self, allowed: bool) -> Self {
        self.dm_permission = allowed;
        self
    }

    pub fn default_member_permissions(mut self, permissions: Permissions) -> Self {
        self.default_member_permissions = Some(permissions);
        self
    }

    pub fn nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = nsfw;
        self
    }

    /// Attach hooks; successive calls run in the order they are written
    pub fn hook(mut self, set: HookSet) -> Self {
        if set.after {
            self.after_hooks.extend(set.callbacks);
        } else {
            self.hooks.extend(set.callbacks);
        }
        self
    }

    /// Validate and derive the option schema
    pub fn build(self) -> Result<Command, FrameworkError> {
        let name = self.name.fallback.clone();
        let name_localizations = self.name.localizations();
        let description_localizations = self.description.localizations();

        let names = std::iter::once(("", name.as_str()))
            .chain(name_localizations.iter().flatten().map(|(l, n)| (l.as_str(), n.as_str())));
        for (locale, text) in names {
            if let Some(reason) = name_error(text) {
                return Err(FrameworkError::command(&name, localized(locale, reason)));
            }
        }
        let descriptions = std::iter::once(("", self.description.fallback.as_str())).chain(
            description_localizations
                .iter()
                .flatten()
                .map(|(l, d)| (l.as_str(), d.as_str())),
        );
        for (locale, text) in descriptions {
            if let Some(reason) = description_error(text) {
                return Err(FrameworkError::command(&name, localized(locale, reason)));
            }
        }

        let options = gen_command_options(&self.params)?;

        Ok(Command {
            meta: AppCommandMeta {
                name_localizations,
                name,
                description_localizations,
                description: self.description.fallback,
                options,
                guild: self.guild,
                dm_permission: self.dm_permission,
                default_member_permissions: self.default_member_permissions,
                nsfw: self.nsfw,
                hooks: self.hooks,
                after_hooks: self.after_hooks,
            },
            callback: self.callback,
        })
    }
}

fn localized(locale: &str, reason: String) -> String {
    if locale.is_empty() {
        reason
    } else {
        format!("{locale}: {reason}")
    }
}
