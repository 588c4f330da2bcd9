//! # Configuration
//!
//! Environment-driven settings for bots built on the framework.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Token, development guild, command sync toggle and log level

use anyhow::{Context as _, Result};
use std::env;

/// Runtime configuration read from the process environment
///
/// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Register every command to this guild instead of globally
    pub discord_guild_id: Option<u64>,
    /// Push command definitions to Discord on `ready`
    pub update_commands: bool,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .context("DISCORD_TOKEN must be set")?;

        let discord_guild_id = match lookup("DISCORD_GUILD_ID").filter(|s| !s.trim().is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("DISCORD_GUILD_ID is not a snowflake: {raw}"))?,
            ),
            None => None,
        };

        let update_commands = match lookup("UPDATE_COMMANDS") {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("UPDATE_COMMANDS is not a boolean: {raw}"))?,
            None => true,
        };

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            discord_token,
            discord_guild_id,
            update_commands,
            log_level,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
