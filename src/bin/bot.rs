use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::model::gateway::GatewayIntents;
use serenity::prelude::Client;
use std::sync::Arc;
use std::time::Duration;

use moonhook::commands::{HookRef, OptionValue};
use moonhook::prelude::*;

/// Replies first and stops everything after it
fn intercept() -> HookRef {
    hook_fn("intercept", |ctx| {
        Box::pin(async move {
            info!("[{}] Here first.", ctx.request_id);
            ctx.respond("INTERCEPTED").await?;
            Ok(HookResult::exit())
        })
    })
}

/// Overrides the `number` option before the command runs
fn force_number(number: i64) -> HookRef {
    hook_fn("force_number", move |ctx| {
        Box::pin(async move {
            info!("[{}] Here second. Number is {number}", ctx.request_id);
            ctx.options.insert("number", OptionValue::Integer(number));
            Ok(HookResult::proceed())
        })
    })
}

fn log_completion() -> HookRef {
    hook_fn("log_completion", |ctx| {
        Box::pin(async move {
            info!("[{}] /{} completed", ctx.request_id, ctx.command_name);
            Ok(HookResult::proceed())
        })
    })
}

/// Die size for `/roll`; hooks may rewrite the option, so keep it positive
fn roll_sides(requested: Option<i64>) -> i64 {
    requested.unwrap_or(6).max(1)
}

fn build_framework(config: &moonhook::Config) -> Result<Framework> {
    let ping = Command::builder("ping", |ctx| {
        Box::pin(async move { ctx.respond("Pong").await })
    })
    .description("Check that the bot is alive")
    .build()?;

    let echo = Command::builder("echo", |ctx| {
        Box::pin(async move {
            let text = ctx.options.require_string("text")?;
            let times = ctx.options.get_integer("times").unwrap_or(1);
            ctx.respond(vec![text; times as usize].join(" ")).await
        })
    })
    .description("Repeat a message")
    .params([
        Parameter::context("ctx"),
        Parameter::typed::<String>("text").meta([
            args::description("What to repeat"),
            args::max_length(200),
        ]),
        Parameter::typed::<Option<i64>>("times").meta([
            args::description("How many times"),
            args::min_value(1),
            args::max_value(5),
        ]),
    ])
    .hook(hook([Arc::new(Cooldown::new(3, Duration::from_secs(30))) as HookRef]))
    .build()?;

    let hooked = Command::builder("hooked", |ctx| {
        Box::pin(async move {
            // Never reached: `intercept` exits first
            let number = ctx.options.require_integer("number")?;
            ctx.respond(format!("Done! {number}")).await
        })
    })
    .description("Show how hooks can stop a command")
    .param(Parameter::typed::<i64>("number"))
    .hook(hook([intercept(), force_number(5)]))
    .build()?;

    let report = Command::builder("report", |ctx| {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            let channel = ctx.options.get_channel("channel").unwrap_or(ctx.channel_id);
            ctx.respond(format!("Report for <#{channel}> is ready")).await
        })
    })
    .description("Build a slow report")
    .param(
        Parameter::typed::<Option<channels::GuildText>>("channel")
            .meta([args::description("Channel to report on")]),
    )
    .hook(hook([defer(true)]))
    .build()?;

    let roll = Command::builder("roll", |ctx| {
        Box::pin(async move {
            let sides = roll_sides(ctx.options.get_integer("sides"));
            let rolled = (ctx.request_id.as_u128() % sides as u128) + 1;
            ctx.respond(format!("🎲 {rolled}")).await
        })
    })
    .description("Roll a die")
    .param(
        Parameter::typed::<Option<i64>>("sides").meta([args::choices([
            CommandChoice::new("d6", 6),
            CommandChoice::new("d20", 20),
        ])]),
    )
    .build()?;

    let fun = Plugin::new("fun")
        .command(roll)
        .command_after_hook(log_completion());

    Ok(Framework::from_config(config)
        .command(ping)
        .command(echo)
        .command(hooked)
        .command(report)
        .plugin(fun)
        .build()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = moonhook::Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting demo bot...");

    let framework = build_framework(&config)?;

    let mut client = Client::builder(&config.discord_token, GatewayIntents::empty())
        .event_handler(framework)
        .await?;

    if let Err(e) = client.start().await {
        error!("Client error: {e}");
        return Err(e.into());
    }
    Ok(())
}
