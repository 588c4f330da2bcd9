//! Command execution: the before-hooks, the body, then the after-hooks
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Hook chain around the command body
//! - 1.0.0: Initial callback trait for modular command handling

use super::context::Context;
use super::hooks::{run_hooks, BoxFuture};
use super::meta::Command;
use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

/// The body of a slash command
///
/// # Example
///
/// ```ignore
/// pub struct Ping;
///
/// #[async_trait]
/// impl CommandCallback for Ping {
///     async fn call(&self, ctx: &Context) -> Result<()> {
///         ctx.respond("Pong").await
///     }
/// }
/// ```
#[async_trait]
pub trait CommandCallback: Send + Sync {
    async fn call(&self, ctx: &Context) -> Result<()>;
}

struct FnCallback<F>(F);

#[async_trait]
impl<F> CommandCallback for FnCallback<F>
where
    F: for<'a> Fn(&'a Context) -> BoxFuture<'a, Result<()>> + Send + Sync,
{
    async fn call(&self, ctx: &Context) -> Result<()> {
        (self.0)(ctx).await
    }
}

pub(crate) fn fn_callback<F>(callback: F) -> Arc<dyn CommandCallback>
where
    F: for<'a> Fn(&'a Context) -> BoxFuture<'a, Result<()>> + Send + Sync + 'static,
{
    Arc::new(FnCallback(callback))
}

/// How an invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The body ran
    Completed,
    /// A before-hook exited; the body and after-hooks were skipped
    Halted,
}

/// Run a command with its hooks
///
/// An exit from an after-hook only stops the remaining after-hooks. Errors
/// from any stage are returned as-is.
pub async fn execute(command: &Command, ctx: &mut Context) -> Result<Outcome> {
    let request_id = ctx.request_id;
    debug!(
        "[{request_id}] /{} with {} options, {} hooks, {} after hooks",
        command.name(),
        ctx.options.len(),
        command.meta.hooks.len(),
        command.meta.after_hooks.len()
    );

    if !run_hooks(&command.meta.hooks, ctx).await? {
        info!("[{request_id}] /{} halted by a hook", command.name());
        return Ok(Outcome::Halted);
    }

    command.invoke(ctx).await?;
    debug!("[{request_id}] /{} body finished", command.name());

    run_hooks(&command.meta.after_hooks, ctx).await?;
    Ok(Outcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::testing::{test_context, Reply};
    use crate::commands::context::OptionValue;
    use crate::commands::hooks::testing::{tracing_hook, Trace};
    use crate::commands::hooks::{hook, hook_fn, HookResult};

    // Test that the trait is object-safe (can be used with dyn)
    fn _assert_object_safe(_: &dyn CommandCallback) {}

    fn traced_command(trace: &Arc<Trace>) -> crate::commands::meta::CommandBuilder {
        let trace = Arc::clone(trace);
        Command::builder("test_command", move |_ctx| {
            let trace = Arc::clone(&trace);
            Box::pin(async move {
                trace.calls.lock().await.push("body".to_string());
                Ok(())
            })
        })
    }

    #[tokio::test]
    async fn test_full_chain_runs_in_order() {
        let trace = Arc::new(Trace::default());
        let command = traced_command(&trace)
            .hook(hook([
                tracing_hook(&trace, "before1", false),
                tracing_hook(&trace, "before2", false),
            ]))
            .hook(hook([tracing_hook(&trace, "after1", false)]).after(true))
            .build()
            .unwrap();
        let (mut ctx, _) = test_context("test_command");

        let outcome = execute(&command, &mut ctx).await.unwrap();
        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(
            trace.calls().await,
            vec!["before1", "before2", "body", "after1"]
        );
    }

    #[tokio::test]
    async fn test_exit_skips_body_and_after_hooks() {
        let trace = Arc::new(Trace::default());
        let command = traced_command(&trace)
            .hook(hook([
                tracing_hook(&trace, "first", true),
                tracing_hook(&trace, "second", false),
            ]))
            .hook(hook([tracing_hook(&trace, "after", false)]).after(true))
            .build()
            .unwrap();
        let (mut ctx, _) = test_context("test_command");

        let outcome = execute(&command, &mut ctx).await.unwrap();
        assert_eq!(outcome, Outcome::Halted);
        assert_eq!(trace.calls().await, vec!["first"]);
    }

    #[tokio::test]
    async fn test_after_hook_exit_only_stops_after_chain() {
        let trace = Arc::new(Trace::default());
        let command = traced_command(&trace)
            .hook(
                hook([
                    tracing_hook(&trace, "after1", true),
                    tracing_hook(&trace, "after2", false),
                ])
                .after(true),
            )
            .build()
            .unwrap();
        let (mut ctx, _) = test_context("test_command");

        let outcome = execute(&command, &mut ctx).await.unwrap();
        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(trace.calls().await, vec!["body", "after1"]);
    }

    #[tokio::test]
    async fn test_intercepting_hook_responds() {
        let intercept = hook_fn("intercept", |ctx| {
            Box::pin(async move {
                ctx.respond("INTERCEPTED").await?;
                Ok(HookResult::exit())
            })
        });
        let command = Command::builder("test_command", |ctx| {
            Box::pin(async move { ctx.respond("Done!").await })
        })
        .hook(hook([intercept]))
        .build()
        .unwrap();
        let (mut ctx, responder) = test_context("test_command");

        execute(&command, &mut ctx).await.unwrap();
        let replies = responder.replies.lock().await;
        assert_eq!(
            *replies,
            vec![Reply::Message {
                content: "INTERCEPTED".to_string(),
                ephemeral: false
            }]
        );
    }

    #[tokio::test]
    async fn test_body_sees_rewritten_options() {
        let set_number = hook_fn("set_number", |ctx| {
            Box::pin(async move {
                ctx.options.insert("number", OptionValue::Integer(5));
                Ok(HookResult::proceed())
            })
        });
        let command = Command::builder("test_command", |ctx| {
            Box::pin(async move {
                let number = ctx.options.require_integer("number")?;
                ctx.respond(format!("number is {number}")).await
            })
        })
        .hook(hook([set_number]))
        .build()
        .unwrap();
        let (mut ctx, responder) = test_context("test_command");

        execute(&command, &mut ctx).await.unwrap();
        let replies = responder.replies.lock().await;
        assert_eq!(
            replies[0],
            Reply::Message {
                content: "number is 5".to_string(),
                ephemeral: false
            }
        );
    }

    #[tokio::test]
    async fn test_body_error_skips_after_hooks() {
        let trace = Arc::new(Trace::default());
        let command = Command::builder("broken", |_ctx| {
            Box::pin(async move { Err(anyhow::anyhow!("body failed")) })
        })
        .hook(hook([tracing_hook(&trace, "after", false)]).after(true))
        .build()
        .unwrap();
        let (mut ctx, _) = test_context("broken");

        let err = execute(&command, &mut ctx).await.unwrap_err();
        assert_eq!(err.to_string(), "body failed");
        assert!(trace.calls().await.is_empty());
    }
}
