//! # Command Hooks
//!
//! Callbacks that run before or after a command body. Any hook can halt the
//! rest of its chain by returning [`HookResult::exit`]; a halted `before`
//! chain also skips the command body and the `after` chain.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Group hooks via `HasHooks` / `add_hooks`
//! - 1.0.0: Initial hook chain with early exit

use super::context::Context;
use super::meta::Command;
use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What to do after a hook has run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HookResult {
    /// Don't run any following hooks or the command
    pub exit: bool,
}

impl HookResult {
    pub fn proceed() -> Self {
        Self { exit: false }
    }

    pub fn exit() -> Self {
        Self { exit: true }
    }
}

/// A callback run around a command body
///
/// Hooks are async by construction. The context is mutable so a hook can
/// rewrite the options the command will see.
#[async_trait]
pub trait Hook: Send + Sync {
    async fn call(&self, ctx: &mut Context) -> Result<HookResult>;

    /// Name used in log lines
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a hook
pub type HookRef = Arc<dyn Hook>;

/// Hook backed by a closure returning a boxed future
pub struct FnHook<F> {
    name: String,
    callback: F,
}

#[async_trait]
impl<F> Hook for FnHook<F>
where
    F: for<'a> Fn(&'a mut Context) -> BoxFuture<'a, Result<HookResult>> + Send + Sync,
{
    async fn call(&self, ctx: &mut Context) -> Result<HookResult> {
        (self.callback)(ctx).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Wrap a closure as a hook
///
/// ```ignore
/// let say_hi = hook_fn("say_hi", |ctx| Box::pin(async move {
///     ctx.respond("Hello there").await?;
///     Ok(HookResult::proceed())
/// }));
/// ```
pub fn hook_fn<F>(name: impl Into<String>, callback: F) -> HookRef
where
    F: for<'a> Fn(&'a mut Context) -> BoxFuture<'a, Result<HookResult>> + Send + Sync + 'static,
{
    Arc::new(FnHook {
        name: name.into(),
        callback,
    })
}

/// A batch of hooks waiting to be attached to a command
#[derive(Clone)]
pub struct HookSet {
    pub(crate) callbacks: Vec<HookRef>,
    pub(crate) after: bool,
}

/// Register hooks on a command
///
/// ```ignore
/// let ping = hook([say_hi]).apply(ping);
/// ```
pub fn hook(callbacks: impl IntoIterator<Item = HookRef>) -> HookSet {
    HookSet {
        callbacks: callbacks.into_iter().collect(),
        after: false,
    }
}

impl HookSet {
    /// Run these hooks after the command has completed
    pub fn after(mut self, after: bool) -> Self {
        self.after = after;
        self
    }

    /// Attach to an existing command, ahead of the hooks it already has
    ///
    /// Wrapping reads outside-in: `hook([a]).apply(hook([b]).apply(cmd))`
    /// runs `a` before `b`.
    pub fn apply(self, mut command: Command) -> Command {
        command.meta.add_hooks(&self.callbacks, true, self.after);
        command
    }
}

/// Something that carries hooks for every command it contains
pub trait HasHooks {
    fn command_hooks(&self) -> &[HookRef];
    fn command_after_hooks(&self) -> &[HookRef];
}

/// Append a group's hooks to one of its commands
pub fn add_hooks(source: &impl HasHooks, command: &mut Command) {
    let hooks = source.command_hooks();
    if !hooks.is_empty() {
        command.meta.add_hooks(hooks, false, false);
    }
    let after_hooks = source.command_after_hooks();
    if !after_hooks.is_empty() {
        command.meta.add_hooks(after_hooks, false, true);
    }
}

/// Run hooks in order
///
/// Returns `false` as soon as one of them asks to exit.
pub async fn run_hooks(hooks: &[HookRef], ctx: &mut Context) -> Result<bool> {
    for hook in hooks {
        debug!("[{}] Running hook {}", ctx.request_id, hook.name());
        let result = hook.call(ctx).await?;
        if result.exit {
            debug!("[{}] Hook {} stopped the chain", ctx.request_id, hook.name());
            return Ok(false);
        }
    }
    Ok(true)
}
