//! Hook that defers the interaction response
//!
//! Put it first when later hooks or the command body may take longer than
//! Discord's three second acknowledgement window.
//!
//! ```ignore
//! Command::builder("report", report)
//!     .hook(hook([defer(false), lengthy_hook]))
//!     .build()?;
//! ```

use crate::commands::context::Context;
use crate::commands::hooks::{Hook, HookRef, HookResult};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub struct Defer {
    ephemeral: bool,
}

#[async_trait]
impl Hook for Defer {
    async fn call(&self, ctx: &mut Context) -> Result<HookResult> {
        ctx.defer(self.ephemeral).await?;
        Ok(HookResult::proceed())
    }

    fn name(&self) -> &str {
        "defer"
    }
}

pub fn defer(ephemeral: bool) -> HookRef {
    Arc::new(Defer { ephemeral })
}
