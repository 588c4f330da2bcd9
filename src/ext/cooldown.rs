//! # Cooldown Hook
//!
//! Limits how often a user can run a command, using a sliding window per
//! (command, user) pair. DashMap keeps the counters safe to share between
//! concurrent invocations.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::commands::context::Context;
use crate::commands::hooks::{Hook, HookResult};
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// (command name, user id)
type CooldownKey = (String, u64);

/// Tracked pairs before expired ones are swept
const SWEEP_THRESHOLD: usize = 1024;

pub struct Cooldown {
    requests: DashMap<CooldownKey, Vec<Instant>>,
    max_requests: usize,
    time_window: Duration,
    sweep_at_len: AtomicUsize,
}

impl Cooldown {
    pub fn new(max_requests: usize, time_window: Duration) -> Self {
        Cooldown {
            requests: DashMap::new(),
            max_requests,
            time_window,
            sweep_at_len: AtomicUsize::new(SWEEP_THRESHOLD),
        }
    }

    /// Record a use at `now`, or return how long until the next one is allowed
    fn check_at(&self, command: &str, user_id: u64, now: Instant) -> Result<(), Duration> {
        if self.requests.len() >= self.sweep_at_len.load(Ordering::Relaxed) {
            self.sweep_at(now);
        }

        let key = (command.to_string(), user_id);
        let mut entry = self.requests.entry(key).or_default();

        entry.retain(|&time| now.duration_since(time) < self.time_window);

        if entry.len() >= self.max_requests {
            let wait = entry
                .first()
                .map(|&oldest| self.time_window.saturating_sub(now.duration_since(oldest)))
                .unwrap_or(self.time_window);
            Err(wait)
        } else {
            entry.push(now);
            Ok(())
        }
    }

    /// Drop every pair whose window has fully expired at `now`
    ///
    /// The next sweep happens once the map has doubled from what survived.
    fn sweep_at(&self, now: Instant) {
        self.requests
            .retain(|_, times| times.iter().any(|&time| now.duration_since(time) < self.time_window));
        let next = (self.requests.len() * 2).max(SWEEP_THRESHOLD);
        self.sweep_at_len.store(next, Ordering::Relaxed);
    }

    /// Record a use now, or return the remaining wait
    pub fn check(&self, command: &str, user_id: u64) -> Result<(), Duration> {
        self.check_at(command, user_id, Instant::now())
    }
}

#[async_trait]
impl Hook for Cooldown {
    async fn call(&self, ctx: &mut Context) -> Result<HookResult> {
        match self.check(&ctx.command_name, ctx.user_id.0) {
            Ok(()) => Ok(HookResult::proceed()),
            Err(wait) => {
                debug!(
                    "[{}] /{} on cooldown for {} ({:?} left)",
                    ctx.request_id, ctx.command_name, ctx.user_id, wait
                );
                ctx.respond_ephemeral(format!(
                    "⏱️ This command is on cooldown. Try again in {}s.",
                    wait.as_secs().max(1)
                ))
                .await?;
                Ok(HookResult::exit())
            }
        }
    }

    fn name(&self) -> &str {
        "cooldown"
    }
}
