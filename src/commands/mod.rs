//! # Command System
//!
//! Slash command declaration, option schema generation and hook chains.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod args;
pub mod context;
pub mod handler;
pub mod hooks;
pub mod meta;
pub mod option;
pub mod registry;
pub mod signature;
pub mod slash;

pub use args::{ArgMeta, Locale};
pub use context::{CommandOptions, Context, OptionValue, Responder};
pub use handler::{execute, CommandCallback, Outcome};
pub use hooks::{add_hooks, hook, hook_fn, run_hooks, BoxFuture, HasHooks, Hook, HookRef, HookResult};
pub use meta::{AppCommandMeta, Command, CommandBuilder};
pub use option::{ChannelKind, CommandChoice, CommandOptionDescriptor, OptionType};
pub use registry::CommandRegistry;
pub use signature::{gen_command_option, gen_command_options, Annotation, ChannelClass, OptionArg, ParamKind, Parameter};
pub use slash::{register_global_commands, register_guild_commands, SerenityResponder};
