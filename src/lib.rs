// Core layer - configuration, errors and reply helpers
pub mod core;

// Command layer - schema generation, hooks and dispatch
pub mod commands;

// Framework layer - plugins and the serenity event handler
pub mod framework;

// Ready-made hooks
pub mod ext;

pub use crate::core::{Config, FrameworkError};
pub use framework::{Framework, FrameworkBuilder, Plugin};

/// Useful exports to get started quickly
pub mod prelude {
    pub use crate::commands::args::{self, Locale};
    pub use crate::commands::signature::channels;
    pub use crate::commands::{
        hook, hook_fn, Annotation, ChannelClass, ChannelKind, Command, CommandChoice, Context,
        HookResult, OptionValue, Parameter,
    };
    pub use crate::ext::{defer, Cooldown};
    pub use crate::framework::{Framework, Plugin};
    pub use anyhow::Result;
}
