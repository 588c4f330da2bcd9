//! Framework error types
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial error taxonomy for schema generation and dispatch

use thiserror::Error;

/// Errors raised by the framework itself
///
/// Callbacks and hooks return `anyhow::Result`; these variants convert into
/// `anyhow::Error` with `?` and can be recovered with `downcast_ref`.
#[derive(Debug, Error, PartialEq)]
pub enum FrameworkError {
    /// A parameter could not be turned into a command option
    #[error("invalid signature for parameter `{param}`: {reason}")]
    InvalidSignature { param: String, reason: String },

    /// A generated or hand-written option breaks Discord's constraints
    #[error("invalid option `{option}`: {reason}")]
    InvalidOption { option: String, reason: String },

    /// A command name or description breaks Discord's constraints
    #[error("invalid command `{command}`: {reason}")]
    InvalidCommand { command: String, reason: String },

    /// Two commands were registered under the same name
    #[error("command `{0}` is already registered")]
    DuplicateCommand(String),

    /// An interaction arrived for a command nobody registered
    #[error("no command registered as `{0}`")]
    UnknownCommand(String),

    /// A required option was not present in the interaction
    #[error("missing option `{0}`")]
    MissingOption(String),

    /// An option was present but had a different type than requested
    #[error("option `{name}` is not a {expected}")]
    OptionTypeMismatch { name: String, expected: &'static str },
}

impl FrameworkError {
    pub(crate) fn signature(param: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSignature {
            param: param.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn command(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCommand {
            command: command.into(),
            reason: reason.into(),
        }
    }
}
