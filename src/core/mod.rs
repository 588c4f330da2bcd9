//! # Core Module
//!
//! Configuration, error types and reply helpers shared by the framework.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod config;
pub mod error;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use error::FrameworkError;
pub use response::{truncate_for_message, MESSAGE_LIMIT};
