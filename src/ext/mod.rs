//! Ready-made hooks

pub mod cooldown;
pub mod defer;

pub use cooldown::Cooldown;
pub use defer::defer;
