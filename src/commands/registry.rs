//! Command registry
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Store full commands and reject duplicate names
//! - 1.0.0: Initial implementation for handler dispatch

use std::collections::BTreeMap;
use std::sync::Arc;

use super::meta::Command;
use crate::core::error::FrameworkError;

/// Registry mapping command names to commands
///
/// # Example
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(ping)?;
///
/// if let Some(command) = registry.get("ping") {
///     execute(&command, &mut ctx).await?;
/// }
/// ```
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Arc<Command>>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its name
    ///
    /// Fails if another command already uses the name.
    pub fn register(&mut self, command: Command) -> Result<(), FrameworkError> {
        let name = command.name().to_string();
        if self.commands.contains_key(&name) {
            return Err(FrameworkError::DuplicateCommand(name));
        }
        self.commands.insert(name, Arc::new(command));
        Ok(())
    }

    /// Get a command by name
    pub fn get(&self, name: &str) -> Option<Arc<Command>> {
        self.commands.get(name).cloned()
    }

    /// Check if a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All registered command names, sorted
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// All registered commands, sorted by name
    pub fn commands(&self) -> impl Iterator<Item = &Arc<Command>> {
        self.commands.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::meta::testing::noop_command;

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_registry_register_single() {
        let mut registry = CommandRegistry::new();
        registry.register(noop_command("ping")).unwrap();

        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("ping"));
        assert!(!registry.contains("pong"));
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let mut registry = CommandRegistry::new();
        registry.register(noop_command("ping")).unwrap();

        let err = registry.register(noop_command("ping")).unwrap_err();
        assert_eq!(err, FrameworkError::DuplicateCommand("ping".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_get_returns_command() {
        let mut registry = CommandRegistry::new();
        registry.register(noop_command("test")).unwrap();

        assert_eq!(registry.get("test").map(|c| c.name().to_string()), Some("test".to_string()));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_registry_names_sorted() {
        let mut registry = CommandRegistry::default();
        registry.register(noop_command("remind")).unwrap();
        registry.register(noop_command("ask")).unwrap();
        registry.register(noop_command("imagine")).unwrap();

        let names: Vec<_> = registry.command_names().collect();
        assert_eq!(names, vec!["ask", "imagine", "remind"]);
    }
}
