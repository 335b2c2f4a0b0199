//! Command definitions and the name -> command registry

use crate::command::builtins::{builtin_commands, Action};
use crate::command::policy::ArgPolicy;
use crate::core::config::CommandFeatures;
use crate::core::error::{BotError, Result};
use ahash::AHashMap;

/// A named operation: a policy plus the action it runs
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    help: String,
    extended_help: Option<String>,
    policy: ArgPolicy,
    action: Action,
}

impl Command {
    pub fn new(name: &str, help: &str, policy: ArgPolicy, action: Action) -> Self {
        Self {
            name: name.to_string(),
            help: help.to_string(),
            extended_help: None,
            policy,
            action,
        }
    }

    pub fn with_extended_help(mut self, extended_help: &str) -> Self {
        self.extended_help = Some(extended_help.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line summary for listings
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Detailed help; the summary when no non-empty override was given
    pub fn extended_help(&self) -> &str {
        match self.extended_help.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => &self.help,
        }
    }

    pub fn policy(&self) -> ArgPolicy {
        self.policy
    }

    pub fn action(&self) -> Action {
        self.action
    }
}

/// Immutable once built; keys are the lowercase command names
#[derive(Debug, Default)]
pub struct Registry {
    commands: AHashMap<String, Command>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry of built-in commands enabled by `features`
    pub fn builtin(features: &CommandFeatures) -> Result<Self> {
        let mut registry = Self::new();
        for command in builtin_commands(features) {
            registry.register(command)?;
        }
        tracing::debug!(commands = registry.len(), "Command registry built");
        Ok(registry)
    }

    /// Add a command. Names must be non-empty, lowercase, whitespace-free
    /// and unique.
    pub fn register(&mut self, command: Command) -> Result<()> {
        let name = command.name();
        if name.is_empty() {
            return Err(BotError::Registry("command name must not be empty".into()));
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_uppercase()) {
            return Err(BotError::Registry(format!(
                "command name must be a lowercase token: {:?}",
                name
            )));
        }
        if self.commands.contains_key(name) {
            return Err(BotError::Registry(format!("duplicate command: {}", name)));
        }
        self.commands.insert(name.to_string(), command);
        Ok(())
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// (name, help) pairs sorted by name
    pub fn listing(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .commands
            .values()
            .map(|c| (c.name(), c.help()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// One `name<TAB>help` line per command, sorted by name
    pub fn help_listing(&self) -> String {
        self.listing()
            .into_iter()
            .map(|(name, help)| format!("{}\t{}", name, help))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
