use std::collections::HashMap;

use crate::cli::context::{CliContext, CommandResult};

pub type CommandHandler = fn(&mut CliContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Commands keyed by name, listed in registration order.
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(entries: Vec<CommandEntry>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for entry in entries {
            if commands.insert(entry.name, entry.clone()).is_none() {
                order.push(entry.name);
            }
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn list(&self) -> impl Iterator<Item = &CommandEntry> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::context::LoopControl;

    fn noop(_context: &mut CliContext, _args: &[&str]) -> CommandResult {
        Ok(LoopControl::Continue)
    }

    #[test]
    fn keeps_registration_order_and_ignores_duplicates() {
        let registry = CommandRegistry::new(vec![
            CommandEntry::new("b", "second", "b", noop),
            CommandEntry::new("a", "first", "a", noop),
            CommandEntry::new("b", "again", "b", noop),
        ]);

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(registry.get("b").map(|entry| entry.description), Some("again"));
        assert!(registry.get("missing").is_none());
    }
}
