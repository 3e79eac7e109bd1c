use std::path::{Path, PathBuf};

use lens_config::{AnalysisConfig, ConfigManager};
use tracing::debug;

use crate::cli::commands;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::errors::LensError;

/// Environment variable naming the configuration file to use.
pub const CONFIG_ENV: &str = "BUDGET_LENS_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<LoopControl, LensError>;

/// State shared by every command of one CLI run.
pub struct CliContext {
    pub registry: CommandRegistry,
    pub config_path: Option<PathBuf>,
    pub running: bool,
}

impl CliContext {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            registry: CommandRegistry::new(commands::all_definitions()),
            config_path,
            running: true,
        }
    }

    /// Uses `BUDGET_LENS_CONFIG` when no explicit path was given.
    pub fn from_env(config_path: Option<PathBuf>) -> Self {
        let config_path =
            config_path.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        Self::new(config_path)
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn config_manager(&self, override_path: Option<&Path>) -> ConfigManager {
        match override_path.or(self.config_path.as_deref()) {
            Some(path) => ConfigManager::new(path.to_path_buf()),
            None => ConfigManager::from_default_location(),
        }
    }

    /// Loads the effective configuration, preferring `override_path` over the context path.
    pub fn load_config(&self, override_path: Option<&Path>) -> Result<AnalysisConfig, LensError> {
        let manager = self.config_manager(override_path);
        debug!(path = %manager.config_path().display(), "loading analysis configuration");
        Ok(manager.load()?)
    }

    pub fn dispatch(&mut self, name: &str, args: &[&str]) -> CommandResult {
        let handler = self
            .command(name)
            .map(|entry| entry.handler)
            .ok_or_else(|| LensError::UnknownCommand(name.to_string()))?;
        let control = handler(self, args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }
}
