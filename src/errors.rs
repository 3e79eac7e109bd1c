use lens_config::ConfigError;
use lens_core::CoreError;
use thiserror::Error;

/// Error type for snapshot loading, configuration and command handling.
#[derive(Debug, Error)]
pub enum LensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Analysis(#[from] CoreError),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Unknown command `{0}`. Type `help` for the list of commands.")]
    UnknownCommand(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}
