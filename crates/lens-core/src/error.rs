use lens_config::ConfigError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Duplicate category: {0}")]
    DuplicateCategory(Uuid),
    #[error("Validation failed: {0}")]
    Validation(String),
}
