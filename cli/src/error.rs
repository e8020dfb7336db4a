//! Error types for the CLI

use std::path::PathBuf;

use migrator_migrations::{FieldError, WriteError};
use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Field list rejected in strict mode
    #[error("Invalid fields: {0}")]
    Fields(#[from] FieldError),

    /// Migration file could not be written
    #[error("Failed to write SQL file: {0}")]
    Write(#[from] WriteError),

    /// Opening or pinging the database failed
    #[error("{0}")]
    ConnectionError(String),

    /// The statement was rejected by the database; the file is left in place
    #[error("Failed to apply migration {}: {message}", .path.display())]
    MigrationError { path: PathBuf, message: String },

    /// Binary was built without a database driver
    #[error("Database driver not enabled. Rebuild with the '{feature}' feature")]
    DriverNotEnabled { feature: &'static str },
}
