//! CLI command implementations.

pub mod cart;

use go_marketplace_cart::{CartError, ConfigError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The cart operation failed.
    #[error("{0}")]
    Cart(#[from] CartError),
}
