use thiserror::Error;

use inkpost_core::CatalogError;
use inkpost_relay::RelayError;

/// Errors that can occur while running the bot service.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl BotError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
