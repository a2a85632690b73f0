use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration or bot service error
    #[error("{0}")]
    Bot(#[from] inkpost_bot::BotError),

    /// Messaging platform error
    #[error("Relay error: {0}")]
    Relay(#[from] inkpost_relay::RelayError),

    /// Catalog operation failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] inkpost_core::CatalogError),

    /// Archive import failed
    #[error("Import error: {0}")]
    Import(#[from] inkpost_import::ImportError),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
