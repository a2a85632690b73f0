use thiserror::Error;

use crate::boundary::BoundaryError;

/// Errors that can occur while working with the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Input that cannot become a valid catalog entry
    #[error("Invalid input: {0}")]
    Validation(String),

    /// No comic stored under the requested slug
    #[error("No comic found for slug '{0}'")]
    NotFound(String),

    /// A comic with the same slug already exists
    #[error("A comic with slug '{slug}' already exists")]
    Conflict { slug: String },

    /// The backing document could not be loaded or saved
    #[error("Catalog document error: {0}")]
    Document(#[from] BoundaryError),

    /// The catalog could not be encoded or decoded as JSON
    #[error("Catalog serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(slug: impl Into<String>) -> Self {
        Self::NotFound(slug.into())
    }

    pub fn conflict(slug: impl Into<String>) -> Self {
        Self::Conflict { slug: slug.into() }
    }
}
