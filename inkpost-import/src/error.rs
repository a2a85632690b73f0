use thiserror::Error;

use inkpost_core::{BoundaryError, CatalogError};

#[derive(Debug, Error)]
pub enum ImportError {
    /// The uploaded file is not a readable ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Page upload through the platform failed
    #[error("Image relay error: {0}")]
    Relay(#[from] BoundaryError),

    /// Committing the imported chapters to the catalog failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("No comic found for slug '{0}'")]
    UnknownComic(String),
}
