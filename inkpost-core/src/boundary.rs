//! Contracts for the messaging platform the catalog lives behind.
//!
//! The store and the engine only ever talk to these traits; the concrete
//! HTTP client lives in its own crate and keeps all the wire detail there.

use async_trait::async_trait;
use thiserror::Error;

use crate::comic::FileRef;

/// Errors crossing the platform boundary, already stripped of transport
/// detail by the implementing crate.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// The platform rejected or failed the request
    #[error("{0}")]
    Unavailable(String),

    /// The referenced file no longer resolves on the platform
    #[error("File reference cannot be resolved")]
    FileNotFound,
}

impl BoundaryError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Durable home of the serialized catalog.
///
/// In production this is a pinned channel message; tests and tools use
/// [`MemoryDocument`].
#[async_trait]
pub trait CatalogDocument: Send + Sync {
    /// Fetch the current document text, or `None` when none exists yet.
    async fn load(&self) -> Result<Option<String>, BoundaryError>;

    /// Replace the document with `contents`, creating it if needed.
    async fn save(&self, contents: &str) -> Result<(), BoundaryError>;
}

/// Image hosting through the messaging platform.
#[async_trait]
pub trait ImageRelay: Send + Sync {
    /// Upload image bytes and return the platform's handle for them.
    async fn publish_image(&self, bytes: Vec<u8>, filename: &str) -> Result<FileRef, BoundaryError>;

    /// Download the bytes behind a previously issued handle.
    async fn fetch_file(&self, file: &FileRef) -> Result<Vec<u8>, BoundaryError>;
}

/// In-memory document backend for tests and local tooling.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    contents: std::sync::Mutex<Option<String>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: std::sync::Mutex::new(Some(contents.into())),
        }
    }

    /// Current document text, if any has been saved.
    pub fn snapshot(&self) -> Option<String> {
        self.contents.lock().map(|guard| guard.clone()).unwrap_or(None)
    }
}

#[async_trait]
impl CatalogDocument for MemoryDocument {
    async fn load(&self) -> Result<Option<String>, BoundaryError> {
        self.contents
            .lock()
            .map(|guard| guard.clone())
            .map_err(|e| BoundaryError::unavailable(e.to_string()))
    }

    async fn save(&self, contents: &str) -> Result<(), BoundaryError> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|e| BoundaryError::unavailable(e.to_string()))?;
        *guard = Some(contents.to_string());
        Ok(())
    }
}
