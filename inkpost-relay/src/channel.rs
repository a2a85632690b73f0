//! Image hosting backed by the storage channel.

use std::sync::Arc;

use async_trait::async_trait;
use inkpost_core::{BoundaryError, FileRef, ImageRelay};

use crate::client::RelayClient;
use crate::error::RelayError;

/// [`ImageRelay`] implementation that posts images into the private
/// storage channel and reads them back through the CDN.
///
/// Uploading returns the file id of the largest rendition the platform
/// produced, which is also what readers should be served.
pub struct StorageChannel {
    client: Arc<RelayClient>,
    chat_id: i64,
}

impl StorageChannel {
    pub fn new(client: Arc<RelayClient>, chat_id: i64) -> Self {
        Self { client, chat_id }
    }
}

#[async_trait]
impl ImageRelay for StorageChannel {
    async fn publish_image(&self, bytes: Vec<u8>, filename: &str) -> Result<FileRef, BoundaryError> {
        let message = self.client.send_photo(self.chat_id, bytes, filename).await?;
        let photo = message
            .largest_photo()
            .ok_or_else(|| RelayError::api("sendPhoto returned a message without photo sizes"))?;
        log::debug!("published '{}' as {}", filename, photo.file_id);
        Ok(FileRef::new(photo.file_id.clone()))
    }

    async fn fetch_file(&self, file: &FileRef) -> Result<Vec<u8>, BoundaryError> {
        let bytes = self.client.download(file).await?;
        Ok(bytes)
    }
}
