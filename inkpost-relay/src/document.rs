//! Catalog persistence as a pinned channel message.
//!
//! The serialized catalog lives in the text of one pinned message in the
//! storage channel. Load finds it through getChat; save edits it in place
//! once known, and otherwise sends a fresh message and pins it.

use std::sync::Arc;

use async_trait::async_trait;
use inkpost_core::{BoundaryError, CatalogDocument};
use tokio::sync::Mutex;

use crate::client::RelayClient;
use crate::error::RelayError;

pub struct PinnedCatalogDocument {
    client: Arc<RelayClient>,
    chat_id: i64,
    /// Message id of the pinned document, once discovered or created
    message_id: Mutex<Option<i64>>,
}

impl PinnedCatalogDocument {
    pub fn new(client: Arc<RelayClient>, chat_id: i64) -> Self {
        Self {
            client,
            chat_id,
            message_id: Mutex::new(None),
        }
    }
}

#[async_trait]
impl CatalogDocument for PinnedCatalogDocument {
    async fn load(&self) -> Result<Option<String>, BoundaryError> {
        let pinned = self.client.pinned_message(self.chat_id).await?;
        match pinned {
            // Only a text message can be our document; a pinned photo or
            // file means somebody else pinned something.
            Some(message) if message.text.is_some() => {
                *self.message_id.lock().await = Some(message.message_id);
                Ok(message.text)
            }
            _ => Ok(None),
        }
    }

    async fn save(&self, contents: &str) -> Result<(), BoundaryError> {
        let mut message_id = self.message_id.lock().await;
        if let Some(id) = *message_id {
            return match self.client.edit_message_text(self.chat_id, id, contents).await {
                Ok(()) => Ok(()),
                // Saving identical content is a success, not a failure.
                Err(RelayError::Api(description))
                    if description.contains("message is not modified") =>
                {
                    Ok(())
                }
                Err(e) => Err(e.into()),
            };
        }

        let sent = self.client.send_text(self.chat_id, contents).await?;
        self.client.pin_message(self.chat_id, sent.message_id).await?;
        *message_id = Some(sent.message_id);
        log::info!("created catalog document as pinned message {}", sent.message_id);
        Ok(())
    }
}
