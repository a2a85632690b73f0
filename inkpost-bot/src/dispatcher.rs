//! Serial update dispatch.

use std::sync::Arc;
use std::time::Duration;

use inkpost_core::Reply;
use inkpost_relay::types::Update;
use inkpost_relay::{RelayClient, decode_update};

use crate::engine::Engine;
use crate::error::BotError;

/// Back-off before re-polling after a transport failure.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Single consumer of the update stream: long-poll, decode, run the
/// engine, render replies. Updates are handled strictly one at a time in
/// arrival order, which is what keeps engine sessions race-free.
pub struct Dispatcher {
    client: Arc<RelayClient>,
    engine: Engine,
}

impl Dispatcher {
    pub fn new(client: Arc<RelayClient>, engine: Engine) -> Self {
        Self { client, engine }
    }

    /// Poll until the process is stopped. Transport failures log and back
    /// off rather than killing the service.
    pub async fn run(&self) -> Result<(), BotError> {
        log::info!("dispatcher started, waiting for updates");
        let mut offset = 0i64;
        loop {
            let updates = match self.client.get_updates(offset).await {
                Ok(updates) => updates,
                Err(e) => {
                    log::warn!(
                        "getUpdates failed: {e}; retrying in {}s",
                        RETRY_DELAY.as_secs()
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                    continue;
                }
            };
            for update in updates {
                offset = offset.max(update.update_id + 1);
                self.dispatch(&update).await;
            }
        }
    }

    async fn dispatch(&self, update: &Update) {
        let Some(incoming) = decode_update(update) else {
            return;
        };

        // Ack menu taps right away so the client stops its spinner, even
        // when handling takes a while.
        if let Some(callback_id) = &incoming.callback_id
            && let Err(e) = self.client.answer_callback(callback_id).await
        {
            log::debug!("answerCallbackQuery failed: {e}");
        }

        let replies = self.engine.handle(incoming.actor, incoming.input).await;
        for reply in replies {
            let sent = match &reply {
                Reply::Text(text) => self
                    .client
                    .send_text(incoming.chat_id, text)
                    .await
                    .map(|_| ()),
                Reply::Menu { text, buttons } => self
                    .client
                    .send_menu(incoming.chat_id, text, buttons)
                    .await
                    .map(|_| ()),
            };
            if let Err(e) = sent {
                log::error!("failed to deliver a reply: {e}");
            }
        }
    }
}
