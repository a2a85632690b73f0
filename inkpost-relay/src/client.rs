//! HTTP client for the Telegram Bot API.

use std::time::Duration;

use inkpost_core::{Button, FileRef};
use serde_json::json;

use crate::error::RelayError;
use crate::types::{ApiResponse, BotProfile, Chat, File, Message, Update};

const BASE_URL: &str = "https://api.telegram.org";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// Long-poll wait passed to getUpdates, in seconds. The per-request HTTP
/// timeout is stretched past this so the poll can run its full length.
const POLL_WAIT_SECS: u64 = 30;

/// Thin client over the Bot API methods the bot and the tooling need.
///
/// Errors are reported exactly once to the caller; there is no retry
/// layer here.
pub struct RelayClient {
    http: reqwest::Client,
    token: String,
}

impl RelayClient {
    /// Create a client and validate the token with a getMe round trip.
    pub async fn connect(token: impl Into<String>) -> Result<(Self, BotProfile), RelayError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(RelayError::config("bot token is empty"));
        }
        let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;

        let client = Self { http, token };
        let profile: BotProfile = client.call("getMe", &json!({})).await?;
        Ok((client, profile))
    }

    /// Fetch updates past `offset`, long-polling up to [`POLL_WAIT_SECS`].
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, RelayError> {
        let resp = self
            .http
            .post(self.method_url("getUpdates"))
            .timeout(HTTP_TIMEOUT + Duration::from_secs(POLL_WAIT_SECS))
            .json(&json!({
                "offset": offset,
                "timeout": POLL_WAIT_SECS,
                "allowed_updates": ["message", "callback_query"],
            }))
            .send()
            .await?;
        let envelope: ApiResponse<Vec<Update>> = resp.json().await?;
        envelope.into_result()
    }

    pub async fn send_text(&self, chat_id: i64, text: &str) -> Result<Message, RelayError> {
        self.call("sendMessage", &json!({ "chat_id": chat_id, "text": text }))
            .await
    }

    /// Send a text message with an inline keyboard attached.
    pub async fn send_menu(
        &self,
        chat_id: i64,
        text: &str,
        buttons: &[Vec<Button>],
    ) -> Result<Message, RelayError> {
        let keyboard: Vec<Vec<serde_json::Value>> = buttons
            .iter()
            .map(|row| {
                row.iter()
                    .map(|b| json!({ "text": b.label, "callback_data": b.token }))
                    .collect()
            })
            .collect();
        self.call(
            "sendMessage",
            &json!({
                "chat_id": chat_id,
                "text": text,
                "reply_markup": { "inline_keyboard": keyboard },
            }),
        )
        .await
    }

    /// Acknowledge a callback query so the client stops its spinner.
    pub async fn answer_callback(&self, callback_id: &str) -> Result<(), RelayError> {
        let _: bool = self
            .call(
                "answerCallbackQuery",
                &json!({ "callback_query_id": callback_id }),
            )
            .await?;
        Ok(())
    }

    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
    ) -> Result<(), RelayError> {
        let _: Message = self
            .call(
                "editMessageText",
                &json!({ "chat_id": chat_id, "message_id": message_id, "text": text }),
            )
            .await?;
        Ok(())
    }

    pub async fn pin_message(&self, chat_id: i64, message_id: i64) -> Result<(), RelayError> {
        let _: bool = self
            .call(
                "pinChatMessage",
                &json!({
                    "chat_id": chat_id,
                    "message_id": message_id,
                    "disable_notification": true,
                }),
            )
            .await?;
        Ok(())
    }

    /// The chat's pinned message, if any.
    pub async fn pinned_message(&self, chat_id: i64) -> Result<Option<Message>, RelayError> {
        let chat: Chat = self.call("getChat", &json!({ "chat_id": chat_id })).await?;
        Ok(chat.pinned_message.map(|boxed| *boxed))
    }

    /// Upload a photo to a chat. The returned message carries the photo
    /// sizes the platform produced for it.
    pub async fn send_photo(
        &self,
        chat_id: i64,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<Message, RelayError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .part("photo", part);
        let resp = self
            .http
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await?;
        let envelope: ApiResponse<Message> = resp.json().await?;
        envelope.into_result()
    }

    pub async fn get_file(&self, file_id: &str) -> Result<File, RelayError> {
        self.call("getFile", &json!({ "file_id": file_id })).await
    }

    /// Resolve a file reference to its CDN download URL.
    ///
    /// The URL embeds the bot token, so treat it as a secret with a short
    /// shelf life; the platform keeps it valid for at least an hour.
    pub async fn file_url(&self, file: &FileRef) -> Result<String, RelayError> {
        let info = self.get_file(file.as_str()).await?;
        let path = info.file_path.ok_or(RelayError::FileNotFound)?;
        Ok(format!("{}/file/bot{}/{}", BASE_URL, self.token, path))
    }

    /// Download the bytes behind a file reference. CDN downloads are not
    /// wrapped in the API envelope, so this reads the body directly.
    pub async fn download(&self, file: &FileRef) -> Result<Vec<u8>, RelayError> {
        let url = self.file_url(file).await?;
        let resp = self.http.get(url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RelayError::FileNotFound);
        }
        let bytes = resp.error_for_status()?.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// POST a JSON-bodied API method and unwrap the response envelope.
    ///
    /// The Bot API reports failures as `ok: false` inside an HTTP 4xx, so
    /// the body is parsed regardless of status.
    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: &serde_json::Value,
    ) -> Result<T, RelayError> {
        let resp = self
            .http
            .post(self.method_url(method))
            .json(params)
            .send()
            .await?;
        let envelope: ApiResponse<T> = resp.json().await?;
        envelope.into_result()
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", BASE_URL, self.token, method)
    }
}
