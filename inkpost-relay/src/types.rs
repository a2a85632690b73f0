//! Wire types for the slice of the Telegram Bot API the relay uses.
//!
//! Every response arrives wrapped in [`ApiResponse`]; payload structs only
//! declare the fields the rest of the workspace reads, everything else is
//! ignored during deserialization.

use serde::Deserialize;

use crate::error::RelayError;

/// Standard Bot API envelope: `ok` plus either `result` or `description`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the envelope into the payload or an API error.
    pub fn into_result(self) -> Result<T, RelayError> {
        if self.ok {
            self.result
                .ok_or_else(|| RelayError::api("response marked ok but carried no result"))
        } else {
            Err(RelayError::Api(
                self.description
                    .unwrap_or_else(|| "unknown API error".to_string()),
            ))
        }
    }
}

/// One long-poll update. Only messages and callback queries are requested;
/// anything else deserializes with both fields empty and is dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    /// Thumbnail sizes smallest to largest; empty when not a photo message
    #[serde(default)]
    pub photo: Vec<PhotoSize>,
    #[serde(default)]
    pub document: Option<Document>,
}

impl Message {
    /// The largest photo size, when this message carries a photo.
    pub fn largest_photo(&self) -> Option<&PhotoSize> {
        self.photo.last()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub file_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// Only populated by getChat, never on regular updates
    #[serde(default)]
    pub pinned_message: Option<Box<Message>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub message: Option<Message>,
}

/// getFile result; `file_path` feeds the CDN download URL.
#[derive(Debug, Clone, Deserialize)]
pub struct File {
    pub file_id: String,
    #[serde(default)]
    pub file_path: Option<String>,
}

/// getMe result, used to validate the token at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct BotProfile {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
}
