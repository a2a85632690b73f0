//! Decoding raw updates into engine input.
//!
//! This is the single place raw platform payloads are interpreted; past
//! here everything is an [`AdminInput`].

use inkpost_core::{ActorId, AdminInput, FileRef};

use crate::types::Update;

/// A decoded admin interaction: who sent it, what it is, where replies
/// go, and the callback id to acknowledge when it came from a menu tap.
#[derive(Debug, Clone)]
pub struct Incoming {
    pub actor: ActorId,
    pub chat_id: i64,
    pub input: AdminInput,
    pub callback_id: Option<String>,
}

/// Decode one update, or `None` when it carries nothing the engine can
/// act on (joins, stickers, edits, and other noise).
///
/// Photo messages decode to the largest size the platform rendered;
/// photo beats document beats text when a message somehow carries more
/// than one.
pub fn decode_update(update: &Update) -> Option<Incoming> {
    if let Some(callback) = &update.callback_query {
        let token = callback.data.clone()?;
        let chat_id = callback
            .message
            .as_ref()
            .map(|m| m.chat.id)
            .unwrap_or(callback.from.id);
        return Some(Incoming {
            actor: ActorId(callback.from.id),
            chat_id,
            input: AdminInput::Callback(token),
            callback_id: Some(callback.id.clone()),
        });
    }

    let message = update.message.as_ref()?;
    let actor = ActorId(message.from.as_ref()?.id);
    let input = if let Some(photo) = message.largest_photo() {
        AdminInput::Image(FileRef::new(photo.file_id.clone()))
    } else if let Some(document) = &message.document {
        AdminInput::Document {
            file: FileRef::new(document.file_id.clone()),
            name: document
                .file_name
                .clone()
                .unwrap_or_else(|| "upload".to_string()),
        }
    } else if let Some(text) = &message.text {
        AdminInput::Text(text.clone())
    } else {
        return None;
    };

    Some(Incoming {
        actor,
        chat_id: message.chat.id,
        input,
        callback_id: None,
    })
}
