use inkpost_core::{ActorId, AdminInput};
use inkpost_relay::RelayError;
use inkpost_relay::decode::decode_update;
use inkpost_relay::types::{ApiResponse, Chat, Update};

fn update(json: &str) -> Update {
    serde_json::from_str(json).unwrap()
}

#[test]
fn text_message_decodes() {
    let incoming = decode_update(&update(
        r#"{
            "update_id": 10,
            "message": {
                "message_id": 5,
                "from": { "id": 42, "username": "admin" },
                "chat": { "id": -100 },
                "text": "/menu"
            }
        }"#,
    ))
    .unwrap();

    assert_eq!(incoming.actor, ActorId(42));
    assert_eq!(incoming.chat_id, -100);
    assert_eq!(incoming.input, AdminInput::Text("/menu".to_string()));
    assert!(incoming.callback_id.is_none());
}

#[test]
fn photo_message_decodes_to_largest_size() {
    let incoming = decode_update(&update(
        r#"{
            "update_id": 11,
            "message": {
                "message_id": 6,
                "from": { "id": 42 },
                "chat": { "id": 42 },
                "photo": [
                    { "file_id": "small", "width": 90, "height": 120 },
                    { "file_id": "medium", "width": 320, "height": 480 },
                    { "file_id": "large", "width": 800, "height": 1200 }
                ]
            }
        }"#,
    ))
    .unwrap();

    match incoming.input {
        AdminInput::Image(file) => assert_eq!(file.as_str(), "large"),
        other => panic!("expected an image, got {other:?}"),
    }
}

#[test]
fn document_message_decodes_with_fallback_name() {
    let named = decode_update(&update(
        r#"{
            "update_id": 12,
            "message": {
                "message_id": 7,
                "from": { "id": 42 },
                "chat": { "id": 42 },
                "document": { "file_id": "doc-1", "file_name": "chapters.zip" }
            }
        }"#,
    ))
    .unwrap();
    assert_eq!(
        named.input,
        AdminInput::Document {
            file: inkpost_core::FileRef::new("doc-1"),
            name: "chapters.zip".to_string()
        }
    );

    let unnamed = decode_update(&update(
        r#"{
            "update_id": 13,
            "message": {
                "message_id": 8,
                "from": { "id": 42 },
                "chat": { "id": 42 },
                "document": { "file_id": "doc-2" }
            }
        }"#,
    ))
    .unwrap();
    match unnamed.input {
        AdminInput::Document { name, .. } => assert_eq!(name, "upload"),
        other => panic!("expected a document, got {other:?}"),
    }
}

#[test]
fn callback_decodes_with_ack_id() {
    let incoming = decode_update(&update(
        r#"{
            "update_id": 14,
            "callback_query": {
                "id": "cbq-77",
                "from": { "id": 42 },
                "data": "comic_the-iron-bloom",
                "message": {
                    "message_id": 9,
                    "chat": { "id": -100 }
                }
            }
        }"#,
    ))
    .unwrap();

    assert_eq!(incoming.actor, ActorId(42));
    assert_eq!(incoming.chat_id, -100);
    assert_eq!(
        incoming.input,
        AdminInput::Callback("comic_the-iron-bloom".to_string())
    );
    assert_eq!(incoming.callback_id.as_deref(), Some("cbq-77"));
}

#[test]
fn noise_updates_are_dropped() {
    // Nothing actionable at all
    assert!(decode_update(&update(r#"{ "update_id": 15 }"#)).is_none());

    // Message without a sender
    assert!(
        decode_update(&update(
            r#"{
                "update_id": 16,
                "message": { "message_id": 10, "chat": { "id": 42 } }
            }"#,
        ))
        .is_none()
    );

    // Callback without data
    assert!(
        decode_update(&update(
            r#"{
                "update_id": 17,
                "callback_query": { "id": "cbq-78", "from": { "id": 42 } }
            }"#,
        ))
        .is_none()
    );
}

#[test]
fn envelope_unwraps_result_or_description() {
    let ok: ApiResponse<i64> = serde_json::from_str(r#"{ "ok": true, "result": 7 }"#).unwrap();
    assert_eq!(ok.into_result().unwrap(), 7);

    let failed: ApiResponse<i64> =
        serde_json::from_str(r#"{ "ok": false, "description": "Bad Request: nope" }"#).unwrap();
    match failed.into_result().unwrap_err() {
        RelayError::Api(description) => assert_eq!(description, "Bad Request: nope"),
        other => panic!("expected an API error, got {other:?}"),
    }
}

#[test]
fn get_chat_pinned_message_parses() {
    let chat: Chat = serde_json::from_str(
        r#"{
            "id": -100,
            "pinned_message": {
                "message_id": 3,
                "chat": { "id": -100 },
                "text": "{\"some\":\"catalog\"}"
            }
        }"#,
    )
    .unwrap();

    let pinned = chat.pinned_message.unwrap();
    assert_eq!(pinned.message_id, 3);
    assert_eq!(pinned.text.as_deref(), Some("{\"some\":\"catalog\"}"));
}
