//! Admin interaction contracts shared by the conversation engine and the
//! messaging boundary.
//!
//! Incoming platform updates are decoded exactly once at the boundary into
//! [`AdminInput`]; the engine never sees raw payloads. Replies travel the
//! other way as [`Reply`] values the boundary renders.

use std::fmt;

use crate::comic::FileRef;

/// Identity of the person talking to the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(pub i64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One admin input, already decoded at the messaging boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminInput {
    /// Plain text, commands included
    Text(String),
    /// A photo, already hosted by the platform
    Image(FileRef),
    /// A file upload, e.g. a chapter archive
    Document { file: FileRef, name: String },
    /// Inline menu selection token
    Callback(String),
}

/// A single inline menu button.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    /// Text shown on the button
    pub label: String,
    /// Token delivered back as [`AdminInput::Callback`] when tapped
    pub token: String,
}

impl Button {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// Outbound reply from the engine, rendered by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Plain text message
    Text(String),
    /// Text with an inline keyboard attached, one inner `Vec` per row
    Menu { text: String, buttons: Vec<Vec<Button>> },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn menu(text: impl Into<String>, buttons: Vec<Vec<Button>>) -> Self {
        Self::Menu {
            text: text.into(),
            buttons,
        }
    }
}
