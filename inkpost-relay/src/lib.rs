//! Telegram Bot API integration for inkpost.
//!
//! [`RelayClient`] speaks the wire protocol; [`StorageChannel`] and
//! [`PinnedCatalogDocument`] adapt it to the boundary traits the core
//! crate defines; [`decode::decode_update`] turns raw updates into
//! engine input.

pub mod channel;
pub mod client;
pub mod decode;
pub mod document;
pub mod error;
pub mod types;

pub use channel::StorageChannel;
pub use client::RelayClient;
pub use decode::{Incoming, decode_update};
pub use document::PinnedCatalogDocument;
pub use error::RelayError;
