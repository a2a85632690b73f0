//! The admin bot: configuration, gatekeeper, conversation engine, and
//! update dispatch.

pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod gatekeeper;
pub mod state;

pub use config::{BotConfig, SettingSource, SettingSources, config_path, setting_sources};
pub use dispatcher::Dispatcher;
pub use engine::Engine;
pub use error::BotError;
pub use gatekeeper::Gatekeeper;
pub use state::AdminState;
