//! Bot configuration: token, administrator, storage channel.
//!
//! Values load from environment variables first, then from the TOML
//! config file. Numeric ids that fail to parse are reported instead of
//! silently ignored, since a wrong admin id would lock the admin out.

use std::path::PathBuf;

use crate::error::BotError;

/// Everything the bot service needs to start.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot API token
    pub token: String,
    /// The one account allowed to drive the admin conversation
    pub admin_id: i64,
    /// Private channel holding the catalog document and all images
    pub channel_id: i64,
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each setting.
#[derive(Debug)]
pub struct SettingSources {
    pub token: SettingSource,
    pub admin_id: SettingSource,
    pub channel_id: SettingSource,
}

/// TOML config file format.
#[derive(Debug, serde::Deserialize)]
struct ConfigFile {
    bot: Option<BotSection>,
    channel: Option<ChannelSection>,
}

#[derive(Debug, serde::Deserialize)]
struct BotSection {
    token: Option<String>,
    admin_id: Option<i64>,
}

#[derive(Debug, serde::Deserialize)]
struct ChannelSection {
    id: Option<i64>,
}

impl BotConfig {
    /// Load configuration from environment variables or the config file.
    ///
    /// Priority: env vars > config file. All three settings are required.
    pub fn load() -> Result<Self, BotError> {
        let config = load_config_file();

        let token = std::env::var("INKPOST_BOT_TOKEN")
            .ok()
            .or_else(|| {
                config
                    .as_ref()
                    .and_then(|c| c.bot.as_ref())
                    .and_then(|b| b.token.clone())
            })
            .ok_or_else(|| {
                BotError::config(
                    "Missing bot token. Set INKPOST_BOT_TOKEN or add [bot] token to the config file",
                )
            })?;

        let admin_id = env_id("INKPOST_ADMIN_ID")?
            .or_else(|| {
                config
                    .as_ref()
                    .and_then(|c| c.bot.as_ref())
                    .and_then(|b| b.admin_id)
            })
            .ok_or_else(|| {
                BotError::config(
                    "Missing admin id. Set INKPOST_ADMIN_ID or add [bot] admin_id to the config file",
                )
            })?;

        let channel_id = env_id("INKPOST_CHANNEL_ID")?
            .or_else(|| {
                config
                    .as_ref()
                    .and_then(|c| c.channel.as_ref())
                    .and_then(|ch| ch.id)
            })
            .ok_or_else(|| {
                BotError::config(
                    "Missing storage channel id. Set INKPOST_CHANNEL_ID or add [channel] id to the config file",
                )
            })?;

        Ok(Self {
            token,
            admin_id,
            channel_id,
        })
    }
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("inkpost").join("inkpost.toml"))
}

/// Determine where each setting is coming from.
pub fn setting_sources() -> SettingSources {
    let config = load_config_file();

    let token = if std::env::var("INKPOST_BOT_TOKEN").is_ok() {
        SettingSource::EnvVar("INKPOST_BOT_TOKEN")
    } else if config
        .as_ref()
        .and_then(|c| c.bot.as_ref())
        .and_then(|b| b.token.as_ref())
        .is_some()
    {
        SettingSource::ConfigFile
    } else {
        SettingSource::Missing
    };

    let admin_id = if std::env::var("INKPOST_ADMIN_ID").is_ok() {
        SettingSource::EnvVar("INKPOST_ADMIN_ID")
    } else if config
        .as_ref()
        .and_then(|c| c.bot.as_ref())
        .and_then(|b| b.admin_id)
        .is_some()
    {
        SettingSource::ConfigFile
    } else {
        SettingSource::Missing
    };

    let channel_id = if std::env::var("INKPOST_CHANNEL_ID").is_ok() {
        SettingSource::EnvVar("INKPOST_CHANNEL_ID")
    } else if config
        .as_ref()
        .and_then(|c| c.channel.as_ref())
        .and_then(|ch| ch.id)
        .is_some()
    {
        SettingSource::ConfigFile
    } else {
        SettingSource::Missing
    };

    SettingSources {
        token,
        admin_id,
        channel_id,
    }
}

/// Read an env var holding a numeric id. Present but unparseable is an
/// error; absent is `None`.
fn env_id(var: &'static str) -> Result<Option<i64>, BotError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| BotError::config(format!("{var} must be a numeric id, got '{value}'"))),
        Err(_) => Ok(None),
    }
}

fn load_config_file() -> Option<ConfigFile> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}
