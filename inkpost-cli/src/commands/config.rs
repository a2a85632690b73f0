use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use inkpost_bot::{BotConfig, SettingSource, config_path, setting_sources};

use crate::error::CliError;

/// Mask a string, showing only the first 2 characters.
fn mask_value(s: &str) -> String {
    if s.len() <= 2 {
        "****".to_string()
    } else {
        format!("{}****", &s[..2])
    }
}

/// Show current settings and their sources.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = config_path();
    let sources = setting_sources();

    println!(
        "{}",
        "Inkpost Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();

    // Config file status
    match &path {
        Some(p) if p.exists() => {
            println!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            println!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            println!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    println!();

    // Resolve values per-field (load() fails when any required field is missing)
    let config = BotConfig::load().ok();

    let get_value =
        |source: &SettingSource, from_config: Option<String>, is_secret: bool| -> Option<String> {
            match source {
                SettingSource::Missing => None,
                SettingSource::EnvVar(var) => {
                    let v = std::env::var(var).ok()?;
                    Some(if is_secret { mask_value(&v) } else { v })
                }
                SettingSource::ConfigFile => {
                    from_config.map(|v| if is_secret { mask_value(&v) } else { v })
                }
            }
        };

    let fields: &[(&str, &SettingSource, Option<String>)] = &[
        (
            "token",
            &sources.token,
            get_value(
                &sources.token,
                config.as_ref().map(|c| c.token.clone()),
                true,
            ),
        ),
        (
            "admin_id",
            &sources.admin_id,
            get_value(
                &sources.admin_id,
                config.as_ref().map(|c| c.admin_id.to_string()),
                false,
            ),
        ),
        (
            "channel_id",
            &sources.channel_id,
            get_value(
                &sources.channel_id,
                config.as_ref().map(|c| c.channel_id.to_string()),
                false,
            ),
        ),
    ];

    for (name, source, value) in fields {
        let source_str = format!("({})", source);
        match value {
            Some(v) => {
                println!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    v,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                println!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match config_path() {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => Err(CliError::other("Could not determine config directory")),
    }
}
