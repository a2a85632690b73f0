//! inkpost CLI
//!
//! Command-line interface for the comic catalog: run the admin bot,
//! inspect the published catalog, and manage configuration.

mod cli_types;
mod commands;
mod error;

use clap::Parser;
use env_logger::Env;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cli_types::{CatalogAction, Cli, Commands, ConfigAction};

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Run => commands::run::run_serve(cli.quiet),
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::run_list(cli.quiet),
            CatalogAction::Show { slug } => commands::catalog::run_show(&slug, cli.quiet),
            CatalogAction::Export { output } => commands::catalog::run_export(&output, cli.quiet),
            CatalogAction::ImportArchive { slug, archive } => {
                commands::catalog::run_import_archive(&slug, &archive, cli.quiet)
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    if let Err(e) = result {
        eprintln!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

/// Route library log output through env_logger.
///
/// Defaults to info so the service crates' progress is visible; `--verbose`
/// raises it to debug, `--quiet` drops it to warn. `RUST_LOG` overrides all.
fn init_logger(quiet: bool, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();
}
