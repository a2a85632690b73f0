//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "inkpost")]
#[command(about = "Comic catalog bot and publishing tools", long_about = None)]
pub(crate) struct Cli {
    /// Hide progress spinners and only log warnings and errors
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the admin bot until interrupted
    Run,

    /// Inspect or modify the published catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Manage bot configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum CatalogAction {
    /// List every comic in the catalog
    List,

    /// Show one comic with its chapters
    Show {
        /// Slug of the comic (e.g., the-iron-bloom)
        slug: String,
    },

    /// Write the catalog JSON document to a file (or stdout with "-")
    Export {
        /// Destination path
        output: PathBuf,
    },

    /// Import a chapter archive into a comic, like the bot upload flow
    ImportArchive {
        /// Slug of the comic to import into
        slug: String,

        /// Path to the .zip archive of chapter folders
        archive: PathBuf,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Print the config file path
    Path,
}
