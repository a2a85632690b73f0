use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use inkpost_bot::BotConfig;
use inkpost_core::CatalogStore;
use inkpost_import::{ImportProgress, ImportStats, import_into_catalog};
use inkpost_relay::{PinnedCatalogDocument, RelayClient, StorageChannel};

use crate::commands::{runtime, spinner};
use crate::error::CliError;

/// Connect to the platform and restore the catalog from the pinned document.
async fn open_catalog(
    config: &BotConfig,
    quiet: bool,
) -> Result<(Arc<RelayClient>, CatalogStore), CliError> {
    let pb = spinner("Connecting to Telegram...", quiet);
    let connected = RelayClient::connect(config.token.clone()).await;
    pb.finish_and_clear();
    let (client, _) = connected?;
    let client = Arc::new(client);

    let pb = spinner("Restoring catalog...", quiet);
    let document = Arc::new(PinnedCatalogDocument::new(client.clone(), config.channel_id));
    let store = CatalogStore::restore(document).await;
    pb.finish_and_clear();
    Ok((client, store))
}

/// List every comic in the catalog.
pub(crate) fn run_list(quiet: bool) -> Result<(), CliError> {
    let config = BotConfig::load()?;
    let rt = runtime()?;

    rt.block_on(async {
        let (_client, store) = open_catalog(&config, quiet).await?;
        let comics = store.get_all().await;

        if comics.is_empty() {
            println!(
                "{}",
                "Catalog is empty.".if_supports_color(Stdout, |t| t.dimmed()),
            );
            return Ok(());
        }

        for comic in &comics {
            let pages: usize = comic.chapters.values().map(|p| p.len()).sum();
            println!(
                "  {} [{}]",
                comic.title.if_supports_color(Stdout, |t| t.bold()),
                comic.slug.if_supports_color(Stdout, |t| t.cyan()),
            );
            println!(
                "    {} chapter(s), {} page(s)",
                comic.chapter_count(),
                pages,
            );
        }
        println!();
        println!("Total: {} comic(s)", comics.len());
        Ok(())
    })
}

/// Show one comic with its chapters in reading order.
pub(crate) fn run_show(slug: &str, quiet: bool) -> Result<(), CliError> {
    let config = BotConfig::load()?;
    let rt = runtime()?;

    rt.block_on(async {
        let (_client, store) = open_catalog(&config, quiet).await?;
        let Some(comic) = store.get(slug).await else {
            return Err(CliError::other(format!("No comic with slug '{slug}'")));
        };

        println!(
            "{} [{}]",
            comic.title.if_supports_color(Stdout, |t| t.bold()),
            comic.slug.if_supports_color(Stdout, |t| t.cyan()),
        );
        println!("  {}", comic.description);
        println!(
            "  {} {}",
            "Cover:".if_supports_color(Stdout, |t| t.cyan()),
            comic.cover,
        );
        println!();

        if comic.chapters.is_empty() {
            println!(
                "{}",
                "No chapters yet.".if_supports_color(Stdout, |t| t.dimmed()),
            );
            return Ok(());
        }

        println!("{}", "Chapters:".if_supports_color(Stdout, |t| t.bold()));
        for (number, pages) in comic.chapters_in_order() {
            println!(
                "  {} {} page(s)",
                format!("{number}:").if_supports_color(Stdout, |t| t.cyan()),
                pages.len(),
            );
        }
        Ok(())
    })
}

/// Write the catalog JSON document to a file, or stdout with "-".
pub(crate) fn run_export(output: &Path, quiet: bool) -> Result<(), CliError> {
    let config = BotConfig::load()?;
    let rt = runtime()?;

    rt.block_on(async {
        let (_client, store) = open_catalog(&config, quiet).await?;
        let json = store.export_json().await?;

        if output == Path::new("-") {
            println!("{json}");
            return Ok(());
        }
        std::fs::write(output, &json)?;
        println!(
            "{} Catalog ({} comic(s)) written to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            store.count().await,
            output.display().if_supports_color(Stdout, |t| t.cyan()),
        );
        Ok(())
    })
}

/// Import progress rendered on a spinner.
struct SpinnerProgress {
    pb: ProgressBar,
}

impl ImportProgress for SpinnerProgress {
    fn on_chapter(&self, current: usize, total: usize, number: &str) {
        self.pb
            .set_message(format!("[{current}/{total}] Chapter {number}"));
    }

    fn on_page(&self, number: &str, current: usize, total: usize) {
        self.pb
            .set_message(format!("Chapter {number}: uploading page {current}/{total}"));
    }

    fn on_skipped_folder(&self, folder: &str) {
        self.pb.println(format!(
            "  {} Skipped '{folder}': no chapter number in the name",
            "?".if_supports_color(Stdout, |t| t.yellow()),
        ));
    }

    fn on_complete(&self, _: &ImportStats) {}
}

/// Import a chapter archive from disk, committing like the bot upload flow.
pub(crate) fn run_import_archive(
    slug: &str,
    archive_path: &Path,
    quiet: bool,
) -> Result<(), CliError> {
    let config = BotConfig::load()?;
    let archive = std::fs::read(archive_path)?;
    let rt = runtime()?;

    rt.block_on(async {
        let (client, store) = open_catalog(&config, quiet).await?;
        let relay = StorageChannel::new(client, config.channel_id);

        println!(
            "Importing {} into '{}'",
            archive_path.display().if_supports_color(Stdout, |t| t.cyan()),
            slug.if_supports_color(Stdout, |t| t.bold()),
        );

        let progress = SpinnerProgress {
            pb: spinner("Scanning archive...", quiet),
        };
        let result = import_into_catalog(&store, &relay, slug, &archive, Some(&progress)).await;
        progress.pb.finish_and_clear();

        let report = result?;
        println!("{}", report.summary());
        Ok(())
    })
}
