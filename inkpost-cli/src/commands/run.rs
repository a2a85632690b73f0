use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use inkpost_bot::{BotConfig, Dispatcher, Engine, Gatekeeper};
use inkpost_core::{ActorId, CatalogStore};
use inkpost_relay::{PinnedCatalogDocument, RelayClient, StorageChannel};

use crate::commands::{runtime, spinner};
use crate::error::CliError;

/// Run the bot service until interrupted.
pub(crate) fn run_serve(quiet: bool) -> Result<(), CliError> {
    let config = BotConfig::load()?;
    let rt = runtime()?;

    rt.block_on(async {
        let pb = spinner("Connecting to Telegram...", quiet);
        let connected = RelayClient::connect(config.token.clone()).await;
        pb.finish_and_clear();
        let (client, profile) = connected?;
        let client = Arc::new(client);

        let name = profile
            .username
            .map(|u| format!("@{u}"))
            .unwrap_or_else(|| profile.id.to_string());
        println!(
            "{} Connected as {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            name.if_supports_color(Stdout, |t| t.bold()),
        );

        let pb = spinner("Restoring catalog from the storage channel...", quiet);
        let document = Arc::new(PinnedCatalogDocument::new(client.clone(), config.channel_id));
        let store = Arc::new(CatalogStore::restore(document).await);
        pb.finish_and_clear();
        println!(
            "{} Catalog restored: {} comic(s)",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            store.count().await,
        );
        println!(
            "{}",
            "Listening for admin messages. Press Ctrl-C to stop."
                .if_supports_color(Stdout, |t| t.dimmed()),
        );

        let relay = Arc::new(StorageChannel::new(client.clone(), config.channel_id));
        let engine = Engine::new(store, relay, Gatekeeper::new(ActorId(config.admin_id)));
        let dispatcher = Dispatcher::new(client, engine);
        dispatcher.run().await?;
        Ok(())
    })
}
